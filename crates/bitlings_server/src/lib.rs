//! Websocket observer server.
//!
//! Observers connect at `/` or `/ws`, receive one `world_update` frame per
//! tick and may send `user_action` and `ping` frames back. The tick loop never
//! waits on an observer: snapshots go through a bounded broadcast channel and
//! a lagging connection skips what it missed.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use bitlings_core::{BroadcastSink, CommandSender};
use bitlings_data::WorldSnapshot;
use bitlings_net::NetMessage;
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

/// Incoming frames above this size are dropped unread.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Fan-out point between the tick loop and connected observers.
pub struct ObserverHub {
    tx: broadcast::Sender<String>,
    clients: Mutex<HashSet<Uuid>>,
}

impl ObserverHub {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            clients: Mutex::new(HashSet::new()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn client_count(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    fn register(&self, id: Uuid) -> usize {
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());
        clients.insert(id);
        clients.len()
    }

    fn unregister(&self, id: Uuid) -> usize {
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());
        clients.remove(&id);
        clients.len()
    }
}

impl BroadcastSink for ObserverHub {
    fn send(&self, snapshot: &WorldSnapshot) {
        if self.tx.receiver_count() == 0 {
            return;
        }
        match bitlings_net::encode_world_update(snapshot) {
            Ok(text) => {
                // Err only means every receiver left since the check above.
                let _ = self.tx.send(text);
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode snapshot"),
        }
    }
}

struct AppState {
    hub: Arc<ObserverHub>,
    commands: CommandSender,
}

pub fn router(hub: Arc<ObserverHub>, commands: CommandSender) -> Router {
    let state = Arc::new(AppState { hub, commands });
    Router::new()
        .route("/", get(websocket_handler))
        .route("/ws", get(websocket_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves observers on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    hub: Arc<ObserverHub>,
    commands: CommandSender,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Bitlings observer server listening on {}", addr);
    tracing::info!("    WebSocket: ws://{}/ws", addr);

    axum::serve(listener, router(hub, commands))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| websocket(socket, state))
}

async fn websocket(stream: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = stream.split();
    let client_id = Uuid::new_v4();
    let count = state.hub.register(client_id);
    tracing::info!(%client_id, clients = count, "Observer connected");

    let mut updates = state.hub.subscribe();
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<String>();

    let send_task = tokio::spawn(async move {
        loop {
            let text = tokio::select! {
                update = updates.recv() => match update {
                    Ok(text) => text,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(%client_id, skipped, "Observer lagging, snapshots skipped");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                reply = reply_rx.recv() => match reply {
                    Some(text) => text,
                    None => break,
                },
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = receiver.next().await {
        match message {
            Message::Text(text) => handle_text(&state, client_id, &text, &reply_tx),
            Message::Close(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    let count = state.hub.unregister(client_id);
    tracing::info!(%client_id, clients = count, "Observer disconnected");
}

fn handle_text(
    state: &AppState,
    client_id: Uuid,
    text: &str,
    reply_tx: &mpsc::UnboundedSender<String>,
) {
    if text.len() > MAX_MESSAGE_SIZE {
        tracing::warn!(
            "Client {} sent oversized message: {} bytes (max: {})",
            client_id,
            text.len(),
            MAX_MESSAGE_SIZE
        );
        return;
    }

    match NetMessage::decode(text) {
        Ok(NetMessage::UserAction(command)) => {
            tracing::debug!(%client_id, ?command, "User action received");
            if let Err(e) = state.commands.enqueue(command) {
                tracing::warn!(%client_id, error = %e, "Dropping user action");
            }
        }
        Ok(NetMessage::Ping) => match NetMessage::Pong.encode() {
            Ok(pong) => {
                let _ = reply_tx.send(pong);
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode pong"),
        },
        Ok(other) => {
            tracing::debug!(%client_id, ?other, "Ignoring unexpected message type");
        }
        Err(e) => {
            tracing::warn!(%client_id, error = %e, "Ignoring malformed message");
        }
    }
}
