//! Graceful shutdown handling for the application.
//!
//! One Ctrl-C (or an explicit request) resolves every future handed out by
//! [`ShutdownManager::wait`], stopping the tick loop and the server together.

use std::future::Future;

use tokio::sync::watch;

/// Manages graceful shutdown of the application.
pub struct ShutdownManager {
    tx: watch::Sender<bool>,
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownManager {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Requests shutdown.
    pub fn request_shutdown(&self) {
        self.tx.send_replace(true);
        tracing::info!("Shutdown requested");
    }

    /// Checks if shutdown has been requested.
    pub fn is_shutdown_requested(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once shutdown has been requested.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            // Err means the manager is gone, which also ends the run.
            let _ = rx.wait_for(|&stop| stop).await;
        }
    }

    /// Spawns a task that requests shutdown on Ctrl-C.
    pub fn listen_for_ctrl_c(&self) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Ctrl+C received, initiating graceful shutdown...");
                tx.send_replace(true);
            }
        });
    }
}
