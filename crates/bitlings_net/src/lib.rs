//! JSON envelopes exchanged with observers over the websocket.
//!
//! Every frame is `{"type": ..., "payload": ...}`; unit messages omit the
//! payload.

use bitlings_data::{WorldCommand, WorldSnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum NetMessage {
    /// Server to observer, once per tick.
    WorldUpdate(WorldSnapshot),
    /// Observer to server: a world edit for the next tick.
    UserAction(WorldCommand),
    Ping,
    Pong,
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Borrowing twin of [`NetMessage`] for the hot broadcast path, so a
/// snapshot is serialised without being cloned first.
#[derive(Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
enum Outgoing<'a> {
    WorldUpdate(&'a WorldSnapshot),
}

/// Encodes a `world_update` frame straight from a borrowed snapshot.
pub fn encode_world_update(snapshot: &WorldSnapshot) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&Outgoing::WorldUpdate(snapshot))?)
}

impl NetMessage {
    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }
}
