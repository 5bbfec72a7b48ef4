//! Protocol module - JSON message types for the event stream
//!
//! Line-delimited JSON. Every message carries a `type` tag.

use serde::{Deserialize, Serialize};

use crate::core::BoardSnapshot;
use crate::engine::{EngineConfig, EngineStats};
use crate::types::BoardEvent;

pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Client -> Engine Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Remove the tile at (row, col)
    Remove { row: usize, col: usize },
    /// Request a full board snapshot
    Snapshot,
    /// Generate the next level
    Restart,
}

// ============== Engine -> Client Messages ==============

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// First line of every session
    Welcome {
        protocol_version: &'static str,
        config: EngineConfig,
    },
    /// One engine event; `seq` increases by one per event
    Event {
        seq: u64,
        #[serde(flatten)]
        event: BoardEvent,
    },
    Snapshot {
        snapshot: BoardSnapshot,
        stats: EngineStats,
    },
    Error {
        code: &'static str,
        message: String,
    },
    /// Last line of every session
    Bye { level: u32, stats: EngineStats },
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid message: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProtocolError {
    pub fn code(&self) -> &'static str {
        match self {
            ProtocolError::Json(_) => "invalid_message",
        }
    }
}

/// Parse one client line (without its trailing newline)
pub fn parse_client_line(line: &str) -> Result<ClientMessage, ProtocolError> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Encode a server message as a single JSON line (without the newline)
pub fn encode_server_message(msg: &ServerMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(msg)?)
}
