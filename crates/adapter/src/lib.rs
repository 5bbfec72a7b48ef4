//! Adapter crate - JSON event stream for presentation layers
//!
//! A renderer, a UI shell or a scripted bot drives the engine through this
//! adapter instead of linking against the engine directly.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol**:
//!
//! 1. **Welcome**: the adapter writes `welcome` with the engine configuration
//! 2. **Initial board**: one `event` line per `tile_created`
//! 3. **Commanding**: the client sends `remove`, `snapshot` or `restart`
//! 4. **Event streaming**: every grid change is written as an `event` line, in
//!    the order it happened, as the engine advances on a 16ms tick
//! 5. **Bye**: on input EOF the running cascade is resolved and `bye` is written
//!
//! # Message Types
//!
//! ## Client → Adapter
//!
//! - **remove**: `{"type":"remove","row":5,"col":2}`
//! - **snapshot**: `{"type":"snapshot"}`
//! - **restart**: `{"type":"restart"}`
//!
//! ## Adapter → Client
//!
//! - **welcome**: protocol version and engine configuration
//! - **event**: `seq` plus the flattened engine event (`tile_moved`, `busy`, ...)
//! - **snapshot**: full board view and running stats
//! - **error**: malformed client line, with `code` and `message`
//! - **bye**: final level and stats
//!
//! Rejected removes are reported as `invalid_request` / `busy` events, not errors.
//!
//! # Example Protocol Flow
//!
//! `->` is client to adapter, `<-` is adapter to client.
//!
//! ```text
//! <- {"type":"welcome","protocol_version":"1.0.0","config":{...}}
//! <- {"type":"event","seq":0,"event":"tile_created","id":1,"kind":2,"row":0,"col":0}
//! -> {"type":"remove","row":5,"col":0}
//! <- {"type":"event","seq":36,"event":"tile_destroyed","id":31}
//! <- {"type":"event","seq":37,"event":"tile_moved","id":25,"row":5,"col":0}
//! ```

pub mod protocol;
pub mod server;
pub mod session;

pub use tile_cascade_core as core;
pub use tile_cascade_engine as engine;
pub use tile_cascade_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use server::run_session;
pub use session::Session;
