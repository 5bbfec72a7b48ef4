//! Session state - maps client commands onto the engine and engine events onto
//! outbound messages. Synchronous; the async loop in [`crate::server`] only
//! moves lines in and out.

use tracing::debug;

use crate::core::{BoardSnapshot, SimpleRng, TileRng};
use crate::engine::{BoardEngine, EngineConfig};
use crate::protocol::{parse_client_line, ClientMessage, ServerMessage, PROTOCOL_VERSION};

pub struct Session<R: TileRng = SimpleRng> {
    engine: BoardEngine<R>,
    config: EngineConfig,
    /// Sequence number of the next event message
    seq: u64,
    snapshot: BoardSnapshot,
}

impl<R: TileRng> Session<R> {
    pub fn new(engine: BoardEngine<R>, config: EngineConfig) -> Self {
        Self {
            engine,
            config,
            seq: 0,
            snapshot: BoardSnapshot::default(),
        }
    }

    pub fn engine(&self) -> &BoardEngine<R> {
        &self.engine
    }

    /// Welcome line followed by the events of the initial board
    pub fn start(&mut self) -> Vec<ServerMessage> {
        let mut out = vec![ServerMessage::Welcome {
            protocol_version: PROTOCOL_VERSION,
            config: self.config.clone(),
        }];
        self.drain_into(&mut out);
        out
    }

    /// Handle one inbound line. Blank lines are ignored.
    pub fn handle_line(&mut self, line: &str) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        if line.trim().is_empty() {
            return out;
        }

        match parse_client_line(line) {
            Ok(msg) => self.handle_message(msg, &mut out),
            Err(e) => {
                debug!("rejecting client line: {e}");
                out.push(ServerMessage::Error {
                    code: e.code(),
                    message: e.to_string(),
                });
            }
        }
        out
    }

    fn handle_message(&mut self, msg: ClientMessage, out: &mut Vec<ServerMessage>) {
        match msg {
            ClientMessage::Remove { row, col } => {
                // Rejections are reported through the InvalidRequest / Busy events.
                let _ = self.engine.request_remove(row, col);
                // Run everything that needs no settle pause right away.
                self.engine.tick(0);
                self.drain_into(out);
            }
            ClientMessage::Snapshot => {
                self.drain_into(out);
                out.push(self.snapshot_message());
            }
            ClientMessage::Restart => {
                let restarted = self.engine.restart().is_ok();
                self.drain_into(out);
                if restarted {
                    out.push(self.snapshot_message());
                }
            }
        }
    }

    /// Advance the engine by `elapsed_ms` and collect the resulting events
    pub fn tick(&mut self, elapsed_ms: u32) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        if self.engine.tick(elapsed_ms) {
            self.drain_into(&mut out);
        }
        out
    }

    /// Resolve any running cascade without pauses and close the session
    pub fn finish(&mut self) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        self.engine.resolve();
        self.drain_into(&mut out);
        out.push(ServerMessage::Bye {
            level: self.engine.level(),
            stats: self.engine.stats(),
        });
        out
    }

    fn drain_into(&mut self, out: &mut Vec<ServerMessage>) {
        while let Some(event) = self.engine.poll_event() {
            out.push(ServerMessage::Event {
                seq: self.seq,
                event,
            });
            self.seq += 1;
        }
    }

    fn snapshot_message(&mut self) -> ServerMessage {
        self.engine.snapshot_into(&mut self.snapshot);
        ServerMessage::Snapshot {
            snapshot: self.snapshot.clone(),
            stats: self.engine.stats(),
        }
    }
}
