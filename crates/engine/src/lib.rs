//! Board engine crate - the resolve state machine
//!
//! Wraps the core grid logic in an instance-scoped state machine that owns the
//! grid, sequences drop / match / destroy passes, and reports every change as a
//! [`BoardEvent`](tile_cascade_types::BoardEvent).
//!
//! # Example
//!
//! ```
//! use tile_cascade_engine::{BoardEngine, EngineConfig, SettleDelays};
//!
//! let config = EngineConfig {
//!     delays: SettleDelays::none(),
//!     ..EngineConfig::default()
//! };
//! let mut engine = BoardEngine::new(&config).unwrap();
//! let created = engine.drain_events().len();
//! assert_eq!(created, 36);
//!
//! engine.remove_and_resolve(5, 0).unwrap();
//! assert!(engine.is_idle() || engine.is_complete());
//! ```

pub mod config;
pub mod engine;

pub use tile_cascade_core as core;
pub use tile_cascade_types as types;

pub use config::{ConfigError, EngineConfig, SettleDelays};
pub use engine::{BoardEngine, EngineStats, ResolveOutcome};
