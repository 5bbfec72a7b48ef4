//! Core board logic - pure, deterministic, and testable
//!
//! This crate holds the data-level building blocks of the tile-matching board.
//! It has **no** notion of time, event queues or I/O; the state machine that
//! sequences these pieces lives in `tile-cascade-engine`.
//!
//! - **Deterministic**: the same seed produces the same board
//! - **Testable**: every step can be exercised on a hand-built grid
//!
//! # Module Structure
//!
//! - [`grid`]: rows x columns slot storage with bounds-checked access and gravity
//! - [`generator`]: initial fill that avoids immediate horizontal triples
//! - [`matcher`]: horizontal run detection
//! - [`palette`]: the set of tile kinds in play
//! - [`rng`]: injectable random source plus a seeded LCG
//! - [`snapshot`]: serializable board view for observers
//!
//! # Example
//!
//! ```
//! use tile_cascade_core::{find_runs, Grid};
//!
//! let mut grid = Grid::from_kinds(&[
//!     &[Some(0), Some(1), Some(0)],
//!     &[Some(0), None, Some(0)],
//! ])
//! .unwrap();
//!
//! // The B tile falls into the gap.
//! grid.apply_gravity();
//! assert_eq!(grid.to_string(), "A.A\nABA\n");
//! assert!(find_runs(&grid).is_empty());
//! ```

pub mod generator;
pub mod grid;
pub mod matcher;
pub mod palette;
pub mod rng;
pub mod snapshot;

pub use tile_cascade_types as types;

// Re-export commonly used types for convenience
pub use generator::{completes_triple, generate, TileIds};
pub use grid::{Grid, TileMove};
pub use matcher::{find_runs, marked_positions, Run};
pub use palette::Palette;
pub use rng::{ScriptedRng, SimpleRng, TileRng};
pub use snapshot::{fnv1a64, BoardSnapshot};
