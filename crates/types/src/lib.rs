//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond small helpers, which makes
//! them usable from the core logic, the engine state machine and the JSON adapter.
//!
//! # Board Dimensions
//!
//! The board is a rectangular grid addressed as `(row, col)`:
//!
//! - **Rows**: indexed `0..rows`, row 0 is the top
//! - **Columns**: indexed `0..columns`, column 0 is the left edge
//! - **Default size**: 6 x 6
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep used by the headless driver |
//! | `DROP_SETTLE_MS` | 200 | Pause after gravity before the match scan |
//! | `HIGHLIGHT_SETTLE_MS` | 200 | Pause between marking and destroying a run |
//!
//! Settle delays are presentation-only. The engine produces the same grid and the
//! same event order whether they are 0 or 200.
//!
//! # Examples
//!
//! ```
//! use tile_cascade_types::{Slot, Tile, TileType, InstanceId, MIN_RUN_LENGTH};
//!
//! let slot = Slot::Occupied(Tile::new(InstanceId(7), TileType(2)));
//! assert_eq!(slot.kind(), Some(TileType(2)));
//! assert_eq!(TileType(2).letter(), 'C');
//! assert!(Slot::Empty.is_empty());
//! assert_eq!(MIN_RUN_LENGTH, 3);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of rows
pub const DEFAULT_ROWS: usize = 6;

/// Default number of columns
pub const DEFAULT_COLUMNS: usize = 6;

/// Largest row or column count a configured board may have
pub const MAX_DIMENSION: usize = 1024;

/// Smallest palette that can always satisfy the generation constraint
pub const MIN_PALETTE_SIZE: usize = 3;

/// Largest palette supported (kinds are rendered as letters A..P)
pub const MAX_PALETTE_SIZE: usize = 16;

/// A horizontal run of this many equal tiles is cleared
pub const MIN_RUN_LENGTH: usize = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Pause after a drop so a renderer can animate falling tiles
pub const DROP_SETTLE_MS: u32 = 200;

/// Pause between marking a run and destroying it
pub const HIGHLIGHT_SETTLE_MS: u32 = 200;


/// Tile kind drawn from the palette
///
/// Kinds only need a stable identity; colours and sprites belong to whatever
/// presentation layer consumes the events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileType(pub u8);

impl TileType {
    /// Palette index of this kind
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Single-letter label used in grid dumps (`A` for kind 0)
    pub fn letter(self) -> char {
        (b'A' + self.0 % 26) as char
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Unique handle for a tile instance.
///
/// Allocated once when the tile is created and retired when it is destroyed.
/// Ids are never handed out twice by the same engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: InstanceId,
    pub kind: TileType,
}

impl Tile {
    pub fn new(id: InstanceId, kind: TileType) -> Self {
        Self { id, kind }
    }
}

/// A cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(Tile),
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    pub fn tile(&self) -> Option<Tile> {
        match self {
            Slot::Occupied(tile) => Some(*tile),
            Slot::Empty => None,
        }
    }

    pub fn kind(&self) -> Option<TileType> {
        self.tile().map(|t| t.kind)
    }

    pub fn id(&self) -> Option<InstanceId> {
        self.tile().map(|t| t.id)
    }

    /// True when both slots hold tiles of the same kind.
    ///
    /// `Empty` never matches anything, including another `Empty`.
    pub fn same_kind(&self, other: &Slot) -> bool {
        match (self.kind(), other.kind()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Grid coordinate, row 0 is the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Resolver state machine phases
///
/// The cycle goes: Idle → Dropping → Matching → (Resolving → Dropping → Matching)* → Idle,
/// with `Complete` entered from Idle once the grid is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverPhase {
    #[default]
    Idle,
    Dropping,
    Matching,
    Resolving,
    Complete,
}

impl ResolverPhase {
    /// Idle and Complete are the only phases in which no transition is pending
    pub fn is_at_rest(&self) -> bool {
        matches!(self, ResolverPhase::Idle | ResolverPhase::Complete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverPhase::Idle => "idle",
            ResolverPhase::Dropping => "dropping",
            ResolverPhase::Matching => "matching",
            ResolverPhase::Resolving => "resolving",
            ResolverPhase::Complete => "complete",
        }
    }
}

/// Observable engine events, emitted in the order the grid changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    /// The generator placed a tile
    TileCreated {
        id: InstanceId,
        kind: TileType,
        row: usize,
        col: usize,
    },
    /// Gravity relocated a tile
    TileMoved { id: InstanceId, row: usize, col: usize },
    /// Tile belongs to a run and will be destroyed after the highlight delay
    TileMarked { id: InstanceId },
    /// Tile left the grid; its id is retired
    TileDestroyed { id: InstanceId },
    /// The grid is empty
    LevelComplete,
    /// Remove request targeted an empty or out-of-range cell
    InvalidRequest { row: usize, col: usize },
    /// Remove request arrived while a cascade was running
    Busy,
}

/// Grid store access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {rows}x{columns} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },
    #[error("grid dimensions must be at least 1x1 (got {rows}x{columns})")]
    ZeroSized { rows: usize, columns: usize },
    #[error("{rows}x{columns} cells do not fit in memory")]
    TooLarge { rows: usize, columns: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Rejection of a remove request. Neither variant alters the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RemoveError {
    #[error("no tile to remove at ({row}, {col})")]
    InvalidRequest { row: usize, col: usize },
    #[error("board is still resolving")]
    Busy,
}

impl RemoveError {
    /// Event signalled alongside the rejection
    pub fn as_event(&self) -> BoardEvent {
        match *self {
            RemoveError::InvalidRequest { row, col } => BoardEvent::InvalidRequest { row, col },
            RemoveError::Busy => BoardEvent::Busy,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RemoveError::InvalidRequest { .. } => "invalid_request",
            RemoveError::Busy => "busy",
        }
    }
}
