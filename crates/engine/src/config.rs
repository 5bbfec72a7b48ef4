//! Engine configuration
//!
//! Defaults describe the stock level: a 6x6 board, three tile kinds and
//! 200ms settle pauses. Every field can be overridden from the environment.

use serde::{Deserialize, Serialize};

use crate::core::Palette;
use crate::types::{
    GridError, DEFAULT_COLUMNS, DEFAULT_ROWS, DROP_SETTLE_MS, HIGHLIGHT_SETTLE_MS, MAX_DIMENSION,
    MAX_PALETTE_SIZE, MIN_PALETTE_SIZE,
};

/// Presentation pauses between resolver steps.
///
/// They only give a renderer time to animate; the grid and the event order are
/// identical for any values, including zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleDelays {
    /// Pause after gravity before the match scan
    pub drop_ms: u32,
    /// Pause between marking a run and destroying it
    pub highlight_ms: u32,
}

impl SettleDelays {
    /// No pauses, for tests and headless simulation
    pub fn none() -> Self {
        Self {
            drop_ms: 0,
            highlight_ms: 0,
        }
    }
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            drop_ms: DROP_SETTLE_MS,
            highlight_ms: HIGHLIGHT_SETTLE_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1 (got {rows}x{columns})")]
    ZeroSized { rows: usize, columns: usize },
    #[error("board {rows}x{columns} exceeds {max} rows or columns")]
    TooLarge {
        rows: usize,
        columns: usize,
        max: usize,
    },
    #[error("palette size {size} outside {min}..={max}")]
    PaletteSize { size: usize, min: usize, max: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Board engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub columns: usize,
    pub palette_size: usize,
    pub seed: u32,
    pub delays: SettleDelays,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            palette_size: MIN_PALETTE_SIZE,
            seed: 1,
            delays: SettleDelays::default(),
        }
    }
}

impl EngineConfig {
    /// Create from environment variables.
    ///
    /// - `TILE_CASCADE_ROWS` / `TILE_CASCADE_COLUMNS`: board size
    /// - `TILE_CASCADE_PALETTE`: number of tile kinds
    /// - `TILE_CASCADE_SEED`: generator seed
    /// - `TILE_CASCADE_DROP_MS` / `TILE_CASCADE_HIGHLIGHT_MS`: settle delays
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        fn parsed<T: std::str::FromStr>(raw: Option<String>, fallback: T) -> T {
            raw.and_then(|s| s.trim().parse().ok()).unwrap_or(fallback)
        }

        Self {
            rows: parsed(lookup("TILE_CASCADE_ROWS"), defaults.rows),
            columns: parsed(lookup("TILE_CASCADE_COLUMNS"), defaults.columns),
            palette_size: parsed(lookup("TILE_CASCADE_PALETTE"), defaults.palette_size),
            seed: parsed(lookup("TILE_CASCADE_SEED"), defaults.seed),
            delays: SettleDelays {
                drop_ms: parsed(lookup("TILE_CASCADE_DROP_MS"), defaults.delays.drop_ms),
                highlight_ms: parsed(
                    lookup("TILE_CASCADE_HIGHLIGHT_MS"),
                    defaults.delays.highlight_ms,
                ),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::ZeroSized {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.rows > MAX_DIMENSION || self.columns > MAX_DIMENSION {
            return Err(ConfigError::TooLarge {
                rows: self.rows,
                columns: self.columns,
                max: MAX_DIMENSION,
            });
        }
        self.palette().map(|_| ())
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Palette::new(self.palette_size).ok_or(ConfigError::PaletteSize {
            size: self.palette_size,
            min: MIN_PALETTE_SIZE,
            max: MAX_PALETTE_SIZE,
        })
    }
}
