//! Board snapshot - serializable view of the grid for observers

use serde::Serialize;

use crate::grid::Grid;
use crate::types::ResolverPhase;

/// Stable 64-bit FNV-1a over the cell bytes.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions, and the
/// hash is exported to external observers.
pub fn fnv1a64(bytes: impl Iterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

/// Serializable view of a board for observers.
///
/// `cells` holds `kind + 1` per slot (0 is empty); `ids` holds the instance id
/// per slot (0 is empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<u8>>,
    pub ids: Vec<Vec<u32>>,
    pub board_hash: u64,
    pub phase: ResolverPhase,
    pub level: u32,
    pub complete: bool,
    pub tiles_left: usize,
}

impl BoardSnapshot {
    /// Overwrite the grid-derived fields, reusing existing allocations.
    pub fn write_grid(&mut self, grid: &Grid) {
        self.rows = grid.rows();
        self.columns = grid.columns();
        self.cells.resize_with(grid.rows(), Vec::new);
        self.ids.resize_with(grid.rows(), Vec::new);

        for (r, (cells, ids)) in self.cells.iter_mut().zip(self.ids.iter_mut()).enumerate() {
            cells.clear();
            ids.clear();
            for slot in grid.row(r).unwrap_or(&[]) {
                cells.push(slot.kind().map_or(0, |k| k.0 + 1));
                ids.push(slot.id().map_or(0, |id| id.0));
            }
        }

        self.board_hash = fnv1a64(self.cells.iter().flat_map(|row| row.iter().copied()));
        self.tiles_left = grid.occupied_count();
    }

    pub fn from_grid(grid: &Grid) -> Self {
        let mut s = Self::default();
        s.write_grid(grid);
        s
    }

    pub fn playable(&self) -> bool {
        self.phase == ResolverPhase::Idle && !self.complete
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            columns: 0,
            cells: Vec::new(),
            ids: Vec::new(),
            board_hash: fnv1a64(std::iter::empty()),
            phase: ResolverPhase::Idle,
            level: 0,
            complete: false,
            tiles_left: 0,
        }
    }
}
