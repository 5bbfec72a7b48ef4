//! Generator module - initial board layout
//!
//! Fills every slot in row-major order (row outer, column inner). Each cell draws
//! a kind uniformly from the palette and redraws while the two cells to its left
//! already hold that same kind, so no row starts with an immediate horizontal
//! triple. Vertical triples are not prevented.
//!
//! With at least three kinds a cell has at most one forbidden kind, so every
//! redraw loop terminates with probability 1.

use tracing::{debug, warn};

use crate::grid::Grid;
use crate::palette::Palette;
use crate::rng::TileRng;
use crate::types::{BoardEvent, InstanceId, Slot, Tile, TileType};

/// Monotonic allocator for tile instance ids (first id is 1).
///
/// Ids are never reused: once `u32::MAX` has been handed out the allocator is
/// exhausted and every further allocation returns `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileIds {
    next: Option<u32>,
}

impl TileIds {
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Allocator whose first id follows `last`
    pub fn after(last: Option<InstanceId>) -> Self {
        Self {
            next: last.map_or(Some(1), |id| id.0.checked_add(1)),
        }
    }

    pub fn allocate(&mut self) -> Option<InstanceId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(InstanceId(id))
    }

    /// Id the next allocation will return
    pub fn peek(&self) -> Option<InstanceId> {
        self.next.map(InstanceId)
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }
}

impl Default for TileIds {
    fn default() -> Self {
        Self::new()
    }
}

/// True when placing `kind` at (row, col) would complete a run of three with the
/// two cells immediately to its left.
pub fn completes_triple(grid: &Grid, row: usize, col: usize, kind: TileType) -> bool {
    if col < 2 {
        return false;
    }
    let left = grid.get(row, col - 1).ok().and_then(|s| s.kind());
    let left2 = grid.get(row, col - 2).ok().and_then(|s| s.kind());
    left == Some(kind) && left2 == Some(kind)
}

/// Populate `grid` with fresh tiles.
///
/// Any existing tiles are discarded first. A `TileCreated` event is appended to
/// `events` for every placement, in placement order. Returns the number of tiles
/// placed, which falls short of the grid size only if `ids` runs out.
pub fn generate<R: TileRng>(
    grid: &mut Grid,
    palette: &Palette,
    rng: &mut R,
    ids: &mut TileIds,
    events: &mut Vec<BoardEvent>,
) -> usize {
    grid.clear();

    let size = palette.len() as u32;
    let mut placed = 0usize;
    let mut redraws = 0usize;

    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            let kind = loop {
                let candidate = palette
                    .get(rng.next_range(size) as usize)
                    .unwrap_or(TileType(0));
                if !completes_triple(grid, row, col, candidate) {
                    break candidate;
                }
                redraws += 1;
            };

            let Some(id) = ids.allocate() else {
                warn!(placed, "tile ids exhausted, board left partially filled");
                return placed;
            };
            if grid.set(row, col, Slot::Occupied(Tile::new(id, kind))).is_ok() {
                events.push(BoardEvent::TileCreated { id, kind, row, col });
                placed += 1;
            }
        }
    }

    debug!(
        rows = grid.rows(),
        columns = grid.columns(),
        palette = palette.len(),
        placed,
        redraws,
        "generated board"
    );
    placed
}
