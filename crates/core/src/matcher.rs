//! Run detection
//!
//! Rows are scanned independently, left to right. A run is a maximal stretch of
//! horizontally adjacent occupied slots sharing one kind; empty slots break runs
//! and never match each other. Columns are not scanned.

use crate::grid::Grid;
use crate::types::{Position, MIN_RUN_LENGTH};

/// A horizontal run of at least `MIN_RUN_LENGTH` equal tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub row: usize,
    pub start_col: usize,
    pub len: usize,
}

impl Run {
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (self.start_col..self.start_col + self.len).map(move |col| Position::new(self.row, col))
    }
}

/// All runs on the grid, top row first, left to right within a row
pub fn find_runs(grid: &Grid) -> Vec<Run> {
    let mut runs = Vec::new();

    for row in 0..grid.rows() {
        let Some(slots) = grid.row(row) else {
            continue;
        };

        let mut start = 0usize;
        for col in 1..=slots.len() {
            // A run breaks on a kind change, an empty slot, or the row end.
            let continues = col < slots.len() && slots[col - 1].same_kind(&slots[col]);
            if continues {
                continue;
            }

            let len = col - start;
            if len >= MIN_RUN_LENGTH && slots[start].is_occupied() {
                runs.push(Run {
                    row,
                    start_col: start,
                    len,
                });
            }
            start = col;
        }
    }

    runs
}

/// Positions of every tile belonging to a run, in row-major order
pub fn marked_positions(grid: &Grid) -> Vec<Position> {
    find_runs(grid).iter().flat_map(|run| run.positions().collect::<Vec<_>>()).collect()
}
