//! Grid module - the board's slot storage
//!
//! The grid is a `rows x columns` array of slots stored flat in row-major order
//! for cache locality. Coordinates are `(row, col)` with row 0 at the top, so
//! gravity pulls tiles toward higher row indices.
//!
//! Gravity is implemented here as well: it only touches slot storage and is a
//! per-column stable partition.

use std::fmt;

use crate::types::{BoardEvent, GridError, InstanceId, Position, Slot, Tile, TileType};

/// A tile relocated by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileMove {
    pub id: InstanceId,
    pub from_row: usize,
    pub row: usize,
    pub col: usize,
}

impl From<TileMove> for BoardEvent {
    fn from(m: TileMove) -> Self {
        BoardEvent::TileMoved {
            id: m.id,
            row: m.row,
            col: m.col,
        }
    }
}

/// The board grid using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    /// Flat array of slots, row-major order (row * columns + col)
    cells: Vec<Slot>,
}

impl Grid {
    /// Create an empty grid. Both dimensions must be non-zero.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::ZeroSized { rows, columns });
        }
        let len = rows
            .checked_mul(columns)
            .filter(|&n| n <= isize::MAX as usize / std::mem::size_of::<Slot>())
            .ok_or(GridError::TooLarge { rows, columns })?;
        Ok(Self {
            rows,
            columns,
            cells: vec![Slot::Empty; len],
        })
    }

    /// Build a grid from rows of kind indices (`None` is an empty slot).
    ///
    /// Occupied slots get instance ids counting up from 1 in row-major order.
    ///
    /// ```
    /// use tile_cascade_core::Grid;
    ///
    /// let grid = Grid::from_kinds(&[&[Some(0), None], &[Some(1), Some(1)]]).unwrap();
    /// assert_eq!(grid.to_string(), "A.\nBB\n");
    /// ```
    pub fn from_kinds(rows: &[&[Option<u8>]]) -> Result<Self, GridError> {
        let columns = rows.first().map_or(0, |r| r.len());
        let mut grid = Self::new(rows.len(), columns)?;
        let mut next_id = 1u32;
        for (row, kinds) in rows.iter().enumerate() {
            if kinds.len() != columns {
                return Err(GridError::RaggedRow {
                    row,
                    expected: columns,
                    found: kinds.len(),
                });
            }
            for (col, kind) in kinds.iter().enumerate() {
                if let Some(kind) = kind {
                    let tile = Tile::new(InstanceId(next_id), TileType(*kind));
                    next_id += 1;
                    grid.set(row, col, Slot::Occupied(tile))?;
                }
            }
        }
        Ok(grid)
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        Some(row * self.columns + col)
    }

    fn out_of_range(&self, row: usize, col: usize) -> GridError {
        GridError::OutOfRange {
            row,
            col,
            rows: self.rows,
            columns: self.columns,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get slot at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<Slot, GridError> {
        self.index(row, col)
            .map(|idx| self.cells[idx])
            .ok_or_else(|| self.out_of_range(row, col))
    }

    /// Set slot at (row, col)
    pub fn set(&mut self, row: usize, col: usize, slot: Slot) -> Result<(), GridError> {
        let idx = self
            .index(row, col)
            .ok_or_else(|| self.out_of_range(row, col))?;
        self.cells[idx] = slot;
        Ok(())
    }

    /// Check if (row, col) addresses a cell of this grid
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some()
    }

    /// Check if position is occupied (within bounds and holding a tile)
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Ok(Slot::Occupied(_)))
    }

    /// True when every slot is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Slot::is_empty)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|s| s.is_occupied()).count()
    }

    /// Slots of one row, left to right
    pub fn row(&self, row: usize) -> Option<&[Slot]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    /// Get a reference to the internal slot array
    pub fn cells(&self) -> &[Slot] {
        &self.cells
    }

    /// Live tiles with their positions, in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        let columns = self.columns;
        self.cells.iter().enumerate().filter_map(move |(idx, slot)| {
            slot.tile()
                .map(|tile| (Position::new(idx / columns, idx % columns), tile))
        })
    }

    pub fn position_of(&self, id: InstanceId) -> Option<Position> {
        self.tiles()
            .find(|(_, tile)| tile.id == id)
            .map(|(pos, _)| pos)
    }

    /// Ids of the tiles in a column, top to bottom
    pub fn column_ids(&self, col: usize) -> Vec<InstanceId> {
        if col >= self.columns {
            return Vec::new();
        }
        (0..self.rows)
            .filter_map(|row| self.cells[row * self.columns + col].id())
            .collect()
    }

    /// Highest instance id present on the grid
    pub fn max_id(&self) -> Option<InstanceId> {
        self.tiles().map(|(_, tile)| tile.id).max()
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Slot::Empty;
        }
    }

    /// Compact every column toward the bottom row.
    ///
    /// Each column is a stable partition: occupied tiles keep their relative
    /// order and empties collect at the top. Moves are reported column by
    /// column, bottom-up within a column. A grid with no internal gaps is left
    /// untouched and yields no moves.
    pub fn apply_gravity(&mut self) -> Vec<TileMove> {
        let mut moves = Vec::new();

        for col in 0..self.columns {
            // Next free row from the bottom
            let mut write_row = self.rows;

            for read_row in (0..self.rows).rev() {
                let read_idx = read_row * self.columns + col;
                let Slot::Occupied(tile) = self.cells[read_idx] else {
                    continue;
                };

                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row * self.columns + col] = Slot::Occupied(tile);
                    self.cells[read_idx] = Slot::Empty;
                    moves.push(TileMove {
                        id: tile.id,
                        from_row: read_row,
                        row: write_row,
                        col,
                    });
                }
            }
        }

        moves
    }
}

impl fmt::Display for Grid {
    /// One line per row: kind letters, `.` for empty slots.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            for slot in row {
                match slot.kind() {
                    Some(kind) => write!(f, "{}", kind.letter())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
