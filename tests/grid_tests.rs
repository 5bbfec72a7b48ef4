//! Grid tests - storage, bounds and gravity

use tile_cascade::core::{find_runs, Grid};
use tile_cascade::types::{
    GridError, InstanceId, Slot, Tile, TileType, DEFAULT_COLUMNS, DEFAULT_ROWS,
};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(DEFAULT_ROWS, DEFAULT_COLUMNS).unwrap();
    assert_eq!(grid.rows(), DEFAULT_ROWS);
    assert_eq!(grid.columns(), DEFAULT_COLUMNS);

    // All slots should be empty
    for row in 0..DEFAULT_ROWS {
        for col in 0..DEFAULT_COLUMNS {
            assert!(grid.is_valid(row, col), "Slot ({}, {}) should be valid", row, col);
            assert_eq!(grid.get(row, col), Ok(Slot::Empty));
        }
    }
    assert!(grid.is_empty());
}

#[test]
fn test_grid_zero_sized_rejected() {
    assert_eq!(
        Grid::new(0, 4),
        Err(GridError::ZeroSized { rows: 0, columns: 4 })
    );
    assert!(Grid::new(3, 0).is_err());
}

#[test]
fn test_grid_get_out_of_range() {
    let grid = Grid::new(3, 4).unwrap();

    assert!(matches!(grid.get(3, 0), Err(GridError::OutOfRange { .. })));
    assert!(matches!(grid.get(0, 4), Err(GridError::OutOfRange { .. })));
    assert!(!grid.is_valid(3, 0));
    assert!(!grid.is_occupied(99, 99));
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::new(3, 4).unwrap();
    let tile = Tile::new(InstanceId(7), TileType(2));

    grid.set(1, 2, Slot::Occupied(tile)).unwrap();
    assert_eq!(grid.get(1, 2), Ok(Slot::Occupied(tile)));
    assert!(grid.is_occupied(1, 2));
    assert_eq!(grid.occupied_count(), 1);

    // Clear the slot again
    grid.set(1, 2, Slot::Empty).unwrap();
    assert_eq!(grid.get(1, 2), Ok(Slot::Empty));
    assert!(grid.is_empty());
}

#[test]
fn test_grid_set_out_of_range_leaves_grid_untouched() {
    let mut grid = Grid::new(2, 2).unwrap();
    let before = grid.clone();
    let tile = Tile::new(InstanceId(1), TileType(0));

    assert!(grid.set(2, 0, Slot::Occupied(tile)).is_err());
    assert!(grid.set(0, 2, Slot::Occupied(tile)).is_err());
    assert_eq!(grid, before);
}

#[test]
fn test_grid_from_kinds_assigns_ids_row_major() {
    let grid = Grid::from_kinds(&[&[Some(0), None], &[Some(1), Some(2)]]).unwrap();

    assert_eq!(grid.get(0, 0).unwrap().id(), Some(InstanceId(1)));
    assert_eq!(grid.get(1, 0).unwrap().id(), Some(InstanceId(2)));
    assert_eq!(grid.get(1, 1).unwrap().id(), Some(InstanceId(3)));
    assert_eq!(grid.max_id(), Some(InstanceId(3)));
    assert_eq!(grid.to_string(), "A.\nBC\n");
}

#[test]
fn test_grid_from_kinds_rejects_ragged_rows() {
    let err = Grid::from_kinds(&[&[Some(0), Some(1)], &[Some(2)]]).unwrap_err();
    assert_eq!(
        err,
        GridError::RaggedRow {
            row: 1,
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_gravity_compacts_columns_and_keeps_order() {
    let mut grid = Grid::from_kinds(&[
        &[Some(0), Some(1)],
        &[None, None],
        &[Some(2), None],
        &[None, Some(0)],
    ])
    .unwrap();
    let col0_before = grid.column_ids(0);

    let moves = grid.apply_gravity();

    assert_eq!(grid.to_string(), "..\n..\nAB\nCA\n");
    assert_eq!(grid.column_ids(0), col0_before);
    // A at (0,0) -> (2,0), C at (2,0) -> (3,0), B at (0,1) -> (2,1)
    assert_eq!(moves.len(), 3);
    for m in &moves {
        assert!(m.row > m.from_row, "tiles only fall: {:?}", m);
    }
}

#[test]
fn test_gravity_is_idempotent() {
    let mut grid = Grid::from_kinds(&[&[Some(0), None, Some(1)], &[None, Some(2), None]]).unwrap();
    grid.apply_gravity();
    let settled = grid.clone();

    assert!(grid.apply_gravity().is_empty());
    assert_eq!(grid, settled);
}

#[test]
fn test_gravity_on_full_grid_moves_nothing() {
    let mut grid = Grid::from_kinds(&[&[Some(0), Some(1)], &[Some(1), Some(0)]]).unwrap();
    assert!(grid.apply_gravity().is_empty());
}

#[test]
fn test_find_runs_horizontal_only() {
    let grid = Grid::from_kinds(&[
        &[Some(0), Some(1), Some(2)],
        &[Some(0), Some(2), Some(1)],
        &[Some(0), Some(1), Some(2)],
    ])
    .unwrap();
    // Column 0 is AAA vertically; not a run.
    assert!(find_runs(&grid).is_empty());

    let grid = Grid::from_kinds(&[&[Some(1), Some(1), Some(1), Some(1), Some(0)]]).unwrap();
    let runs = find_runs(&grid);
    assert_eq!(runs.len(), 1);
    assert_eq!((runs[0].row, runs[0].start_col, runs[0].len), (0, 0, 4));
}

#[test]
fn test_find_runs_broken_by_gap() {
    let grid = Grid::from_kinds(&[&[Some(0), Some(0), None, Some(0), Some(0)]]).unwrap();
    assert!(find_runs(&grid).is_empty());
}
