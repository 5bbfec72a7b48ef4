//! Property-based tests using proptest
//!
//! Invariants that must hold for ALL boards:
//! - Generation: any seed -> full board without a horizontal triple
//! - Gravity: compacts downward, keeps column order, idempotent
//! - Resolution: at rest no run remains; LevelComplete iff the board is empty
//! - Busy: a rejected request never touches the grid

use proptest::prelude::*;
use proptest::sample::Index;

use tile_cascade::core::{find_runs, Grid, Palette};
use tile_cascade::engine::{BoardEngine, EngineConfig, SettleDelays};
use tile_cascade::types::{BoardEvent, RemoveError};

fn arb_rows() -> impl Strategy<Value = Vec<Vec<Option<u8>>>> {
    (1usize..=7, 1usize..=7).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(
            prop::collection::vec(prop::option::weighted(0.8, 0u8..3), cols),
            rows,
        )
    })
}

fn build(rows: &[Vec<Option<u8>>]) -> Grid {
    let slices: Vec<&[Option<u8>]> = rows.iter().map(|r| r.as_slice()).collect();
    Grid::from_kinds(&slices).unwrap()
}

fn is_compacted(grid: &Grid) -> bool {
    (0..grid.columns()).all(|col| {
        let mut seen_tile = false;
        (0..grid.rows()).all(|row| {
            let occupied = grid.is_occupied(row, col);
            // Once a tile is seen walking down, no gap may follow.
            let ok = !(seen_tile && !occupied);
            seen_tile |= occupied;
            ok
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_generation_fills_board_without_triples(
        seed in any::<u32>(),
        rows in 1usize..=10,
        columns in 1usize..=10,
        palette_size in 3usize..=6,
    ) {
        let config = EngineConfig {
            rows,
            columns,
            palette_size,
            seed,
            delays: SettleDelays::none(),
        };
        let mut engine = BoardEngine::new(&config).unwrap();

        prop_assert_eq!(engine.grid().occupied_count(), rows * columns);
        prop_assert!(find_runs(engine.grid()).is_empty(), "triple in:\n{}", engine.grid());
        prop_assert_eq!(engine.drain_events().len(), rows * columns);
        prop_assert!(engine.grid().tiles().all(|(_, t)| t.kind.index() < palette_size));
    }

    #[test]
    fn prop_generation_is_deterministic(seed in any::<u32>()) {
        let config = EngineConfig { seed, ..EngineConfig::default() };
        let a = BoardEngine::new(&config).unwrap();
        let b = BoardEngine::new(&config).unwrap();
        prop_assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn prop_gravity_compacts_and_preserves_order(rows in arb_rows()) {
        let mut grid = build(&rows);
        let count = grid.occupied_count();
        let columns_before: Vec<_> = (0..grid.columns()).map(|c| grid.column_ids(c)).collect();

        let moves = grid.apply_gravity();

        prop_assert!(is_compacted(&grid));
        prop_assert_eq!(grid.occupied_count(), count);
        for (col, ids) in columns_before.iter().enumerate() {
            prop_assert_eq!(&grid.column_ids(col), ids);
        }
        for m in &moves {
            prop_assert!(m.row > m.from_row);
        }

        let settled = grid.clone();
        prop_assert!(grid.apply_gravity().is_empty());
        prop_assert_eq!(grid, settled);
    }

    #[test]
    fn prop_resolution_leaves_no_runs(rows in arb_rows(), pick in any::<Index>()) {
        let grid = build(&rows);
        let tiles: Vec<_> = grid.tiles().collect();
        prop_assume!(!tiles.is_empty());
        let (pos, _) = tiles[pick.index(tiles.len())];
        let initial_ids: Vec<_> = tiles.iter().map(|(_, t)| t.id).collect();

        let mut engine = BoardEngine::from_grid(grid, Palette::default(), SettleDelays::none());
        let outcome = engine.remove_and_resolve(pos.row, pos.col).unwrap();
        let events = engine.drain_events();

        prop_assert!(!engine.is_busy());
        prop_assert!(find_runs(engine.grid()).is_empty());
        prop_assert!(is_compacted(engine.grid()));
        prop_assert_eq!(outcome.complete, engine.grid().is_empty());

        let completes = events.iter().filter(|e| matches!(e, BoardEvent::LevelComplete)).count();
        prop_assert_eq!(completes, usize::from(engine.grid().is_empty()));

        // No tile appears out of nowhere.
        prop_assert!(engine.grid().tiles().all(|(_, t)| initial_ids.contains(&t.id)));
        prop_assert_eq!(
            engine.grid().occupied_count(),
            initial_ids.len() - 1 - outcome.tiles_matched as usize
        );
    }

    #[test]
    fn prop_tick_and_resolve_agree(rows in arb_rows(), pick in any::<Index>()) {
        let grid = build(&rows);
        let tiles: Vec<_> = grid.tiles().collect();
        prop_assume!(!tiles.is_empty());
        let (pos, _) = tiles[pick.index(tiles.len())];

        let delays = SettleDelays { drop_ms: 48, highlight_ms: 32 };
        let mut ticked = BoardEngine::from_grid(grid.clone(), Palette::default(), delays);
        let mut resolved = BoardEngine::from_grid(grid, Palette::default(), delays);

        ticked.request_remove(pos.row, pos.col).unwrap();
        let mut guard = 0;
        while ticked.is_busy() && guard < 10_000 {
            ticked.tick(16);
            guard += 1;
        }
        resolved.remove_and_resolve(pos.row, pos.col).unwrap();

        prop_assert_eq!(ticked.grid(), resolved.grid());
        prop_assert_eq!(ticked.drain_events(), resolved.drain_events());
    }

    #[test]
    fn prop_busy_never_mutates(rows in arb_rows(), a in any::<Index>(), b in any::<Index>()) {
        let grid = build(&rows);
        let tiles: Vec<_> = grid.tiles().collect();
        prop_assume!(tiles.len() >= 2);
        let (first, _) = tiles[a.index(tiles.len())];
        let (second, _) = tiles[b.index(tiles.len())];

        let delays = SettleDelays { drop_ms: 100, highlight_ms: 100 };
        let mut engine = BoardEngine::from_grid(grid, Palette::default(), delays);
        engine.request_remove(first.row, first.col).unwrap();
        engine.tick(0);
        prop_assume!(engine.is_busy());

        let before = engine.grid().clone();
        let phase = engine.phase();
        prop_assert_eq!(engine.request_remove(second.row, second.col), Err(RemoveError::Busy));
        prop_assert_eq!(engine.grid(), &before);
        prop_assert_eq!(engine.phase(), phase);
    }
}
