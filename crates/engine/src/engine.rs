//! Board engine - owns the grid and runs the resolve cycle
//!
//! A remove request starts a cascade that walks the resolver phases:
//!
//! ```text
//! Idle --remove--> Dropping --(drop settle)--> Matching --no runs--> Idle [--empty--> Complete]
//!                     ^                           |
//!                     |                        runs found
//!                     |                           v
//!                     +------------------- Resolving (highlight settle)
//! ```
//!
//! The engine is advanced either by [`BoardEngine::tick`] (fixed timestep, honours
//! settle delays) or by [`BoardEngine::resolve`] (runs straight to rest). Both
//! apply the same grid mutations and emit the same events in the same order.
//!
//! The engine is not internally thread-safe: every mutator takes `&mut self`.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ConfigError, EngineConfig, SettleDelays};
use crate::core::{
    generate, marked_positions, BoardSnapshot, Grid, Palette, SimpleRng, TileIds, TileRng,
};
use crate::types::{BoardEvent, InstanceId, Position, RemoveError, ResolverPhase, Slot, Tile};

type Listener = Box<dyn FnMut(&BoardEvent) + Send>;

/// Running totals for one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct EngineStats {
    /// Accepted remove requests
    pub removals: u32,
    /// Tiles destroyed by runs
    pub tiles_matched: u32,
    /// Match passes that destroyed at least one run
    pub cascades: u32,
}

/// Result of a synchronous remove-and-resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub removed: InstanceId,
    pub tiles_matched: u32,
    pub cascades: u32,
    pub complete: bool,
}

pub struct BoardEngine<R: TileRng = SimpleRng> {
    grid: Grid,
    palette: Palette,
    rng: R,
    ids: TileIds,
    delays: SettleDelays,
    phase: ResolverPhase,
    /// Remaining settle pause before the next transition
    settle_timer_ms: u32,
    /// Tiles marked by the last match pass, destroyed on leaving Resolving
    marked: Vec<Position>,
    events: VecDeque<BoardEvent>,
    listeners: Vec<Listener>,
    /// Monotonic level counter (increments on restart)
    level: u32,
    stats: EngineStats,
}

impl BoardEngine<SimpleRng> {
    /// Create an engine with a seeded LCG and generate the first board
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SimpleRng::new(config.seed))
    }

    /// Wrap a hand-built grid. No tiles are generated.
    pub fn from_grid(grid: Grid, palette: Palette, delays: SettleDelays) -> Self {
        Self::from_grid_with_rng(grid, palette, delays, SimpleRng::default())
    }
}

impl<R: TileRng> BoardEngine<R> {
    /// Create an engine drawing from `rng` and generate the first board
    pub fn with_rng(config: &EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let palette = config.palette()?;
        let grid = Grid::new(config.rows, config.columns)?;

        let mut engine = Self::from_grid_with_rng(grid, palette, config.delays, rng);
        engine.populate();
        Ok(engine)
    }

    /// Wrap a hand-built grid; `rng` is only used by [`BoardEngine::restart`].
    ///
    /// New instance ids continue after the highest id already on the grid.
    pub fn from_grid_with_rng(grid: Grid, palette: Palette, delays: SettleDelays, rng: R) -> Self {
        let ids = TileIds::after(grid.max_id());
        Self {
            grid,
            palette,
            rng,
            ids,
            delays,
            phase: ResolverPhase::Idle,
            settle_timer_ms: 0,
            marked: Vec::new(),
            events: VecDeque::new(),
            listeners: Vec::new(),
            level: 0,
            stats: EngineStats::default(),
        }
    }

    fn populate(&mut self) {
        let mut created = Vec::with_capacity(self.grid.cells().len());
        generate(
            &mut self.grid,
            &self.palette,
            &mut self.rng,
            &mut self.ids,
            &mut created,
        );
        for ev in created {
            self.emit(ev);
        }
        debug!(level = self.level, grid = %self.grid, "board ready");
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn delays(&self) -> SettleDelays {
        self.delays
    }

    pub fn phase(&self) -> ResolverPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == ResolverPhase::Idle
    }

    /// True while a cascade is in progress (requests are answered with `Busy`)
    pub fn is_busy(&self) -> bool {
        !self.phase.is_at_rest()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == ResolverPhase::Complete
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Remaining settle pause in milliseconds
    pub fn settle_remaining_ms(&self) -> u32 {
        self.settle_timer_ms
    }

    /// Register a listener called synchronously for every subsequent event.
    ///
    /// Events are still queued for [`BoardEngine::poll_event`].
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&BoardEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Take the oldest queued event
    pub fn poll_event(&mut self) -> Option<BoardEvent> {
        self.events.pop_front()
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        self.events.drain(..).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn emit(&mut self, event: BoardEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.events.push_back(event);
    }

    fn enter(&mut self, next: ResolverPhase) {
        debug!(from = self.phase.as_str(), to = next.as_str(), "phase");
        self.phase = next;
    }

    /// Remove the tile at (row, col) and start a cascade.
    ///
    /// Rejections signal `InvalidRequest` or `Busy` and leave the grid untouched.
    /// Requests are never queued.
    pub fn request_remove(&mut self, row: usize, col: usize) -> Result<InstanceId, RemoveError> {
        match self.take_tile(row, col) {
            Ok(tile) => {
                self.stats.removals += 1;
                self.emit(BoardEvent::TileDestroyed { id: tile.id });
                self.enter(ResolverPhase::Dropping);
                Ok(tile.id)
            }
            Err(err) => {
                debug!(row, col, phase = self.phase.as_str(), "remove rejected: {err}");
                self.emit(err.as_event());
                Err(err)
            }
        }
    }

    fn take_tile(&mut self, row: usize, col: usize) -> Result<Tile, RemoveError> {
        if self.is_busy() {
            return Err(RemoveError::Busy);
        }
        let invalid = RemoveError::InvalidRequest { row, col };
        let tile = self
            .grid
            .get(row, col)
            .ok()
            .and_then(|slot| slot.tile())
            .ok_or(invalid)?;
        self.grid.set(row, col, Slot::Empty).map_err(|_| invalid)?;
        Ok(tile)
    }

    /// Run one resolver transition. Returns false at rest.
    fn advance(&mut self) -> bool {
        match self.phase {
            ResolverPhase::Idle | ResolverPhase::Complete => false,
            ResolverPhase::Dropping => {
                let moves = self.grid.apply_gravity();
                let moved = moves.len();
                for m in moves {
                    self.emit(m.into());
                }
                debug!(moved, grid = %self.grid, "after drop");

                self.settle_timer_ms = self.delays.drop_ms;
                self.enter(ResolverPhase::Matching);
                true
            }
            ResolverPhase::Matching => {
                let marked = marked_positions(&self.grid);
                if marked.is_empty() {
                    self.settle();
                    return true;
                }

                for pos in &marked {
                    if let Ok(Slot::Occupied(tile)) = self.grid.get(pos.row, pos.col) {
                        self.emit(BoardEvent::TileMarked { id: tile.id });
                    }
                }
                debug!(marked = marked.len(), "runs found");
                self.marked = marked;

                self.settle_timer_ms = self.delays.highlight_ms;
                self.enter(ResolverPhase::Resolving);
                true
            }
            ResolverPhase::Resolving => {
                let marked = std::mem::take(&mut self.marked);
                for pos in marked {
                    if let Ok(Slot::Occupied(tile)) = self.grid.get(pos.row, pos.col) {
                        if self.grid.set(pos.row, pos.col, Slot::Empty).is_ok() {
                            self.stats.tiles_matched += 1;
                            self.emit(BoardEvent::TileDestroyed { id: tile.id });
                        }
                    }
                }
                self.stats.cascades += 1;
                self.enter(ResolverPhase::Dropping);
                true
            }
        }
    }

    /// No runs left: come to rest and check for an empty board.
    fn settle(&mut self) {
        self.enter(ResolverPhase::Idle);
        if self.grid.is_empty() {
            self.enter(ResolverPhase::Complete);
            info!(level = self.level, stats = ?self.stats, "level complete");
            self.emit(BoardEvent::LevelComplete);
        }
    }

    /// Advance by `elapsed_ms` of wall time.
    ///
    /// Counts down the pending settle pause, then runs transitions until the next
    /// pause is armed or the engine comes to rest. Returns true if any transition
    /// ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_busy() {
            return false;
        }

        if self.settle_timer_ms > 0 {
            self.settle_timer_ms = self.settle_timer_ms.saturating_sub(elapsed_ms);
            if self.settle_timer_ms > 0 {
                return false;
            }
        }

        let mut advanced = false;
        while self.settle_timer_ms == 0 && self.advance() {
            advanced = true;
        }
        advanced
    }

    /// Run the current cascade to rest, skipping settle pauses.
    ///
    /// Returns the number of transitions taken.
    pub fn resolve(&mut self) -> usize {
        let mut steps = 0usize;
        self.settle_timer_ms = 0;
        while self.advance() {
            self.settle_timer_ms = 0;
            steps += 1;
        }
        steps
    }

    /// [`BoardEngine::request_remove`] followed by [`BoardEngine::resolve`]
    pub fn remove_and_resolve(
        &mut self,
        row: usize,
        col: usize,
    ) -> Result<ResolveOutcome, RemoveError> {
        let before = self.stats;
        let removed = self.request_remove(row, col)?;
        self.resolve();
        Ok(ResolveOutcome {
            removed,
            tiles_matched: self.stats.tiles_matched - before.tiles_matched,
            cascades: self.stats.cascades - before.cascades,
            complete: self.is_complete(),
        })
    }

    /// Generate a fresh board for the next level.
    ///
    /// The RNG stream and id allocator continue, so ids stay unique across
    /// levels. Rejected with `Busy` while a cascade is running.
    pub fn restart(&mut self) -> Result<u32, RemoveError> {
        if self.is_busy() {
            self.emit(BoardEvent::Busy);
            return Err(RemoveError::Busy);
        }

        self.level = self.level.wrapping_add(1);
        self.marked.clear();
        self.settle_timer_ms = 0;
        self.enter(ResolverPhase::Idle);
        self.populate();
        info!(level = self.level, "level started");
        Ok(self.level)
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.write_grid(&self.grid);
        out.phase = self.phase;
        out.level = self.level;
        out.complete = self.is_complete();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl<R: TileRng> fmt::Debug for BoardEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardEngine")
            .field("rows", &self.grid.rows())
            .field("columns", &self.grid.columns())
            .field("palette", &self.palette.len())
            .field("phase", &self.phase)
            .field("settle_timer_ms", &self.settle_timer_ms)
            .field("level", &self.level)
            .field("pending_events", &self.events.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
