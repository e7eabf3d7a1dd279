//! The simulation engine.
//!
//! ## Lifecycle
//!
//! `start` resets to a fresh `Running` snapshot and arms the clock. While
//! running, [`Game::poll`] executes a block whenever one is due. `stop`
//! disarms the clock and leaves the last snapshot in place. Both are
//! idempotent; [`Game::session`] ties `stop` to a scope.
//!
//! ## Edits
//!
//! A `Game` never changes its grid. [`Game::draw_track`] and
//! [`Game::replace_cell`] return a new, stopped engine for the edited grid
//! with the same level name and cadence. Observers are not carried over.

use std::ops::{Deref, DerefMut};

use log::{debug, info};

use crate::core::{
    Cell, Coordinate, Edge, EngineConfig, EngineResult, Grid, TrackShape, Train,
    DEFAULT_TICKS_PER_BLOCK,
};
use crate::sim::{
    is_complete, merge_crossings, move_trains, produce, recolor, stranded_on_empty, toggle_flags,
    ColorLedger, GameState, MoveOutcome, RunState,
};

use super::clock::is_due;
use super::observer::{ObserverId, ObserverRegistry, TickObserver};

/// A puzzle grid plus the snapshot of its current run.
#[derive(Debug)]
pub struct Game {
    // === Definition ===
    level: String,
    grid: Grid,

    // === Clock ===
    /// Milliseconds between blocks. Read at every poll.
    ticks_per_block: u64,
    running: bool,

    // === Run ===
    state: GameState,
    observers: ObserverRegistry,
}

impl Game {
    /// Create a stopped engine with the default cadence.
    #[must_use]
    pub fn new(level: impl Into<String>, grid: Grid) -> Self {
        Self::with_ticks_per_block(level, grid, DEFAULT_TICKS_PER_BLOCK)
    }

    /// Create a stopped engine using the cadence from `config`.
    #[must_use]
    pub fn with_config(level: impl Into<String>, grid: Grid, config: &EngineConfig) -> Self {
        Self::with_ticks_per_block(level, grid, config.ticks_per_block)
    }

    /// Create a stopped engine with an explicit cadence.
    #[must_use]
    pub fn with_ticks_per_block(
        level: impl Into<String>,
        grid: Grid,
        ticks_per_block: u64,
    ) -> Self {
        Self {
            level: level.into(),
            grid,
            ticks_per_block,
            running: false,
            state: GameState::default(),
            observers: ObserverRegistry::new(),
        }
    }

    /// Create a stopped engine from rows of cells.
    pub fn from_rows(level: impl Into<String>, rows: Vec<Vec<Cell>>) -> EngineResult<Self> {
        Ok(Self::new(level, Grid::from_rows(rows)?))
    }

    // === Accessors ===

    #[must_use]
    pub fn level(&self) -> &str {
        &self.level
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Latest snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    #[must_use]
    pub fn ticks_per_block(&self) -> u64 {
        self.ticks_per_block
    }

    /// Change the cadence. Takes effect at the next poll, even mid-wait.
    pub fn set_ticks_per_block(&mut self, ms: u64) {
        self.ticks_per_block = ms;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    // === Observers ===

    /// Register an observer for every executed block.
    pub fn subscribe(&mut self, observer: impl TickObserver + 'static) -> ObserverId {
        self.observers.add(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    // === Lifecycle ===

    /// Reset to a fresh `Running` snapshot and arm the clock.
    pub fn start(&mut self) {
        self.state = GameState::initial(&self.grid);
        self.running = true;
        info!(
            "starting '{}' ({}x{}, {} ms per block)",
            self.level,
            self.grid.height(),
            self.grid.width(),
            self.ticks_per_block
        );
    }

    /// Disarm the clock. Safe to call when not running.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!(
                "stopped '{}' after {} blocks ({})",
                self.level, self.state.block, self.state.run_state
            );
        }
    }

    /// Start and return a guard that stops the engine when dropped.
    pub fn session(&mut self) -> Session<'_> {
        self.start();
        Session { game: self }
    }

    /// Execute a block if the engine is running and one is due at `now_ms`.
    ///
    /// Returns the new snapshot when a block ran.
    pub fn poll(&mut self, now_ms: u64) -> EngineResult<Option<&GameState>> {
        if !self.running {
            return Ok(None);
        }
        let (block, last) = (self.state.block, self.state.tick_timestamp);
        if !is_due(block, last, now_ms, self.ticks_per_block) {
            return Ok(None);
        }
        self.advance(now_ms).map(Some)
    }

    /// Execute one block now, ignoring the clock.
    ///
    /// The block keeps the previous timestamp.
    pub fn step(&mut self) -> EngineResult<&GameState> {
        self.advance(self.state.tick_timestamp)
    }

    /// Execute one block stamped with `now_ms`.
    ///
    /// Fails only if the current snapshot places a train outside the grid.
    pub fn advance(&mut self, now_ms: u64) -> EngineResult<&GameState> {
        let grid = &self.grid;
        let previous = &self.state;

        let positions = previous.trains.iter().map(|t| t.position);
        let flags = toggle_flags(grid, positions, &previous.intersection_flags)?;

        let mut trains: Vec<Train> = previous.trains.iter().copied().collect();
        recolor(grid, &mut trains)?;
        merge_crossings(grid, &mut trains)?;

        let MoveOutcome {
            mut trains,
            targets,
            mut crashed,
        } = move_trains(grid, &flags, trains, &previous.target_remaining)?;
        let sources = produce(grid, &previous.source_remaining, &mut trains);

        if stranded_on_empty(grid, &trains)? {
            crashed = true;
        }

        let run_state = next_run_state(previous.run_state, crashed, &trains, &targets);
        let block = previous.block + 1;
        if run_state != previous.run_state {
            info!("'{}' {} at block {block}", self.level, run_state);
        }
        debug!("block {block}: {} trains, {run_state}", trains.len());

        self.state = GameState {
            run_state,
            tick_timestamp: now_ms,
            block,
            trains: trains.into_iter().collect(),
            intersection_flags: flags,
            target_remaining: targets,
            source_remaining: sources,
        };
        self.observers.notify(&self.state);

        Ok(&self.state)
    }

    // === Edits ===

    /// Draw a segment from `enter` to `exit` on the cell at `at`.
    ///
    /// - empty cell: becomes track;
    /// - track of another shape: becomes an intersection with the new shape in front;
    /// - intersection whose back layer matches: the layers swap;
    /// - intersection whose front layer matches: the back layer is removed.
    ///
    /// Returns `None` if the edges are equal, the cell is off the grid, or
    /// nothing changes.
    #[must_use]
    pub fn draw_track(&self, at: Coordinate, enter: Edge, exit: Edge) -> Option<Game> {
        let shape = TrackShape::from_edges(enter, exit)?;

        let edited = match self.grid.get(at)? {
            Cell::Empty => Cell::track(shape),
            Cell::Track { shape: existing } if *existing != shape => {
                Cell::intersection(*existing, shape)
            }
            Cell::Intersection { shape1, shape2 } if *shape1 == shape => {
                Cell::intersection(*shape2, *shape1)
            }
            Cell::Intersection { shape2, .. } if *shape2 == shape => Cell::track(*shape2),
            _ => return None,
        };

        self.replace_cell(at, edited)
    }

    /// New engine with the cell at `at` replaced. `None` if `at` is off the grid.
    #[must_use]
    pub fn replace_cell(&self, at: Coordinate, cell: Cell) -> Option<Game> {
        let grid = self.grid.with_cell(at, cell).ok()?;
        let edited = Self::with_ticks_per_block(self.level.clone(), grid, self.ticks_per_block);
        Some(edited)
    }
}

/// Run state after a block. Terminal states never change.
fn next_run_state(
    previous: RunState,
    crashed: bool,
    trains: &[Train],
    targets: &ColorLedger,
) -> RunState {
    if previous.is_terminal() {
        previous
    } else if crashed {
        RunState::Crashed
    } else if is_complete(trains, targets) {
        RunState::Complete
    } else {
        RunState::Running
    }
}

/// Running engine that stops when dropped.
#[derive(Debug)]
pub struct Session<'a> {
    game: &'a mut Game,
}

impl Deref for Session<'_> {
    type Target = Game;

    fn deref(&self) -> &Game {
        self.game
    }
}

impl DerefMut for Session<'_> {
    fn deref_mut(&mut self) -> &mut Game {
        self.game
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.game.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn h() -> Cell {
        Cell::track(TrackShape::Horizontal)
    }

    /// Red source feeding a red target two cells to the right.
    fn red_line() -> Game {
        let row = vec![
            Cell::source(Edge::Right, [Color::Red]),
            h(),
            h(),
            Cell::target(Edge::Left, [Color::Red]),
        ];
        Game::from_rows("red line", vec![row]).unwrap()
    }

    fn run(game: &mut Game, blocks: usize) -> RunState {
        for _ in 0..blocks {
            if game.step().unwrap().run_state.is_terminal() {
                break;
            }
        }
        game.run_state()
    }

    #[test]
    fn test_new_is_stopped() {
        let game = red_line();
        assert!(!game.is_running());
        assert_eq!(game.ticks_per_block(), 500);
        assert_eq!(game.level(), "red line");
        assert_eq!(game.state().block, 0);
    }

    #[test]
    fn test_red_line_completes() {
        let mut game = red_line();
        game.start();
        assert_eq!(run(&mut game, 20), RunState::Complete);
        assert!(game.state().trains.is_empty());
        assert!(game.state().targets_satisfied());
    }

    #[test]
    fn test_first_block_spawns() {
        let mut game = red_line();
        game.start();
        let state = game.step().unwrap();
        assert_eq!(state.block, 1);
        assert_eq!(state.trains.len(), 1);
        assert_eq!(state.trains[0].position, Coordinate::new(0, 0));
        let queued = state.source_remaining_at(Coordinate::new(0, 0));
        assert_eq!(queued.map(|q| q.len()), Some(0));
    }

    #[test]
    fn test_wrong_color_crashes() {
        let row = vec![
            Cell::source(Edge::Right, [Color::Blue]),
            h(),
            Cell::target(Edge::Left, [Color::Red]),
        ];
        let mut game = Game::from_rows("mismatch", vec![row]).unwrap();
        game.start();
        assert_eq!(run(&mut game, 20), RunState::Crashed);
    }

    #[test]
    fn test_terminal_state_is_sticky() {
        let mut game = red_line();
        game.start();
        run(&mut game, 20);
        for _ in 0..5 {
            game.step().unwrap();
        }
        assert_eq!(game.run_state(), RunState::Complete);
    }

    #[test]
    fn test_poll_respects_cadence() {
        let mut game = red_line();
        game.set_ticks_per_block(100);
        assert!(game.poll(0).unwrap().is_none());

        game.start();
        assert!(game.poll(1_000).unwrap().is_some());
        assert!(game.poll(1_050).unwrap().is_none());
        assert!(game.poll(1_100).unwrap().is_none());
        assert_eq!(game.poll(1_101).unwrap().map(|s| s.block), Some(2));
        assert_eq!(game.state().tick_timestamp, 1_101);
    }

    #[test]
    fn test_start_resets() {
        let mut game = red_line();
        game.start();
        run(&mut game, 20);
        game.stop();
        assert_eq!(game.run_state(), RunState::Complete);

        game.start();
        assert_eq!(game.run_state(), RunState::Running);
        assert_eq!(game.state().block, 0);
        assert!(game.state().trains.is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut game = red_line();
        game.stop();
        game.start();
        game.stop();
        game.stop();
        assert!(!game.is_running());
        assert!(game.poll(10_000).unwrap().is_none());
    }

    #[test]
    fn test_session_stops_on_drop() {
        let mut game = red_line();
        {
            let mut session = game.session();
            assert!(session.is_running());
            session.poll(0).unwrap();
        }
        assert!(!game.is_running());
        assert_eq!(game.state().block, 1);
    }

    #[test]
    fn test_observers_see_every_block() {
        let mut game = red_line();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let observer = move |state: &GameState| sink.borrow_mut().push(state.block);
        let id = game.subscribe(observer);

        game.start();
        game.step().unwrap();
        game.step().unwrap();
        assert!(game.unsubscribe(id));
        game.step().unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_draw_track_on_empty() {
        let game = Game::new("blank", Grid::empty(2, 2).unwrap());
        let at = Coordinate::new(1, 1);

        let drawn = game.draw_track(at, Edge::Left, Edge::Top).unwrap();
        let corner = Cell::track(TrackShape::TopLeft);
        assert_eq!(drawn.grid().get(at), Some(&corner));
        assert!(game.draw_track(at, Edge::Left, Edge::Left).is_none());
        let outside = Coordinate::new(5, 5);
        assert!(game.draw_track(outside, Edge::Left, Edge::Top).is_none());
    }

    #[test]
    fn test_draw_track_layers() {
        let at = Coordinate::new(0, 0);
        let game = Game::new("blank", Grid::empty(1, 1).unwrap());

        let track = game.draw_track(at, Edge::Left, Edge::Right).unwrap();
        assert!(track.draw_track(at, Edge::Right, Edge::Left).is_none());

        let crossed = track.draw_track(at, Edge::Top, Edge::Bottom).unwrap();
        let h_behind = Cell::intersection(TrackShape::Horizontal, TrackShape::Vertical);
        assert_eq!(crossed.grid().get(at), Some(&h_behind));

        // Drawing the back layer brings it to the front
        let swapped = crossed.draw_track(at, Edge::Left, Edge::Right).unwrap();
        let h_in_front = Cell::intersection(TrackShape::Vertical, TrackShape::Horizontal);
        assert_eq!(swapped.grid().get(at), Some(&h_in_front));

        // Drawing the front layer again removes the back one
        let removed = swapped.draw_track(at, Edge::Left, Edge::Right).unwrap();
        assert_eq!(removed.grid().get(at), Some(&h()));

        assert!(crossed.draw_track(at, Edge::Top, Edge::Left).is_none());
    }

    #[test]
    fn test_draw_track_on_fixed_cell() {
        let game = Game::new("rocky", Grid::from_rows(vec![vec![Cell::Rock]]).unwrap());
        let at = Coordinate::new(0, 0);
        assert!(game.draw_track(at, Edge::Left, Edge::Right).is_none());
    }

    #[test]
    fn test_replace_cell_keeps_settings() {
        let mut game = red_line();
        game.set_ticks_per_block(7);
        game.subscribe(|_: &GameState| {});
        game.start();

        let at = Coordinate::new(0, 1);
        let edited = game.replace_cell(at, Cell::Rock).unwrap();
        assert_eq!(edited.level(), "red line");
        assert_eq!(edited.ticks_per_block(), 7);
        assert!(!edited.is_running());
        assert_eq!(edited.grid().get(at), Some(&Cell::Rock));
        assert_eq!(game.grid().get(at), Some(&h()));

        let outside = Coordinate::new(3, 0);
        assert!(game.replace_cell(outside, Cell::Rock).is_none());
    }

    #[test]
    fn test_corrupt_snapshot_fails() {
        let mut game = red_line();
        game.start();
        let lost = Train::new(Color::Red, Coordinate::new(9, 9), Edge::Left, None);
        game.state.trains.push_back(lost);
        assert!(game.step().is_err());
    }
}
