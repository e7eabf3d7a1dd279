//! # railmix
//!
//! A deterministic, block-by-block simulation engine for colour-mixing
//! train puzzles.
//!
//! ## Design Principles
//!
//! 1. **Immutable snapshots**: every block produces a new `GameState`. The
//!    grid itself never changes; edits yield a new `Game`.
//!
//! 2. **Crashes are data**: dead ends, wrong colours and off-grid exits end
//!    in `RunState::Crashed`. Errors are reserved for corrupted snapshots
//!    and bad input.
//!
//! 3. **Time from outside**: the engine never reads a clock on its own.
//!    Callers poll it with the current time, or use the blocking driver.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im-rs`, so
//!   every observer gets its own copy for free.
//!
//! - **Coordinate-keyed bookkeeping**: intersection flags and the
//!   source/target ledgers are keyed by cell position.
//!
//! ## Modules
//!
//! - `core`: Coordinates, track shapes, colours, cells, grids, trains, config, errors
//! - `sim`: Snapshots and the per-block passes (arbiter, mover, splitter, ledger)
//! - `engine`: The clocked `Game`, observers and the blocking driver
//! - `levels`: Level catalog and persisted solutions
//!
//! ## Example
//!
//! ```
//! use railmix::{Cell, Color, Edge, Game, RunState, TrackShape};
//!
//! let mut game = Game::from_rows("line", vec![vec![
//!     Cell::source(Edge::Right, [Color::Red]),
//!     Cell::track(TrackShape::Horizontal),
//!     Cell::target(Edge::Left, [Color::Red]),
//! ]]).unwrap();
//!
//! game.start();
//! while !game.step().unwrap().run_state.is_terminal() {}
//! assert_eq!(game.run_state(), RunState::Complete);
//! ```

pub mod core;
pub mod engine;
pub mod levels;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    mix, resolve, Cell, Color, Coordinate, Edge, EngineConfig, EngineError, EngineResult, Grid,
    TargetDirection, TrackShape, Train,
};
pub use crate::engine::{
    run_until_settled, ChannelObserver, Clock, Game, ManualClock, ObserverId, Session, SystemClock,
    TickObserver,
};
pub use crate::levels::{
    build_game, CellDefinition, LevelCatalog, Puzzle, PuzzleGroup, Solution, SolutionStore,
};
pub use crate::sim::{GameState, RunState};
