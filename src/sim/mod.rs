//! Block-by-block simulation: snapshots and the per-block passes.
//!
//! Everything here is a pure function of the grid and the previous
//! snapshot. The `engine` module sequences the passes and owns the clock.

pub mod arbiter;
pub mod ledger;
pub mod mover;
pub mod splitter;
pub mod state;

pub use arbiter::{cell_exit, heading, toggle_flags};
pub use ledger::{consume, is_complete, produce, ColorLedger};
pub use mover::{merge_crossings, move_trains, recolor, stranded_on_empty, MoveOutcome};
pub use splitter::{split, split_color, split_directions};
pub use state::{GameState, RunState};
