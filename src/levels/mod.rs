//! Level construction and persisted solutions.
//!
//! The catalog holds level definitions by name; solutions hold the track a
//! player drew on one of them.

pub mod catalog;
pub mod solution;

pub use catalog::{build_game, CellDefinition, LevelCatalog, Puzzle, PuzzleGroup};
pub use solution::{Solution, SolutionStore};
