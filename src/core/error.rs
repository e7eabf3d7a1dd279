//! Engine errors.
//!
//! These cover broken construction input and corrupted snapshots only.
//! Crashes, dead ends and colour mismatches are simulation results and show
//! up as `RunState::Crashed`, never as an error.

use thiserror::Error;

use super::coord::Coordinate;

/// Errors emitted by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A grid needs at least one row and one column.
    #[error("grid must be at least 1x1")]
    EmptyGrid,

    /// A row has a different length from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A decoded grid's cell list does not match its dimensions.
    #[error("grid of {height}x{width} carries {found} cells")]
    CellCount {
        height: usize,
        width: usize,
        found: usize,
    },

    /// The cell count of a grid does not fit in memory.
    #[error("grid of {height}x{width} is too large")]
    GridTooLarge { height: usize, width: usize },

    /// A coordinate lies outside the grid.
    #[error("coordinate {coord} is outside the grid")]
    OutOfBounds { coord: Coordinate },

    /// A solution refers to a level the catalog does not contain.
    #[error("unknown level '{0}'")]
    UnknownLevel(String),

    #[error("invalid solution json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid snapshot encoding: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
