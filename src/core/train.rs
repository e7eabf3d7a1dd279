//! Trains moving over the grid.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::coord::{Coordinate, Edge};

/// A train occupying one cell.
///
/// `towards == None` means the train has reached the end of its cell's track
/// and is resolved this block (target, splitter or crash).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Train {
    pub color: Color,

    /// Cell the train is currently on.
    pub position: Coordinate,

    /// Edge the train entered the current cell through.
    pub entrance: Edge,

    /// Edge the train is heading for.
    pub towards: Option<Edge>,
}

impl Train {
    /// Create a new train.
    #[must_use]
    pub const fn new(
        color: Color,
        position: Coordinate,
        entrance: Edge,
        towards: Option<Edge>,
    ) -> Self {
        Self {
            color,
            position,
            entrance,
            towards,
        }
    }

    /// Whether this train and `other` are passing each other in one cell:
    /// each one heads out through the edge the other came in by.
    #[must_use]
    pub fn passes(&self, other: &Train) -> bool {
        other.towards == Some(self.entrance) && self.towards == Some(other.entrance)
    }

    /// Grouping key for trains approaching the same inter-cell edge.
    #[must_use]
    pub fn edge_key(&self) -> (isize, isize) {
        self.position.half_edge_key(self.towards)
    }
}
