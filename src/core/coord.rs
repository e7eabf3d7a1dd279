//! Grid coordinates and cell edges.
//!
//! ## Coordinate
//!
//! Zero-based `{row, col}` position. Rows grow downward, columns grow to the
//! right, so `Edge::Top` is the row above and `Edge::Left` the column before.
//!
//! ## Edge
//!
//! One of the four sides of a cell. Used both as a track endpoint and as a
//! train's entrance/heading.
//!
//! ```
//! use railmix::core::{Coordinate, Edge};
//!
//! let here = Coordinate::new(2, 3);
//! assert_eq!(here.neighbor(Edge::Right), Some(Coordinate::new(2, 4)));
//! assert_eq!(Coordinate::new(0, 0).neighbor(Edge::Top), None);
//! assert_eq!(Edge::Left.opposite(), Edge::Right);
//! ```

use serde::{Deserialize, Serialize};

/// Position of a cell in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The adjacent coordinate across `edge`.
    ///
    /// Returns `None` when stepping would go below row/column zero. The upper
    /// bound is not known here; callers check it against the grid.
    #[must_use]
    pub fn neighbor(self, edge: Edge) -> Option<Self> {
        let (dr, dc) = edge.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Self { row, col })
    }

    /// Key of the inter-cell edge a train at this position heading `towards`
    /// is approaching, in doubled coordinates.
    ///
    /// Doubling turns the half-cell shift into whole numbers: two trains in
    /// neighbouring cells heading at each other produce the same key. With no
    /// heading the key is the cell centre.
    #[must_use]
    pub fn half_edge_key(self, towards: Option<Edge>) -> (isize, isize) {
        let (dr, dc) = towards.map_or((0, 0), Edge::offset);
        (self.row as isize * 2 + dr, self.col as isize * 2 + dc)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One side of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// All edges, clockwise from the top.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// The edge on the other side of the cell.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Right => Edge::Left,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
        }
    }

    /// `(row, col)` step taken when leaving a cell through this edge.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Edge::Top => (-1, 0),
            Edge::Right => (0, 1),
            Edge::Bottom => (1, 0),
            Edge::Left => (0, -1),
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
        };
        f.write_str(name)
    }
}
