//! Track shapes and the track resolver.
//!
//! Every shape joins exactly two edges of a cell. A train entering through one
//! of them leaves through the other; entering anywhere else is a dead end.

use serde::{Deserialize, Serialize};

use super::coord::Edge;

/// Path geometry inside a `Track`, `Paint` or one layer of an `Intersection`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackShape {
    Horizontal,
    Vertical,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl TrackShape {
    /// All six shapes.
    pub const ALL: [TrackShape; 6] = [
        TrackShape::Horizontal,
        TrackShape::Vertical,
        TrackShape::TopLeft,
        TrackShape::TopRight,
        TrackShape::BottomLeft,
        TrackShape::BottomRight,
    ];

    /// The two edges this shape connects.
    #[must_use]
    pub const fn ends(self) -> (Edge, Edge) {
        match self {
            TrackShape::Horizontal => (Edge::Left, Edge::Right),
            TrackShape::Vertical => (Edge::Top, Edge::Bottom),
            TrackShape::TopLeft => (Edge::Top, Edge::Left),
            TrackShape::TopRight => (Edge::Top, Edge::Right),
            TrackShape::BottomLeft => (Edge::Bottom, Edge::Left),
            TrackShape::BottomRight => (Edge::Bottom, Edge::Right),
        }
    }

    /// Shape joining two distinct edges, in either order.
    ///
    /// Returns `None` when both edges are the same.
    ///
    /// ```
    /// use railmix::core::{Edge, TrackShape};
    ///
    /// assert_eq!(TrackShape::from_edges(Edge::Right, Edge::Top), Some(TrackShape::TopRight));
    /// assert_eq!(TrackShape::from_edges(Edge::Left, Edge::Left), None);
    /// ```
    #[must_use]
    pub fn from_edges(a: Edge, b: Edge) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| {
            let (x, y) = shape.ends();
            (x == a && y == b) || (x == b && y == a)
        })
    }

    /// True for the two straight shapes.
    #[must_use]
    pub const fn is_straight(self) -> bool {
        matches!(self, TrackShape::Horizontal | TrackShape::Vertical)
    }
}

/// Exit edge for a train entering `shape` through `entrance`, if any.
#[must_use]
pub fn resolve(shape: TrackShape, entrance: Edge) -> Option<Edge> {
    let (a, b) = shape.ends();
    if entrance == a {
        Some(b)
    } else if entrance == b {
        Some(a)
    } else {
        None
    }
}

impl std::fmt::Display for TrackShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TrackShape::Horizontal => "horizontal",
            TrackShape::Vertical => "vertical",
            TrackShape::TopLeft => "top-left",
            TrackShape::TopRight => "top-right",
            TrackShape::BottomLeft => "bottom-left",
            TrackShape::BottomRight => "bottom-right",
        };
        f.write_str(name)
    }
}
