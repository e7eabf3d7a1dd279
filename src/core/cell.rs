//! Grid cell variants.
//!
//! The serde layout matches the level and solution files:
//! an internally tagged `"type"` field plus the variant's fields, e.g.
//! `{"type": "Track", "direction": "top-left"}`.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::coord::Edge;
use super::track::TrackShape;

/// Edge or edges a target accepts trains through.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetDirection {
    One(Edge),
    Many(Vec<Edge>),
}

impl TargetDirection {
    /// Check whether a train entering through `edge` is accepted.
    #[must_use]
    pub fn accepts(&self, edge: Edge) -> bool {
        match self {
            TargetDirection::One(e) => *e == edge,
            TargetDirection::Many(edges) => edges.contains(&edge),
        }
    }
}

impl From<Edge> for TargetDirection {
    fn from(edge: Edge) -> Self {
        TargetDirection::One(edge)
    }
}

/// One cell of the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Cell {
    #[default]
    Empty,

    /// Inert obstacle.
    Rock,

    Track {
        #[serde(rename = "direction")]
        shape: TrackShape,
    },

    /// Two independent track layers sharing one cell.
    Intersection {
        #[serde(rename = "track1")]
        shape1: TrackShape,
        #[serde(rename = "track2")]
        shape2: TrackShape,
    },

    /// Emits `queue` one train per block, heading towards `direction`.
    Source {
        direction: Edge,
        #[serde(rename = "trains")]
        queue: Vec<Color>,
    },

    /// Consumes trains of the listed colours arriving through `direction`.
    Target {
        direction: TargetDirection,
        #[serde(rename = "trains")]
        remaining: Vec<Color>,
    },

    /// Track that recolours any train standing on it.
    Paint {
        #[serde(rename = "direction")]
        shape: TrackShape,
        color: Color,
    },

    /// Splits a train entering through `direction` into two.
    Splitter { direction: Edge },
}

impl Cell {
    /// Plain track cell.
    #[must_use]
    pub const fn track(shape: TrackShape) -> Self {
        Cell::Track { shape }
    }

    /// Intersection with `shape1` as the back layer and `shape2` as the front.
    #[must_use]
    pub const fn intersection(shape1: TrackShape, shape2: TrackShape) -> Self {
        Cell::Intersection { shape1, shape2 }
    }

    /// Source emitting `queue` in order.
    pub fn source(direction: Edge, queue: impl Into<Vec<Color>>) -> Self {
        Cell::Source {
            direction,
            queue: queue.into(),
        }
    }

    /// Target owed `remaining`.
    pub fn target(
        direction: impl Into<TargetDirection>,
        remaining: impl Into<Vec<Color>>,
    ) -> Self {
        Cell::Target {
            direction: direction.into(),
            remaining: remaining.into(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// True for cells that belong to the player's drawn geometry.
    #[must_use]
    pub const fn is_track_geometry(&self) -> bool {
        matches!(self, Cell::Track { .. } | Cell::Intersection { .. })
    }

    /// Variant name, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Cell::Empty => "Empty",
            Cell::Rock => "Rock",
            Cell::Track { .. } => "Track",
            Cell::Intersection { .. } => "Intersection",
            Cell::Source { .. } => "Source",
            Cell::Target { .. } => "Target",
            Cell::Paint { .. } => "Paint",
            Cell::Splitter { .. } => "Splitter",
        }
    }
}
