//! Splitter transform.
//!
//! A train entering a splitter through its fixed edge leaves as two trains.
//! Secondary colours separate into their primaries; everything else is
//! duplicated. The two children leave sideways relative to the entrance,
//! index-aligned with the colour pair.

use smallvec::SmallVec;

use crate::core::{Color, Coordinate, Edge, Train};

/// Colours of the two trains a splitter produces from `color`.
#[must_use]
pub const fn split_color(color: Color) -> (Color, Color) {
    match color {
        Color::Purple => (Color::Red, Color::Blue),
        Color::Orange => (Color::Red, Color::Yellow),
        Color::Green => (Color::Yellow, Color::Blue),
        other => (other, other),
    }
}

/// Exit edges of the two children for a splitter fed through `direction`.
#[must_use]
pub const fn split_directions(direction: Edge) -> (Edge, Edge) {
    match direction {
        Edge::Top => (Edge::Left, Edge::Right),
        Edge::Bottom => (Edge::Right, Edge::Left),
        Edge::Left => (Edge::Bottom, Edge::Top),
        Edge::Right => (Edge::Top, Edge::Bottom),
    }
}

/// The two trains produced when `color` enters the splitter at `position`
/// fed through `direction`.
#[must_use]
pub fn split(color: Color, position: Coordinate, direction: Edge) -> SmallVec<[Train; 2]> {
    let (c0, c1) = split_color(color);
    let (d0, d1) = split_directions(direction);

    SmallVec::from_buf([
        Train::new(c0, position, direction, Some(d0)),
        Train::new(c1, position, direction, Some(d1)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_color_table() {
        assert_eq!(split_color(Color::Purple), (Color::Red, Color::Blue));
        assert_eq!(split_color(Color::Orange), (Color::Red, Color::Yellow));
        assert_eq!(split_color(Color::Green), (Color::Yellow, Color::Blue));
        assert_eq!(split_color(Color::Red), (Color::Red, Color::Red));
        assert_eq!(split_color(Color::Brown), (Color::Brown, Color::Brown));
    }

    #[test]
    fn test_split_directions_are_perpendicular() {
        for edge in Edge::ALL {
            let (a, b) = split_directions(edge);
            assert_eq!(a.opposite(), b);
            assert_ne!(a, edge);
            assert_ne!(a, edge.opposite());
        }
    }

    #[test]
    fn test_split_purple_from_top() {
        let at = Coordinate::new(3, 3);
        let trains = split(Color::Purple, at, Edge::Top);

        assert_eq!(trains.len(), 2);
        let left = Train::new(Color::Red, at, Edge::Top, Some(Edge::Left));
        let right = Train::new(Color::Blue, at, Edge::Top, Some(Edge::Right));
        assert_eq!(trains.to_vec(), vec![left, right]);
    }

    #[test]
    fn test_split_primary_duplicates() {
        let at = Coordinate::new(0, 0);
        let trains = split(Color::Red, at, Edge::Top);

        assert_eq!(trains[0].color, Color::Red);
        assert_eq!(trains[0].towards, Some(Edge::Left));
        assert_eq!(trains[1].color, Color::Red);
        assert_eq!(trains[1].towards, Some(Edge::Right));
    }

    #[test]
    fn test_split_from_bottom() {
        let trains = split(Color::Green, Coordinate::new(3, 3), Edge::Bottom);
        assert_eq!(trains[0].color, Color::Yellow);
        assert_eq!(trains[0].towards, Some(Edge::Right));
        assert_eq!(trains[1].color, Color::Blue);
        assert_eq!(trains[1].towards, Some(Edge::Left));
        assert!(trains.iter().all(|t| t.entrance == Edge::Bottom));
    }
}
