//! Source and target bookkeeping.
//!
//! Sources emit their queue one train per block, head first. Targets hold
//! the colours still owed; a correct arrival removes the first matching
//! entry. Neither ledger is ever refilled during a run.

use im::{OrdMap, Vector};
use log::debug;

use crate::core::{Cell, Color, Coordinate, Grid, Train};

/// Per-coordinate colour ledger.
pub type ColorLedger = OrdMap<Coordinate, Vector<Color>>;

/// Spawn one train from every source with a non-empty queue.
///
/// New trains are appended to `trains` in row-major source order. Returns
/// the updated source ledger.
pub fn produce(grid: &Grid, sources: &ColorLedger, trains: &mut Vec<Train>) -> ColorLedger {
    let mut next = sources.clone();

    for (coord, cell) in grid.iter() {
        let Cell::Source { direction, .. } = cell else {
            continue;
        };
        let Some(queue) = next.get_mut(&coord) else {
            continue;
        };
        if let Some(color) = queue.pop_front() {
            debug!("source {coord} emits {color} towards {direction}");
            let entrance = direction.opposite();
            trains.push(Train::new(color, coord, entrance, Some(*direction)));
        }
    }

    next
}

/// Remove one `color` from the target at `coord`.
///
/// Returns `false` when the target is not in the ledger or no matching
/// colour is left.
pub fn consume(targets: &mut ColorLedger, coord: Coordinate, color: Color) -> bool {
    let Some(remaining) = targets.get_mut(&coord) else {
        return false;
    };
    match remaining.index_of(&color) {
        Some(index) => {
            remaining.remove(index);
            true
        }
        None => false,
    }
}

/// Check whether the run has delivered everything.
#[must_use]
pub fn is_complete(trains: &[Train], targets: &ColorLedger) -> bool {
    trains.is_empty() && targets.values().all(Vector::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Edge;
    use crate::sim::GameState;

    fn two_source_grid() -> Grid {
        let red_yellow = Cell::source(Edge::Bottom, [Color::Red, Color::Yellow]);
        Grid::from_rows(vec![
            vec![red_yellow, Cell::Empty],
            vec![Cell::Empty, Cell::source(Edge::Left, [Color::Blue])],
        ])
        .unwrap()
    }

    #[test]
    fn test_produce_one_per_source() {
        let grid = two_source_grid();
        let state = GameState::initial(&grid);
        let mut trains = Vec::new();

        let sources = produce(&grid, &state.source_remaining, &mut trains);

        let (first, second) = (Coordinate::new(0, 0), Coordinate::new(1, 1));
        let down = Train::new(Color::Red, first, Edge::Top, Some(Edge::Bottom));
        let left = Train::new(Color::Blue, second, Edge::Right, Some(Edge::Left));
        assert_eq!(trains, vec![down, left]);
        assert_eq!(sources[&first], Vector::from(vec![Color::Yellow]));
        assert!(sources[&second].is_empty());
    }

    #[test]
    fn test_produce_exhausted() {
        let grid = two_source_grid();
        let mut sources = GameState::initial(&grid).source_remaining;
        let mut trains = Vec::new();

        for _ in 0..5 {
            sources = produce(&grid, &sources, &mut trains);
        }
        assert_eq!(trains.len(), 3);
        assert!(sources.values().all(Vector::is_empty));
    }

    #[test]
    fn test_produce_without_ledger() {
        // Before start the ledger is empty and nothing spawns
        let grid = two_source_grid();
        let mut trains = Vec::new();
        produce(&grid, &OrdMap::new(), &mut trains);
        assert!(trains.is_empty());
    }

    #[test]
    fn test_consume_first_match() {
        let at = Coordinate::new(2, 2);
        let owed = Vector::from(vec![Color::Red, Color::Blue, Color::Red]);
        let mut targets = OrdMap::unit(at, owed);

        assert!(consume(&mut targets, at, Color::Red));
        assert_eq!(targets[&at], Vector::from(vec![Color::Blue, Color::Red]));

        assert!(!consume(&mut targets, at, Color::Green));
        assert!(!consume(&mut targets, Coordinate::new(0, 0), Color::Red));
    }

    #[test]
    fn test_is_complete() {
        let at = Coordinate::new(0, 0);
        let mut targets = OrdMap::unit(at, Vector::from(vec![Color::Red]));
        assert!(!is_complete(&[], &targets));

        consume(&mut targets, at, Color::Red);
        assert!(is_complete(&[], &targets));

        let train = Train::new(Color::Red, at, Edge::Left, Some(Edge::Right));
        assert!(!is_complete(&[train], &targets));
    }
}
