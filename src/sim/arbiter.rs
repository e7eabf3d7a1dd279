//! Intersection priority and exit resolution.
//!
//! Each intersection carries one boolean flag. At the start of a block the
//! flag flips once for every train standing on the intersection, so two
//! simultaneous occupants cancel out. When a train resolves its exit inside
//! an intersection, a set flag tries the back layer (`shape1`) first and a
//! clear flag tries the front layer (`shape2`) first.

use im::OrdMap;
use log::trace;

use crate::core::{resolve, Cell, Coordinate, Edge, EngineResult, Grid, Train};

/// Flip the flag of every intersection once per train standing on it.
///
/// `trains` are the positions before this block's movement.
pub fn toggle_flags(
    grid: &Grid,
    trains: impl IntoIterator<Item = Coordinate>,
    flags: &OrdMap<Coordinate, bool>,
) -> EngineResult<OrdMap<Coordinate, bool>> {
    let mut next = flags.clone();
    for position in trains {
        if let Cell::Intersection { .. } = grid.cell(position)? {
            let flipped = !next.get(&position).copied().unwrap_or(false);
            trace!("intersection {position} priority -> {flipped}");
            next.insert(position, flipped);
        }
    }
    Ok(next)
}

/// Exit edge of `cell` for a train entering through `entrance`.
///
/// `flag` is the cell's intersection priority; other cells ignore it.
/// Anything other than track, paint or an intersection has no exit.
#[must_use]
pub fn cell_exit(cell: &Cell, entrance: Edge, flag: bool) -> Option<Edge> {
    match cell {
        Cell::Track { shape } | Cell::Paint { shape, .. } => resolve(*shape, entrance),
        Cell::Intersection { shape1, shape2 } => {
            let (first, second) = if flag {
                (*shape1, *shape2)
            } else {
                (*shape2, *shape1)
            };
            resolve(first, entrance).or_else(|| resolve(second, entrance))
        }
        Cell::Empty
        | Cell::Rock
        | Cell::Source { .. }
        | Cell::Target { .. }
        | Cell::Splitter { .. } => None,
    }
}

/// Heading for `train` on its current cell, using this block's flags.
pub fn heading(
    grid: &Grid,
    flags: &OrdMap<Coordinate, bool>,
    train: &Train,
) -> EngineResult<Option<Edge>> {
    let cell = grid.cell(train.position)?;
    let flag = flags.get(&train.position).copied().unwrap_or(false);
    Ok(cell_exit(cell, train.entrance, flag))
}
