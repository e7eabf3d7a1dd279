//! Train movement for one block.
//!
//! The passes run in a fixed order over the whole train set:
//!
//! 1. [`recolor`] - trains standing on paint take its colour.
//! 2. [`merge_crossings`] - trains that pass each other mix colours.
//! 3. [`move_trains`] - advance one cell, merge trains that land together,
//!    then resolve every train that has run out of track.
//! 4. [`stranded_on_empty`] - guard checked after new trains spawn.
//!
//! Crashes are reported as data (`MoveOutcome::crashed`), never as errors.
//! Errors only come from a train whose position is off the grid, which means
//! the snapshot itself is corrupt.

use std::hash::Hash;

use im::OrdMap;
use log::{debug, trace, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{mix, Cell, Coordinate, EngineResult, Grid, Train};

use super::arbiter::heading;
use super::ledger::{consume, ColorLedger};
use super::splitter::split;

/// Indices of trains sharing a key, in order of first appearance.
type Group = SmallVec<[usize; 4]>;

/// Result of moving every train one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Trains still active, followed by any splitter children.
    pub trains: Vec<Train>,

    /// Target ledger after this block's arrivals.
    pub targets: ColorLedger,

    /// Whether anything crashed this block.
    pub crashed: bool,
}

/// Group train indices by `key`, keeping first-appearance order of both
/// groups and members.
fn group_by<K, F>(trains: &[Train], key: F) -> Vec<Group>
where
    K: Eq + Hash,
    F: Fn(&Train) -> K,
{
    let mut slots: FxHashMap<K, usize> = FxHashMap::default();
    let mut groups: Vec<Group> = Vec::new();

    for (index, train) in trains.iter().enumerate() {
        let slot = *slots.entry(key(train)).or_insert_with(|| {
            groups.push(Group::new());
            groups.len() - 1
        });
        groups[slot].push(index);
    }

    groups
}

/// Check for a straight crossover: one vertical and one horizontal layer.
fn is_crossover(cell: &Cell) -> bool {
    match cell {
        Cell::Intersection { shape1, shape2 } => {
            shape1.is_straight() && shape2.is_straight() && shape1 != shape2
        }
        _ => false,
    }
}

/// Trains standing on a paint cell take its colour.
pub fn recolor(grid: &Grid, trains: &mut [Train]) -> EngineResult<()> {
    for train in trains.iter_mut() {
        if let Cell::Paint { color, .. } = grid.cell(train.position)? {
            train.color = *color;
        }
    }
    Ok(())
}

/// Mix the colours of trains that cross each other this block.
///
/// Two kinds of group are found before any colour changes:
/// - trains sharing a cell that either pass each other (checked on the first
///   two members) or share a vertical/horizontal crossover;
/// - trains approaching the same inter-cell edge.
///
/// Groups are then applied in order, so a train in both kinds of group
/// carries its first mix into the second.
pub fn merge_crossings(grid: &Grid, trains: &mut [Train]) -> EngineResult<()> {
    let mut crossed = Vec::new();

    for group in group_by(trains, |t| t.position) {
        if group.len() < 2 {
            continue;
        }
        let (first, second) = (&trains[group[0]], &trains[group[1]]);
        if first.passes(second) || is_crossover(grid.cell(first.position)?) {
            crossed.push(group);
        }
    }

    let edges = group_by(trains, Train::edge_key);
    crossed.extend(edges.into_iter().filter(|g| g.len() > 1));

    for group in crossed {
        let colors: SmallVec<[_; 4]> = group.iter().map(|&i| trains[i].color).collect();
        let mixed = mix(&colors);
        let at = trains[group[0]].position;
        trace!("{} trains crossing at {at} mix to {mixed}", group.len());
        for &i in &group {
            trains[i].color = mixed;
        }
    }

    Ok(())
}

/// Advance every train one cell and resolve the ones at the end of their track.
///
/// `flags` are this block's intersection flags (already toggled).
pub fn move_trains(
    grid: &Grid,
    flags: &OrdMap<Coordinate, bool>,
    trains: Vec<Train>,
    targets: &ColorLedger,
) -> EngineResult<MoveOutcome> {
    let mut crashed = false;
    let mut targets = targets.clone();

    // Advance
    let mut moved = Vec::with_capacity(trains.len());
    for mut train in trains {
        let Some(towards) = train.towards else {
            warn!("train at {} has no heading; dropping it", train.position);
            continue;
        };
        let Some(next) = grid.step(train.position, towards) else {
            debug!("train at {} left the grid via {towards}", train.position);
            crashed = true;
            continue;
        };

        train.position = next;
        train.entrance = towards.opposite();
        train.towards = heading(grid, flags, &train)?;
        moved.push(train);
    }

    // Trains arriving in the same cell through the same edge become one
    let mut keep = vec![true; moved.len()];
    for group in group_by(&moved, |t| (t.position, t.entrance)) {
        if group.len() < 2 {
            continue;
        }
        let colors: SmallVec<[_; 4]> = group.iter().map(|&i| moved[i].color).collect();
        let first = group[0];
        moved[first].color = mix(&colors);
        trace!("{} trains merged at {}", group.len(), moved[first].position);
        for &i in &group[1..] {
            keep[i] = false;
        }
    }

    // Resolve trains with nowhere left to go
    let mut survivors = Vec::with_capacity(moved.len());
    let mut children = Vec::new();
    for (train, kept) in moved.into_iter().zip(keep) {
        if !kept {
            continue;
        }
        if train.towards.is_some() {
            survivors.push(train);
            continue;
        }

        let at = train.position;
        match grid.cell(at)? {
            Cell::Target { direction, .. } => {
                if !targets.contains_key(&at) {
                    warn!("target at {at} missing from ledger");
                    crashed = true;
                } else if !direction.accepts(train.entrance) {
                    debug!("train entered target at {at} through {}", train.entrance);
                    crashed = true;
                } else if consume(&mut targets, at, train.color) {
                    debug!("target at {at} accepted {}", train.color);
                } else {
                    debug!("target at {at} does not want {}", train.color);
                    crashed = true;
                }
            }
            Cell::Splitter { direction } => {
                if *direction == train.entrance {
                    children.extend(split(train.color, at, *direction));
                } else {
                    debug!("train entered splitter at {at} through {}", train.entrance);
                    crashed = true;
                }
            }
            other => {
                debug!("train hit a dead end on {} at {at}", other.kind());
                crashed = true;
            }
        }
    }

    survivors.extend(children);
    Ok(MoveOutcome {
        trains: survivors,
        targets,
        crashed,
    })
}

/// Check whether any train is standing on an empty cell.
pub fn stranded_on_empty(grid: &Grid, trains: &[Train]) -> EngineResult<bool> {
    for train in trains {
        if grid.cell(train.position)?.is_empty() {
            debug!("train stranded on empty cell at {}", train.position);
            return Ok(true);
        }
    }
    Ok(false)
}
