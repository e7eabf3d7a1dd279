//! Immutable per-block snapshots.
//!
//! ## RunState
//!
//! `Running` until the first crash or until every train has arrived.
//! `Crashed` and `Complete` are terminal: once entered, later blocks keep
//! reporting the same value.
//!
//! ## GameState
//!
//! Everything that changes while the simulation runs: trains, intersection
//! priority flags and the source/target ledgers. Bookkeeping is keyed by the
//! `Coordinate` of the owning cell.
//!
//! Uses `im` persistent collections so handing a snapshot to every observer
//! is O(1). A snapshot is replaced wholesale each block, never patched.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::core::{Cell, Color, Coordinate, EngineResult, Grid, Train};

/// Outcome of a run so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Running,
    Crashed,
    Complete,
}

impl RunState {
    /// Check whether no further transition can happen.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, RunState::Running)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Snapshot of the simulation after a block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub run_state: RunState,

    /// Clock time (ms) at which this block executed. Zero before the first block.
    pub tick_timestamp: u64,

    /// Blocks executed since `start` (zero for the fresh snapshot).
    pub block: u64,

    /// Active trains.
    pub trains: Vector<Train>,

    /// Priority flag per intersection cell. Missing means `false`.
    pub intersection_flags: OrdMap<Coordinate, bool>,

    /// Colours still owed to each target.
    pub target_remaining: OrdMap<Coordinate, Vector<Color>>,

    /// Colours still queued at each source.
    pub source_remaining: OrdMap<Coordinate, Vector<Color>>,
}

impl GameState {
    /// Fresh `Running` snapshot with the ledgers filled from `grid`.
    #[must_use]
    pub fn initial(grid: &Grid) -> Self {
        let mut state = Self::default();
        for (coord, cell) in grid.iter() {
            match cell {
                Cell::Source { queue, .. } => {
                    let queue = queue.iter().copied().collect();
                    state.source_remaining.insert(coord, queue);
                }
                Cell::Target { remaining, .. } => {
                    let remaining = remaining.iter().copied().collect();
                    state.target_remaining.insert(coord, remaining);
                }
                _ => {}
            }
        }
        state
    }

    /// Priority flag of the intersection at `coord`.
    #[must_use]
    pub fn intersection_flag(&self, coord: Coordinate) -> bool {
        self.intersection_flags
            .get(&coord)
            .copied()
            .unwrap_or(false)
    }

    /// Colours still owed to the target at `coord`.
    #[must_use]
    pub fn target_remaining_at(&self, coord: Coordinate) -> Option<&Vector<Color>> {
        self.target_remaining.get(&coord)
    }

    /// Colours still queued at the source at `coord`.
    #[must_use]
    pub fn source_remaining_at(&self, coord: Coordinate) -> Option<&Vector<Color>> {
        self.source_remaining.get(&coord)
    }

    /// Check whether every target has received all of its trains.
    #[must_use]
    pub fn targets_satisfied(&self) -> bool {
        self.target_remaining.values().all(Vector::is_empty)
    }

    /// Encode the snapshot with bincode.
    pub fn encode(&self) -> EngineResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by [`GameState::encode`].
    pub fn decode(bytes: &[u8]) -> EngineResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
