//! Persisted solutions.
//!
//! A solution stores only the track geometry a player drew, never the fixed
//! cells of the level. Loading merges it back with the level from the
//! catalog. The JSON layout is:
//!
//! ```json
//! {
//!   "level": "Red Line",
//!   "grid": [
//!     {"type": "Track", "direction": "horizontal", "row": 3, "col": 2},
//!     {"type": "Intersection", "track1": "vertical", "track2": "horizontal", "row": 3, "col": 3}
//!   ],
//!   "status": "Complete"
//! }
//! ```

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EngineError, EngineResult};
use crate::engine::Game;
use crate::sim::{GameState, RunState};

use super::catalog::{build_game, CellDefinition, LevelCatalog};

/// Drawn track geometry for one level plus the outcome it reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub level: String,
    pub grid: Vec<CellDefinition>,
    pub status: RunState,
}

impl Solution {
    /// Capture the track and intersection cells of `game`, row-major.
    #[must_use]
    pub fn from_game(game: &Game, state: &GameState) -> Self {
        let grid = game
            .grid()
            .iter()
            .filter(|(_, cell)| cell.is_track_geometry())
            .map(|(at, cell)| CellDefinition::at(at, cell.clone()))
            .collect();

        Self {
            level: game.level().to_owned(),
            grid,
            status: state.run_state,
        }
    }

    /// Rebuild a stopped engine from the level's fixed cells and this geometry.
    ///
    /// Fixed cells are placed after the stored geometry, so they win on any
    /// overlap.
    pub fn load(&self, catalog: &LevelCatalog, config: &EngineConfig) -> EngineResult<Game> {
        let puzzle = catalog
            .get(&self.level)
            .ok_or_else(|| EngineError::UnknownLevel(self.level.clone()))?;

        let cells: Vec<CellDefinition> = self.grid.iter().chain(&puzzle.cells).cloned().collect();
        build_game(&self.level, &cells, config)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check whether this solution may overwrite `existing`.
    ///
    /// A stored `Complete` solution with the same geometry is kept as is.
    #[must_use]
    pub fn should_replace(&self, existing: Option<&Solution>) -> bool {
        match existing {
            Some(old) => !(old.grid == self.grid && old.status == RunState::Complete),
            None => true,
        }
    }
}

/// In-memory solution storage keyed by level name.
#[derive(Clone, Debug, Default)]
pub struct SolutionStore {
    solutions: FxHashMap<String, Solution>,
}

impl SolutionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, level: &str) -> Option<&Solution> {
        self.solutions.get(level)
    }

    /// Store the current geometry and outcome of `game`.
    ///
    /// Nothing is written for a level the catalog does not know, or when
    /// [`Solution::should_replace`] refuses. Returns whether the store changed.
    pub fn save(&mut self, catalog: &LevelCatalog, game: &Game, state: &GameState) -> bool {
        if !catalog.contains(game.level()) {
            debug!("not saving solution for unknown level '{}'", game.level());
            return false;
        }

        let solution = Solution::from_game(game, state);
        if !solution.should_replace(self.solutions.get(game.level())) {
            return false;
        }
        self.solutions.insert(solution.level.clone(), solution);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}
