//! Engine configuration.
//!
//! The embedding application picks the cadence and the size of level grids
//! at startup. Everything has a sensible default, so `EngineConfig::default()`
//! reproduces the stock puzzle setup.

use serde::{Deserialize, Serialize};

/// Default block cadence in milliseconds.
pub const DEFAULT_TICKS_PER_BLOCK: u64 = 500;

/// Default poll period of the timer loop in milliseconds.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 1;

/// Default side length of a level grid.
pub const DEFAULT_GRID_SIZE: usize = 7;

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Milliseconds between blocks. Can be changed live on a running game.
    pub ticks_per_block: u64,

    /// How often the timer loop checks whether a block is due.
    pub frame_interval_ms: u64,

    /// Height of grids built from sparse level definitions.
    pub default_height: usize,

    /// Width of grids built from sparse level definitions.
    pub default_width: usize,

    /// Upper bound on executed blocks in the blocking driver (`None` = unbounded).
    pub max_ticks: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ticks_per_block: DEFAULT_TICKS_PER_BLOCK,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            default_height: DEFAULT_GRID_SIZE,
            default_width: DEFAULT_GRID_SIZE,
            max_ticks: Some(10_000),
        }
    }
}

impl EngineConfig {
    /// Set the block cadence.
    #[must_use]
    pub fn with_ticks_per_block(mut self, ms: u64) -> Self {
        self.ticks_per_block = ms;
        self
    }

    /// Set the timer poll period.
    #[must_use]
    pub fn with_frame_interval(mut self, ms: u64) -> Self {
        self.frame_interval_ms = ms;
        self
    }

    /// Set the size of grids built from level definitions.
    #[must_use]
    pub fn with_grid_size(mut self, height: usize, width: usize) -> Self {
        self.default_height = height;
        self.default_width = width;
        self
    }

    /// Set the driver's block limit.
    #[must_use]
    pub fn with_max_ticks(mut self, max: Option<u64>) -> Self {
        self.max_ticks = max;
        self
    }

    /// Config for headless runs at the fastest cadence.
    pub fn fast() -> Self {
        Self::default().with_ticks_per_block(1)
    }
}
