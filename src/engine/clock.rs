//! Time sources and block cadence.
//!
//! The engine never reads the wall clock itself: callers pass `now_ms` into
//! [`Game::poll`](super::Game::poll), usually from a [`Clock`]. That keeps
//! the simulation deterministic under test with a [`ManualClock`].

use std::cell::Cell as StdCell;
use std::time::{Duration, Instant};

/// Millisecond time source.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Must not go backwards.
    fn now_ms(&self) -> u64;

    /// Wait until roughly `ms` milliseconds have passed.
    fn sleep(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Monotonic clock backed by `Instant`.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock for deterministic tests.
///
/// ```
/// use railmix::engine::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// clock.advance(25);
/// assert_eq!(clock.now_ms(), 125);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: StdCell<u64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: StdCell::new(start_ms),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to an absolute time.
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    /// Advances the clock instead of blocking.
    fn sleep(&self, ms: u64) {
        self.advance(ms);
    }
}

/// Decide whether a block is due.
///
/// The first block after start always runs. After that a block runs once
/// strictly more than `ticks_per_block` ms have passed since the last one.
/// `ticks_per_block` is read at every check, so changing it mid-wait takes
/// effect immediately.
#[must_use]
pub fn is_due(blocks_run: u64, last_ms: u64, now_ms: u64, ticks_per_block: u64) -> bool {
    blocks_run == 0 || now_ms.saturating_sub(last_ms) > ticks_per_block
}
