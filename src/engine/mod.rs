//! Engine: the clocked simulation, its observers and the blocking driver.
//!
//! [`Game`] owns an immutable grid and the latest snapshot. Time comes from
//! outside through [`Game::poll`], so any [`Clock`] can drive it.

pub mod clock;
pub mod driver;
pub mod game;
pub mod observer;

pub use clock::{is_due, Clock, ManualClock, SystemClock};
pub use driver::run_until_settled;
pub use game::{Game, Session};
pub use observer::{ChannelObserver, ObserverId, ObserverRegistry, TickObserver};
