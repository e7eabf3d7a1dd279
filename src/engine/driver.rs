//! Blocking timer loop.

use log::debug;

use crate::core::{EngineConfig, EngineResult};
use crate::sim::RunState;

use super::clock::Clock;
use super::game::Game;

/// Start `game` and poll it every `frame_interval_ms` until it settles.
///
/// The cadence is the game's own `ticks_per_block`; `config` only supplies
/// the poll period and the block limit.
///
/// Returns once a terminal run state is observed or `max_ticks` blocks have
/// executed, whichever comes first. The engine is stopped on every exit path,
/// including errors.
///
/// ```
/// use railmix::core::{Cell, Color, Edge, EngineConfig, TrackShape};
/// use railmix::engine::{run_until_settled, Game, ManualClock};
/// use railmix::sim::RunState;
///
/// let mut game = Game::from_rows("line", vec![vec![
///     Cell::source(Edge::Right, [Color::Red]),
///     Cell::track(TrackShape::Horizontal),
///     Cell::target(Edge::Left, [Color::Red]),
/// ]]).unwrap();
///
/// let clock = ManualClock::new(0);
/// let outcome = run_until_settled(&mut game, &clock, &EngineConfig::fast()).unwrap();
/// assert_eq!(outcome, RunState::Complete);
/// assert!(!game.is_running());
/// ```
pub fn run_until_settled(
    game: &mut Game,
    clock: &dyn Clock,
    config: &EngineConfig,
) -> EngineResult<RunState> {
    let mut session = game.session();
    let mut executed = 0u64;

    loop {
        if let Some(state) = session.poll(clock.now_ms())? {
            executed += 1;
            if state.run_state.is_terminal() {
                return Ok(state.run_state);
            }
        }

        if config.max_ticks.is_some_and(|max| executed >= max) {
            debug!("giving up on '{}' after {executed} blocks", session.level());
            return Ok(session.run_state());
        }

        clock.sleep(config.frame_interval_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, Color, Edge, TrackShape};
    use crate::engine::ManualClock;

    #[test]
    fn test_stops_at_max_ticks() {
        // A target nobody feeds keeps the run going forever
        let target = Cell::target(Edge::Left, [Color::Red]);
        let mut game = Game::from_rows("starved", vec![vec![target]]).unwrap();
        game.set_ticks_per_block(1);
        let clock = ManualClock::new(0);
        let config = EngineConfig::fast().with_max_ticks(Some(25));

        let outcome = run_until_settled(&mut game, &clock, &config).unwrap();
        assert_eq!(outcome, RunState::Running);
        assert_eq!(game.state().block, 25);
        assert!(!game.is_running());
    }

    #[test]
    fn test_cadence_on_manual_clock() {
        let mut game = Game::from_rows(
            "line",
            vec![vec![
                Cell::source(Edge::Right, [Color::Red]),
                Cell::track(TrackShape::Horizontal),
                Cell::target(Edge::Left, [Color::Red]),
            ]],
        )
        .unwrap();
        game.set_ticks_per_block(10);
        let clock = ManualClock::new(0);
        let config = EngineConfig::default().with_frame_interval(5);

        let outcome = run_until_settled(&mut game, &clock, &config).unwrap();
        assert_eq!(outcome, RunState::Complete);
        assert_eq!(game.state().block, 3);
        // Blocks at 0, 15, 30
        assert_eq!(game.state().tick_timestamp, 30);
    }
}
