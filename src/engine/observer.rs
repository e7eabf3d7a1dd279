//! Tick observers.
//!
//! Observers receive every snapshot synchronously at the end of the block
//! that produced it, in registration order. They only ever see `&GameState`
//! and cannot change the simulation.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Sink invoked after each executed block.
pub trait TickObserver {
    fn on_tick(&mut self, state: &GameState);
}

impl<F> TickObserver for F
where
    F: FnMut(&GameState),
{
    fn on_tick(&mut self, state: &GameState) {
        self(state);
    }
}

/// Forwards snapshots into a channel. A disconnected receiver is ignored.
#[derive(Clone, Debug)]
pub struct ChannelObserver(pub Sender<GameState>);

impl TickObserver for ChannelObserver {
    fn on_tick(&mut self, state: &GameState) {
        let _ = self.0.send(state.clone());
    }
}

/// Handle returned by [`Game::subscribe`](super::Game::subscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObserverId(pub u32);

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Observer({})", self.0)
    }
}

/// Ordered set of registered observers.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(ObserverId, Box<dyn TickObserver>)>,
    next_id: u32,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn add(&mut self, observer: Box<dyn TickObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    /// Deliver a snapshot to every observer.
    pub fn notify(&mut self, state: &GameState) {
        for (_, observer) in &mut self.observers {
            observer.on_tick(state);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
