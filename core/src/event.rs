use serde::{Deserialize, Serialize};

use crate::*;

/// Notifications emitted by [`Game`] to its host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fired on every status transition, including re-entering `Idle`.
    StatusChanged(GameStatus),
    /// Fired once per clock tick and once with `0` when the clock is reset.
    TimerTick(u32),
    /// Fired after any change to cell visibility.
    BoardUpdated,
}

pub trait GameObserver {
    fn notify(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> GameObserver for F {
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Fan-out of events to every registered observer, in registration order.
#[derive(Default)]
pub struct Observers {
    observers: Vec<Box<dyn GameObserver>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn emit(&mut self, event: GameEvent) {
        log::trace!("emit {:?} to {} observers", event, self.observers.len());
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}

impl core::fmt::Debug for Observers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.observers.len())
            .finish()
    }
}
