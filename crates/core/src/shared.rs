//! Thread-safe handle to one game.
//!
//! The frame loop and the input thread each hold a clone of [`SharedGame`];
//! every update, command and snapshot goes through the same mutex, so the
//! two never interleave inside a phase transition.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::game_state::{Cues, GameState};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, GamePhase};

pub struct SharedGame<R: RandomSource = SimpleRng> {
    inner: Arc<Mutex<GameState<R>>>,
}

impl<R: RandomSource> Clone for SharedGame<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RandomSource> SharedGame<R> {
    pub fn new(state: GameState<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    // Recover from poisoning.
    fn lock(&self) -> MutexGuard<'_, GameState<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update(&self, dt_ms: f64) {
        self.lock().update(dt_ms);
    }

    pub fn apply_action(&self, action: GameAction) -> bool {
        self.lock().apply_action(action)
    }

    pub fn restart(&self) {
        self.lock().restart();
    }

    pub fn phase(&self) -> GamePhase {
        self.lock().phase()
    }

    pub fn take_cues(&self) -> Cues {
        self.lock().take_cues()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.lock().snapshot_into(out);
    }

    /// Run `f` with exclusive access to the game.
    pub fn with<T>(&self, f: impl FnOnce(&mut GameState<R>) -> T) -> T {
        f(&mut self.lock())
    }
}
