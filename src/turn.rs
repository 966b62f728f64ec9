//! Turn coordination between the two player actors.
//!
//! The coordinator owns the match data together with the turn phase behind a
//! single mutex. Every read or write of the game state goes through a
//! [`TurnGuard`], and actors waiting for their turn sleep on a condition
//! variable tied to that same mutex, so a turn change can never slip in
//! between an actor's check and its wait.

use core::ops::{Deref, DerefMut};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::common::PlayerId;

/// Turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnPhase {
    WaitingFor(PlayerId),
    GameOver,
}

impl TurnPhase {
    /// Player allowed to act, if the match is still running.
    pub fn active_player(self) -> Option<PlayerId> {
        match self {
            TurnPhase::WaitingFor(p) => Some(p),
            TurnPhase::GameOver => None,
        }
    }

    pub fn is_over(self) -> bool {
        self == TurnPhase::GameOver
    }

    /// Whether an actor for `player` blocked in `await_turn` may proceed.
    fn releases(self, player: PlayerId) -> bool {
        match self {
            TurnPhase::WaitingFor(p) => p == player,
            TurnPhase::GameOver => true,
        }
    }
}

struct Turns<T> {
    phase: TurnPhase,
    data: T,
}

/// Serializes access to `T` and hands the turn back and forth.
pub struct TurnCoordinator<T> {
    turns: Mutex<Turns<T>>,
    changed: Condvar,
}

impl<T> TurnCoordinator<T> {
    /// Wrap `data`; player one moves first.
    pub fn new(data: T) -> Self {
        Self {
            turns: Mutex::new(Turns {
                phase: TurnPhase::WaitingFor(PlayerId::One),
                data,
            }),
            changed: Condvar::new(),
        }
    }

    /// Take the lock without waiting for any particular turn.
    pub fn lock(&self) -> TurnGuard<'_, T> {
        // Guarded state is consistent after every guard operation, poisoned or not.
        let guard = self.turns.lock().unwrap_or_else(PoisonError::into_inner);
        TurnGuard {
            guard,
            changed: &self.changed,
        }
    }

    /// Block until it is `player`'s turn or the game is over.
    ///
    /// Returns with the lock held; check [`TurnGuard::phase`] to tell the two
    /// wake reasons apart.
    pub fn await_turn(&self, player: PlayerId) -> TurnGuard<'_, T> {
        let guard = self.turns.lock().unwrap_or_else(PoisonError::into_inner);
        let guard = self
            .changed
            .wait_while(guard, |turns| !turns.phase.releases(player))
            .unwrap_or_else(PoisonError::into_inner);
        TurnGuard {
            guard,
            changed: &self.changed,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.lock().phase()
    }
}

/// Exclusive access to the coordinated data plus control of the turn.
pub struct TurnGuard<'a, T> {
    guard: MutexGuard<'a, Turns<T>>,
    changed: &'a Condvar,
}

impl<T> TurnGuard<'_, T> {
    pub fn phase(&self) -> TurnPhase {
        self.guard.phase
    }

    /// Pass the turn to the other player and wake every waiter.
    ///
    /// Returns the newly active player, or `None` once the game is over.
    pub fn yield_turn(&mut self) -> Option<PlayerId> {
        if let TurnPhase::WaitingFor(p) = self.guard.phase {
            self.guard.phase = TurnPhase::WaitingFor(p.opponent());
            self.changed.notify_all();
        }
        self.guard.phase.active_player()
    }

    /// Move to `GameOver` and wake every waiter regardless of whose turn it is.
    ///
    /// Returns `true` only for the call that actually ended the game.
    pub fn end_game(&mut self) -> bool {
        if self.guard.phase.is_over() {
            return false;
        }
        self.guard.phase = TurnPhase::GameOver;
        self.changed.notify_all();
        true
    }
}

impl<T> Deref for TurnGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard.data
    }
}

impl<T> DerefMut for TurnGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard.data
    }
}
