//! Output side of a player actor: status events and the sinks that receive them.

use core::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::board::BoardSnapshot;
use crate::common::{Coord, PlayerId};
use crate::game::MatchOutcome;

/// Everything an actor reports while playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// `player` holds the turn; `target` is the opponent's board under fog of war.
    TurnStarted {
        player: PlayerId,
        shots_remaining: usize,
        own: BoardSnapshot,
        target: BoardSnapshot,
    },
    Hit { player: PlayerId, coord: Coord },
    Sunk { player: PlayerId, ship: &'static str },
    Miss { player: PlayerId, coord: Coord },
    AlreadyAttacked { player: PlayerId, coord: Coord },
    InvalidInput { player: PlayerId, reason: String },
    InvalidCoordinate { player: PlayerId, coord: Coord },
    TurnPassed { from: PlayerId, to: PlayerId },
    Victory { winner: PlayerId },
    Draw,
    /// The match stopped without a result.
    Abandoned,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::TurnStarted {
                player,
                shots_remaining,
                own,
                target,
            } => {
                writeln!(f, "{player}, it's your turn. You have {shots_remaining} shots left.")?;
                writeln!(f, "Opponent board:")?;
                write!(f, "{target}")?;
                writeln!(f, "Your board:")?;
                write!(f, "{own}")
            }
            GameEvent::Hit { player, coord } => write!(f, "{player} hit a ship at {coord}!"),
            GameEvent::Sunk { player, ship } => write!(f, "{player} sank the {ship}!"),
            GameEvent::Miss { player, coord } => write!(f, "{player} fired into the water at {coord}."),
            GameEvent::AlreadyAttacked { player, coord } => {
                write!(f, "{player} fired at {coord} again; that cell was already resolved.")
            }
            GameEvent::InvalidInput { player, reason } => {
                write!(f, "Invalid input from {player}: {reason}. Try again.")
            }
            GameEvent::InvalidCoordinate { player, coord } => {
                write!(f, "Invalid coordinates {coord} from {player}. Try again.")
            }
            GameEvent::TurnPassed { from, to } => write!(f, "{from} ends their turn; {to} is up."),
            GameEvent::Victory { winner } => write!(f, "{winner} won the game!"),
            GameEvent::Draw => write!(f, "The match ended in a draw!"),
            GameEvent::Abandoned => write!(f, "The match was abandoned."),
        }
    }
}

impl GameEvent {
    /// Event announcing a finished match.
    pub fn conclusion(outcome: Option<MatchOutcome>) -> Self {
        match outcome {
            Some(o) => match o.winner() {
                Some(winner) => GameEvent::Victory { winner },
                None => GameEvent::Draw,
            },
            None => GameEvent::Abandoned,
        }
    }
}

/// Receives events for display.
pub trait OutputSink: Send {
    fn notify(&mut self, event: GameEvent);
}

/// Sink that keeps every event; clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OutputSink for RecordingSink {
    fn notify(&mut self, event: GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
