use std::collections::VecDeque;

use crate::common::{Coord, InputError, PlayerId};

/// Source of target coordinates for one player.
///
/// Providers are called with the session lock released, so they may block
/// on a human for as long as they like.
pub trait InputProvider: Send {
    /// Next coordinate `player` wants to fire at.
    fn next_coordinate(&mut self, player: PlayerId) -> Result<Coord, InputError>;
}

/// Provider replaying a fixed list of entries, then reporting `Closed`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    entries: VecDeque<Result<Coord, InputError>>,
}

impl ScriptedInput {
    pub fn new<I, C>(coords: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coord>,
    {
        Self {
            entries: coords.into_iter().map(|c| Ok(c.into())).collect(),
        }
    }

    /// Script that may include failed reads.
    pub fn from_entries(entries: Vec<Result<Coord, InputError>>) -> Self {
        Self {
            entries: entries.into(),
        }
    }
}

impl InputProvider for ScriptedInput {
    fn next_coordinate(&mut self, _player: PlayerId) -> Result<Coord, InputError> {
        self.entries.pop_front().unwrap_or(Err(InputError::Closed))
    }
}
