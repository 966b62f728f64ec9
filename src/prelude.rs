//! Commonly used types and utilities for ease of import.

pub use crate::{
    play_match, Coord, GameEvent, GameSession, InputProvider, MatchOutcome, OutputSink,
    PlayerActor, PlayerId, SessionConfig, SessionError, TurnStatus,
};

pub use crate::{ConsoleInput, ConsoleSink, RandomInput, RecordingSink, ScriptedInput};
