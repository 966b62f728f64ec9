//! Common types for Salvo: coordinates, player identities and error enums.

use core::fmt;
use serde::Serialize;
use thiserror::Error;

/// A (row, column) position on a square board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this coordinate lies on a board of side `size`.
    pub fn within(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Identity of one of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Slot of this player in two-element per-player arrays.
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// Player number as shown to humans (1 or 2).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Coordinate lies outside the board.
    #[error("coordinate {0} is outside the board")]
    OutOfBounds(Coord),
    /// Ship would extend past the board edge.
    #[error("ship placement is out of bounds")]
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    #[error("ship placement overlaps with another ship")]
    ShipOverlaps,
    /// No free position found within the retry budget.
    #[error("unable to place {name} after {attempts} attempts")]
    UnableToPlaceShip { name: &'static str, attempts: usize },
}

/// Errors that prevent a session from starting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("board size must be at least 1")]
    EmptyBoard,
    #[error("shot budget must be at least 1")]
    ZeroShotBudget,
    #[error("fleet catalog is empty")]
    EmptyFleet,
    #[error("shot limit must be at least 1")]
    ZeroShotLimit,
    /// A ship from the catalog could not be placed; the board is too small for the fleet.
    #[error("placement failed for {player}: {source}")]
    PlacementFailure {
        player: PlayerId,
        #[source]
        source: BoardError,
    },
    /// A prepared board does not match the configured board size.
    #[error("board for {player} has size {actual}, expected {expected}")]
    BoardSizeMismatch {
        player: PlayerId,
        expected: usize,
        actual: usize,
    },
    /// A prepared board has already been fired at.
    #[error("board for {player} has already been fired at")]
    BoardAlreadyAttacked { player: PlayerId },
    /// A prepared board does not carry exactly the configured fleet.
    #[error("board for {player} does not hold the configured fleet")]
    IncompleteFleet { player: PlayerId },
}

/// Errors returned by `GameSession` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Target lies outside the board; the turn is retried without using a shot.
    #[error("invalid coordinate {coord} for a {size}x{size} board")]
    InvalidCoordinate { coord: Coord, size: usize },
    /// The caller attacked while the other player holds the turn.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),
    /// The match has already ended.
    #[error("the game is over")]
    GameOver,
}

/// Errors produced by input providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The entry could not be parsed as a coordinate; the turn is retried.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The provider has no more coordinates to give.
    #[error("input closed")]
    Closed,
}
