use serde::Serialize;

use crate::common::SetupError;
use crate::ship::ShipType;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Consecutive shots a player may fire before the turn passes.
pub const SHOT_BUDGET: usize = 5;

/// Random placement attempts per ship before setup gives up.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// What firing at an already resolved cell costs the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RepeatShotPolicy {
    /// Treated like a miss: the streak ends and the turn passes.
    #[default]
    EndsTurn,
    /// Uses one shot from the budget; the turn passes only when the budget runs out.
    ConsumesShot,
    /// Costs nothing; the attacker simply fires again.
    Free,
}

/// Settings for a single match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    pub board_size: usize,
    pub shot_budget: usize,
    pub fleet: Vec<ShipType>,
    pub repeat_shot: RepeatShotPolicy,
    /// Total shots across both players after which the match is decided on sunk counts.
    pub shot_limit: Option<usize>,
    pub placement_attempts: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            shot_budget: SHOT_BUDGET,
            fleet: SHIPS.to_vec(),
            repeat_shot: RepeatShotPolicy::default(),
            shot_limit: None,
            placement_attempts: PLACEMENT_ATTEMPTS,
        }
    }
}

impl SessionConfig {
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    pub fn with_shot_budget(mut self, budget: usize) -> Self {
        self.shot_budget = budget;
        self
    }

    pub fn with_fleet(mut self, fleet: Vec<ShipType>) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn with_repeat_shot(mut self, policy: RepeatShotPolicy) -> Self {
        self.repeat_shot = policy;
        self
    }

    pub fn with_shot_limit(mut self, limit: Option<usize>) -> Self {
        self.shot_limit = limit;
        self
    }

    /// Reject settings no match could be played with.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.board_size == 0 {
            return Err(SetupError::EmptyBoard);
        }
        if self.shot_budget == 0 {
            return Err(SetupError::ZeroShotBudget);
        }
        if self.fleet.is_empty() {
            return Err(SetupError::EmptyFleet);
        }
        if self.shot_limit == Some(0) {
            return Err(SetupError::ZeroShotLimit);
        }
        Ok(())
    }
}
