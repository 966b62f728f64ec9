//! Applies a single attack to a board and its fleet tracker.

use serde::Serialize;

use crate::board::{Board, Shot};
use crate::common::Coord;
use crate::fleet::{FleetTracker, PlayerRecord};

/// Outcome of one attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttackOutcome {
    /// A ship segment was hit; carries the names of ships this shot sank.
    Hit { sunk: Vec<&'static str> },
    Miss,
    AlreadyAttacked,
    OutOfBounds,
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackOutcome::Hit { .. })
    }
}

/// Resolve an attack by `attacker` at `coord`.
///
/// This is the only path that mutates a board or fleet once a match has
/// started; callers hold the session lock while calling it.
pub fn resolve(
    board: &mut Board,
    fleet: &mut FleetTracker,
    attacker: &mut PlayerRecord,
    coord: Coord,
) -> AttackOutcome {
    if !coord.within(board.size()) {
        return AttackOutcome::OutOfBounds;
    }
    match board.attack(coord) {
        Ok(Shot::Hit(_)) => AttackOutcome::Hit {
            sunk: fleet.recompute_after_attack(board, attacker),
        },
        Ok(Shot::Miss) => AttackOutcome::Miss,
        Ok(Shot::AlreadyAttacked) => AttackOutcome::AlreadyAttacked,
        Err(_) => AttackOutcome::OutOfBounds,
    }
}
