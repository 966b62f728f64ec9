//! Per-side fleet bookkeeping: which ships are sunk and who sank them.

use serde::Serialize;

use crate::board::{Board, Cell};
use crate::common::{Coord, PlayerId};
use crate::ship::ShipId;

/// Per-player counters for the running match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    /// Shots left in the current streak.
    pub shots_remaining: usize,
    /// Enemy ships this player has sunk.
    pub sunk_count: usize,
    /// Shots fired over the whole match.
    pub shots_fired: usize,
}

impl PlayerRecord {
    pub fn new(id: PlayerId, shot_budget: usize) -> Self {
        Self {
            id,
            shots_remaining: shot_budget,
            sunk_count: 0,
            shots_fired: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct TrackedShip {
    id: ShipId,
    name: &'static str,
    cells: Vec<Coord>,
    counted: bool,
}

/// Sunk/remaining accounting for the ships on one board.
#[derive(Debug, Clone)]
pub struct FleetTracker {
    ships: Vec<TrackedShip>,
}

impl FleetTracker {
    /// Start tracking every ship currently placed on `board`.
    pub fn new(board: &Board) -> Self {
        let ships = board
            .ships()
            .iter()
            .map(|ship| TrackedShip {
                id: ship.id(),
                name: ship.name(),
                cells: ship.cells().to_vec(),
                counted: false,
            })
            .collect();
        Self { ships }
    }

    /// Returns `true` when every cell of ship `id` has been hit.
    pub fn is_sunk(&self, board: &Board, id: ShipId) -> bool {
        self.ships
            .iter()
            .find(|s| s.id == id)
            .is_some_and(|s| cells_all_hit(board, &s.cells))
    }

    /// Mark ships that became fully hit since the last scan and credit them to
    /// `attacker`. A ship is credited at most once.
    pub fn recompute_after_attack(
        &mut self,
        board: &Board,
        attacker: &mut PlayerRecord,
    ) -> Vec<&'static str> {
        let mut newly_sunk = Vec::new();
        for ship in self.ships.iter_mut().filter(|s| !s.counted) {
            if cells_all_hit(board, &ship.cells) {
                ship.counted = true;
                attacker.sunk_count += 1;
                newly_sunk.push(ship.name);
            }
        }
        newly_sunk
    }

    /// Ships on this board not yet sunk.
    pub fn remaining_ships(&self) -> usize {
        self.ships.iter().filter(|s| !s.counted).count()
    }

    /// Names of ships already sunk, in catalog order.
    pub fn sunk_ships(&self) -> Vec<&'static str> {
        self.ships
            .iter()
            .filter(|s| s.counted)
            .map(|s| s.name)
            .collect()
    }
}

fn cells_all_hit(board: &Board, cells: &[Coord]) -> bool {
    cells
        .iter()
        .all(|&c| matches!(board.cell(c), Ok(Cell::Hit(_))))
}
