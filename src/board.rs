//! Game board state: cell grid, ship placement and fog-of-war snapshots.

use core::fmt;
use rand::Rng;
use serde::Serialize;

use crate::common::{BoardError, Coord};
use crate::ship::{Orientation, Ship, ShipId, ShipType};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied(ShipId),
    Hit(ShipId),
    Miss,
}

/// Result of firing at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shot {
    Hit(ShipId),
    Miss,
    AlreadyAttacked,
}

/// Who is looking at a board snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// The board's owner sees their own ships.
    Owner,
    /// The opponent only sees resolved shots.
    Opponent,
}

/// Display symbol for one snapshot cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Symbol {
    Water,
    Ship,
    Hit,
    Miss,
}

impl Symbol {
    pub fn as_char(self) -> char {
        match self {
            Symbol::Water => '.',
            Symbol::Ship => 'S',
            Symbol::Hit => 'X',
            Symbol::Miss => 'o',
        }
    }
}

/// Redacted view of a board, safe to hand to a display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub size: usize,
    pub rows: Vec<Vec<Symbol>>,
}

impl BoardSnapshot {
    pub fn get(&self, coord: Coord) -> Option<Symbol> {
        self.rows.get(coord.row)?.get(coord.col).copied()
    }

    /// Number of cells showing `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|s| **s == symbol)
            .count()
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.size {
            write!(f, " {:>2}", c)?;
        }
        writeln!(f)?;
        for (r, row) in self.rows.iter().enumerate() {
            write!(f, "{:2} ", r)?;
            for symbol in row {
                write!(f, "  {}", symbol.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Main board state: cells and the ships placed on them.
#[derive(Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty board of side `size` (no ships placed).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
            ships: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Ships placed so far, indexed by `ShipId`.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn cell(&self, coord: Coord) -> Result<Cell, BoardError> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Number of cells still holding an unhit ship segment.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Occupied(_)))
            .count()
    }

    /// Whether no cell has been fired at yet.
    pub fn is_untouched(&self) -> bool {
        !self
            .cells
            .iter()
            .any(|c| matches!(c, Cell::Hit(_) | Cell::Miss))
    }

    fn index(&self, coord: Coord) -> Result<usize, BoardError> {
        if coord.within(self.size) {
            Ok(coord.row * self.size + coord.col)
        } else {
            Err(BoardError::OutOfBounds(coord))
        }
    }

    /// Place a ship at `origin` with `orientation`. Leaves the board untouched on failure.
    pub fn place(
        &mut self,
        ship_type: ShipType,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        let id = self.ships.len();
        let ship = Ship::new(id, ship_type, origin, orientation, self.size)?;
        // ensure no overlap
        for &coord in ship.cells() {
            if self.cell(coord)? != Cell::Empty {
                return Err(BoardError::ShipOverlaps);
            }
        }
        for &coord in ship.cells() {
            let i = self.index(coord)?;
            self.cells[i] = Cell::Occupied(id);
        }
        self.ships.push(ship);
        Ok(id)
    }

    /// Returns a random non‐overlapping origin and orientation for `ship_type`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        ship_type: ShipType,
        attempts: usize,
    ) -> Result<(Coord, Orientation), BoardError> {
        let len = ship_type.length();
        if len > 0 && len <= self.size {
            for _ in 0..attempts {
                let orient = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let max_r = if orient == Orientation::Vertical {
                    self.size - len
                } else {
                    self.size - 1
                };
                let max_c = if orient == Orientation::Horizontal {
                    self.size - len
                } else {
                    self.size - 1
                };
                let origin = Coord::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
                // build a temp ship and check overlap
                let ship = Ship::new(self.ships.len(), ship_type, origin, orient, self.size)?;
                if ship
                    .cells()
                    .iter()
                    .all(|&c| matches!(self.cell(c), Ok(Cell::Empty)))
                {
                    return Ok((origin, orient));
                }
            }
        }
        Err(BoardError::UnableToPlaceShip {
            name: ship_type.name(),
            attempts,
        })
    }

    /// Randomly place every ship of `fleet`, in catalog order.
    pub fn place_fleet<R: Rng>(
        &mut self,
        rng: &mut R,
        fleet: &[ShipType],
        attempts: usize,
    ) -> Result<(), BoardError> {
        for &ship_type in fleet {
            let (origin, orient) = self.random_placement(rng, ship_type, attempts)?;
            self.place(ship_type, origin, orient)?;
        }
        Ok(())
    }

    /// Fire at `coord`. Re-firing at a resolved cell changes nothing.
    pub fn attack(&mut self, coord: Coord) -> Result<Shot, BoardError> {
        let i = self.index(coord)?;
        let (next, shot) = match self.cells[i] {
            Cell::Occupied(id) => (Cell::Hit(id), Shot::Hit(id)),
            Cell::Empty => (Cell::Miss, Shot::Miss),
            resolved @ (Cell::Hit(_) | Cell::Miss) => (resolved, Shot::AlreadyAttacked),
        };
        self.cells[i] = next;
        Ok(shot)
    }

    /// Display view of the board for `viewer`.
    pub fn snapshot_for(&self, viewer: Viewer) -> BoardSnapshot {
        let rows = self
            .cells
            .chunks(self.size.max(1))
            .take(self.size)
            .map(|row| {
                row.iter()
                    .map(|cell| match (cell, viewer) {
                        (Cell::Hit(_), _) => Symbol::Hit,
                        (Cell::Miss, _) => Symbol::Miss,
                        (Cell::Occupied(_), Viewer::Owner) => Symbol::Ship,
                        (Cell::Occupied(_), Viewer::Opponent) | (Cell::Empty, _) => Symbol::Water,
                    })
                    .collect()
            })
            .collect();
        BoardSnapshot {
            size: self.size,
            rows,
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  ships: {:?},\n  grid:\n{}}}",
            self.size,
            self.ships,
            self.snapshot_for(Viewer::Owner)
        )
    }
}
