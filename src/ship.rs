//! Ship definitions and the cells a placed ship occupies.

use core::fmt;
use serde::Serialize;

use crate::common::{BoardError, Coord};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Index of a ship within the board it was placed on.
pub type ShipId = usize;

/// A ship placed on an N×N board.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    ship_type: ShipType,
    orientation: Orientation,
    cells: Vec<Coord>,
}

impl Ship {
    /// Lay out a ship starting at `origin` on a board of side `size`.
    pub fn new(
        id: ShipId,
        ship_type: ShipType,
        origin: Coord,
        orientation: Orientation,
        size: usize,
    ) -> Result<Self, BoardError> {
        let len = ship_type.length();
        // Ensure placement fits within size×size; origin is checked first so the
        // remaining span cannot underflow.
        let fits = origin.within(size)
            && match orientation {
                Orientation::Horizontal => len <= size - origin.col,
                Orientation::Vertical => len <= size - origin.row,
            };
        if len == 0 || !fits {
            return Err(BoardError::ShipOutOfBounds);
        }

        let cells = (0..len)
            .map(|i| match orientation {
                Orientation::Horizontal => Coord::new(origin.row, origin.col + i),
                Orientation::Vertical => Coord::new(origin.row + i, origin.col),
            })
            .collect();
        Ok(Ship {
            id,
            ship_type,
            orientation,
            cells,
        })
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Ship's type.
    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    /// Origin of the ship.
    pub fn origin(&self) -> Coord {
        self.cells[0]
    }

    /// Orientation of the ship.
    /// Occupied cells in order from the origin.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, name: \"{}\", origin: {}, orientation: {:?}, length: {} }}",
            self.id,
            self.ship_type.name(),
            self.origin(),
            self.orientation,
            self.cells.len(),
        )
    }
}
