//! Ship definitions and placement geometry.

use core::fmt;
use core::str::FromStr;

use crate::common::{Coordinate, GameError};
use crate::config::{BOARD_SIZE, NUM_SHIPS, SHIPS};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Identifier of a catalog entry. Every fleet holds exactly one ship of
/// each code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipCode {
    AircraftCarrier,
    Battleship,
    Submarine,
    Destroyer,
    PatrolBoat,
}

impl ShipCode {
    pub const ALL: [ShipCode; NUM_SHIPS] = [
        ShipCode::AircraftCarrier,
        ShipCode::Battleship,
        ShipCode::Submarine,
        ShipCode::Destroyer,
        ShipCode::PatrolBoat,
    ];

    /// Position of this ship in [`SHIPS`].
    pub const fn index(self) -> usize {
        match self {
            ShipCode::AircraftCarrier => 0,
            ShipCode::Battleship => 1,
            ShipCode::Submarine => 2,
            ShipCode::Destroyer => 3,
            ShipCode::PatrolBoat => 4,
        }
    }

    /// Short code used in external forms.
    pub const fn as_str(self) -> &'static str {
        match self {
            ShipCode::AircraftCarrier => "aircraft_carrier",
            ShipCode::Battleship => "battleship",
            ShipCode::Submarine => "submarine",
            ShipCode::Destroyer => "destroyer",
            ShipCode::PatrolBoat => "patrol_boat",
        }
    }

    pub fn ship_type(self) -> ShipType {
        SHIPS[self.index()]
    }

    pub fn length(self) -> usize {
        self.ship_type().length()
    }
}

impl FromStr for ShipCode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or(GameError::UnknownShipType)
    }
}

impl fmt::Display for ShipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ship_type().name())
    }
}

/// Catalog entry: code, display name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    code: ShipCode,
    name: &'static str,
    length: usize,
}

impl ShipType {
    pub const fn new(code: ShipCode, name: &'static str, length: usize) -> Self {
        Self { code, name, length }
    }

    pub fn code(&self) -> ShipCode {
        self.code
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Where one ship goes: its type, the top-left origin cell and the
/// direction it extends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    pub ship: ShipCode,
    pub origin: Coordinate,
    pub orientation: Orientation,
}

impl ShipPlacement {
    pub const fn new(ship: ShipCode, origin: Coordinate, orientation: Orientation) -> Self {
        Self {
            ship,
            origin,
            orientation,
        }
    }

    /// The cells this ship covers, `origin` first.
    ///
    /// Fails with `OutOfBounds` if the origin or any later cell of the span
    /// falls off the grid.
    pub fn cells(&self) -> Result<impl Iterator<Item = Coordinate>, GameError> {
        self.origin.ensure_in_bounds()?;
        let len = self.ship.length();
        let (row, col) = (self.origin.row as usize, self.origin.col as usize);
        match self.orientation {
            Orientation::Horizontal if col + len > BOARD_SIZE as usize => {
                return Err(GameError::OutOfBounds {
                    row,
                    col: col + len - 1,
                });
            }
            Orientation::Vertical if row + len > BOARD_SIZE as usize => {
                return Err(GameError::OutOfBounds {
                    row: row + len - 1,
                    col,
                });
            }
            _ => {}
        }
        let origin = self.origin;
        let orientation = self.orientation;
        Ok((0..len as u8).map(move |i| match orientation {
            Orientation::Horizontal => Coordinate::new(origin.row, origin.col + i),
            Orientation::Vertical => Coordinate::new(origin.row + i, origin.col),
        }))
    }
}
