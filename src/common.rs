//! Common types for the engine: coordinates, player seats and errors.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::config::BOARD_SIZE;
use crate::ship::ShipCode;

/// A cell address on a 10×10 grid. Row 0 is `A` in external notation,
/// column 0 is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: u8,
    pub col: u8,
}

impl Coordinate {
    /// Build a coordinate without checking bounds. Grid operations reject
    /// out-of-range values with [`GameError::OutOfBounds`].
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Build a coordinate, failing if it lies outside the grid.
    pub fn checked(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= BOARD_SIZE as usize || col >= BOARD_SIZE as usize {
            return Err(GameError::OutOfBounds { row, col });
        }
        Ok(Self::new(row as u8, col as u8))
    }

    pub const fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Returns `Err(OutOfBounds)` unless the coordinate is on the grid.
    pub fn ensure_in_bounds(&self) -> Result<(), GameError> {
        if self.in_bounds() {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                row: self.row as usize,
                col: self.col as usize,
            })
        }
    }

    /// Every coordinate on the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|r| (0..BOARD_SIZE).map(move |c| Coordinate::new(r, c)))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'A' + self.row) as char;
        write!(f, "{}{}", letter, self.col as usize + 1)
    }
}

impl FromStr for Coordinate {
    type Err = GameError;

    /// Parse `<row letter><column number>`, e.g. `C5` or `j10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars
            .next()
            .ok_or(GameError::InvalidCoordinate)?
            .to_ascii_uppercase();
        if !letter.is_ascii_alphabetic() {
            return Err(GameError::InvalidCoordinate);
        }
        let col: usize = chars
            .as_str()
            .parse()
            .map_err(|_| GameError::InvalidCoordinate)?;
        if col == 0 {
            return Err(GameError::InvalidCoordinate);
        }
        let row = (letter as u8 - b'A') as usize;
        Coordinate::checked(row, col - 1)
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::Player1, PlayerId::Player2];

    pub const fn opponent(self) -> Self {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Player1 => write!(f, "Player 1"),
            PlayerId::Player2 => write!(f, "Player 2"),
        }
    }
}

/// A single rejected ship during fleet validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementFailure {
    pub player: PlayerId,
    pub ship: Option<ShipCode>,
    pub error: GameError,
}

/// Every placement failure found while validating both fleets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    pub failures: Vec<PlacementFailure>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn push(&mut self, player: PlayerId, ship: Option<ShipCode>, error: GameError) {
        self.failures.push(PlacementFailure {
            player,
            ship,
            error,
        });
    }

    /// Failures reported for one player.
    pub fn for_player(&self, player: PlayerId) -> impl Iterator<Item = &PlacementFailure> {
        self.failures.iter().filter(move |f| f.player == player)
    }
}

/// Errors returned by grid, placement, shot and state-machine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Row or column outside `0..BOARD_SIZE`.
    OutOfBounds { row: usize, col: usize },
    /// Grid cell already holds a ship.
    CellOccupied { row: usize, col: usize },
    /// Ship placement intersects an already placed ship.
    Overlap { ship: ShipCode, row: usize, col: usize },
    /// Code does not name a ship in the fleet catalog.
    UnknownShipType,
    /// This ship type was already placed for the player.
    ShipAlreadyPlaced(ShipCode),
    /// A fleet was submitted without this ship.
    MissingShip(ShipCode),
    /// Player has not placed every ship of the fleet.
    FleetIncomplete(PlayerId),
    /// Random placement gave up after too many attempts.
    UnableToPlaceShip(ShipCode),
    /// Target cell was already fired upon.
    AlreadyShot { row: usize, col: usize },
    /// Shooter is not the player whose turn it is.
    NotYourTurn,
    /// Shots are only accepted once both fleets are placed.
    GameNotStarted,
    /// Placement is only accepted during setup.
    SetupClosed,
    /// Game is won or cancelled.
    GameAlreadyFinished,
    /// Coordinate text could not be parsed.
    InvalidCoordinate,
    /// A restored snapshot violates a state invariant.
    CorruptState(&'static str),
    /// One or more fleets failed validation.
    Validation(ValidationError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfBounds { row, col } => {
                write!(f, "Coordinate (row={}, col={}) is out of bounds", row, col)
            }
            GameError::CellOccupied { row, col } => {
                write!(f, "Cell (row={}, col={}) is already occupied", row, col)
            }
            GameError::Overlap { ship, row, col } => write!(
                f,
                "The {} overlaps another ship at (row={}, col={})",
                ship, row, col
            ),
            GameError::UnknownShipType => write!(f, "Ship type not found in the fleet catalog"),
            GameError::ShipAlreadyPlaced(ship) => write!(f, "The {} is already placed", ship),
            GameError::MissingShip(ship) => write!(f, "The {} was not placed", ship),
            GameError::FleetIncomplete(player) => {
                write!(f, "{} has not placed the whole fleet", player)
            }
            GameError::UnableToPlaceShip(ship) => write!(f, "Unable to place the {}", ship),
            GameError::AlreadyShot { row, col } => {
                write!(f, "Cell (row={}, col={}) was already shot", row, col)
            }
            GameError::NotYourTurn => write!(f, "It is not your turn"),
            GameError::GameNotStarted => write!(f, "Game has not started yet"),
            GameError::SetupClosed => write!(f, "Ships can only be placed during setup"),
            GameError::GameAlreadyFinished => write!(f, "Game already over"),
            GameError::InvalidCoordinate => {
                write!(f, "Invalid coordinate, expected a row letter A-J and a column 1-10")
            }
            GameError::CorruptState(why) => write!(f, "Corrupt game state: {}", why),
            GameError::Validation(v) => {
                write!(f, "Fleet validation failed:")?;
                for failure in &v.failures {
                    write!(f, " [{}", failure.player)?;
                    if let Some(ship) = failure.ship {
                        write!(f, " {}", ship)?;
                    }
                    write!(f, ": {}]", failure.error)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

impl From<ValidationError> for GameError {
    fn from(err: ValidationError) -> Self {
        GameError::Validation(err)
    }
}
