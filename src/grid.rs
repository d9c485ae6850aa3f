//! Fixed 10×10 cell matrices.
//!
//! A player owns two of them: the primary grid holding real ship occupancy
//! and the hits taken against it, and the tracking grid recording what that
//! player has learned by firing at the opponent. Grids only know about
//! single cells; whole-ship rules live in [`crate::placement`].

use core::fmt;

use crate::common::{Coordinate, GameError};
use crate::config::BOARD_SIZE;
use crate::ship::ShipCode;

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// State of a cell on a primary grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Occupied(ShipCode),
    /// Ship segment that has been shot. Terminal.
    Hit(ShipCode),
    /// Open water that has been shot. Terminal.
    Miss,
}

impl Cell {
    /// Ship occupying this cell, whether or not it has been hit.
    pub fn ship(&self) -> Option<ShipCode> {
        match *self {
            Cell::Occupied(code) | Cell::Hit(code) => Some(code),
            Cell::Empty | Cell::Miss => None,
        }
    }

    pub fn is_struck(&self) -> bool {
        matches!(self, Cell::Hit(_) | Cell::Miss)
    }
}

/// State of a cell on a tracking grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    #[default]
    Unknown,
    Miss,
    /// Always carries the concrete ship; projections decide whether to show it.
    Hit(ShipCode),
}

/// A 10×10 matrix indexed by [`Coordinate`].
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<C> {
    cells: [[C; GRID_SIZE]; GRID_SIZE],
}

pub type PrimaryGrid = Grid<Cell>;
pub type TrackingGrid = Grid<Mark>;

impl<C: Copy + Default> Grid<C> {
    /// Create a grid with every cell in its default state.
    pub fn new() -> Self {
        Self {
            cells: [[C::default(); GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Read the cell at `coord`.
    pub fn cell_at(&self, coord: Coordinate) -> Result<C, GameError> {
        coord.ensure_in_bounds()?;
        Ok(self.cells[coord.row as usize][coord.col as usize])
    }

    fn slot_mut(&mut self, coord: Coordinate) -> Result<&mut C, GameError> {
        coord.ensure_in_bounds()?;
        Ok(&mut self.cells[coord.row as usize][coord.col as usize])
    }

    /// Row-major view of the raw cells.
    pub fn rows(&self) -> &[[C; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Iterate `(coordinate, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, C)> + '_ {
        Coordinate::all().map(move |c| (c, self.cells[c.row as usize][c.col as usize]))
    }

    /// Build a grid of another cell type by mapping every cell.
    pub fn map<D: Copy + Default>(&self, mut f: impl FnMut(C) -> D) -> Grid<D> {
        let mut out = Grid::<D>::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                out.cells[r][c] = f(*cell);
            }
        }
        out
    }

    /// Number of cells matching `pred`.
    pub fn count(&self, mut pred: impl FnMut(&C) -> bool) -> usize {
        self.cells.iter().flatten().filter(|c| pred(c)).count()
    }
}

impl<C: Copy + Default> Default for Grid<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid<Cell> {
    /// Mark a single empty cell as holding `ship`.
    pub fn occupy(&mut self, coord: Coordinate, ship: ShipCode) -> Result<(), GameError> {
        let slot = self.slot_mut(coord)?;
        if *slot != Cell::Empty {
            return Err(GameError::CellOccupied {
                row: coord.row as usize,
                col: coord.col as usize,
            });
        }
        *slot = Cell::Occupied(ship);
        Ok(())
    }

    /// Fire at `coord`: occupied cells become `Hit`, water becomes `Miss`.
    /// A cell that was already struck is left untouched and rejected.
    pub fn strike(&mut self, coord: Coordinate) -> Result<Cell, GameError> {
        let slot = self.slot_mut(coord)?;
        let next = match *slot {
            Cell::Empty => Cell::Miss,
            Cell::Occupied(code) => Cell::Hit(code),
            Cell::Hit(_) | Cell::Miss => {
                return Err(GameError::AlreadyShot {
                    row: coord.row as usize,
                    col: coord.col as usize,
                })
            }
        };
        *slot = next;
        Ok(next)
    }

    /// Cells holding a ship segment, hit or not.
    pub fn ship_cells(&self) -> usize {
        self.count(|c| c.ship().is_some())
    }
}

impl Grid<Mark> {
    /// Record what a shot at `coord` revealed.
    pub fn record(&mut self, coord: Coordinate, mark: Mark) -> Result<(), GameError> {
        let slot = self.slot_mut(coord)?;
        if *slot != Mark::Unknown {
            return Err(GameError::AlreadyShot {
                row: coord.row as usize,
                col: coord.col as usize,
            });
        }
        *slot = mark;
        Ok(())
    }
}

impl fmt::Debug for Grid<Cell> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PrimaryGrid:")?;
        for row in self.cells.iter() {
            for cell in row.iter() {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(_) => 'S',
                    Cell::Hit(_) => 'X',
                    Cell::Miss => 'o',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid<Mark> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TrackingGrid:")?;
        for row in self.cells.iter() {
            for cell in row.iter() {
                let ch = match cell {
                    Mark::Unknown => '.',
                    Mark::Hit(_) => 'X',
                    Mark::Miss => 'o',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
