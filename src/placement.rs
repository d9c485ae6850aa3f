//! Ship placement validation and random fleet generation.

use alloc::vec::Vec;
use rand::Rng;

use crate::common::{Coordinate, GameError};
use crate::config::{BOARD_SIZE, NUM_SHIPS};
use crate::grid::{Cell, PrimaryGrid};
use crate::ship::{Orientation, ShipCode, ShipPlacement};

const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Place `ship` at `origin` extending along `orientation`.
///
/// The whole span is checked for bounds and overlap before any cell is
/// written, so a failed call leaves `grid` untouched.
pub fn place_ship(
    grid: &mut PrimaryGrid,
    ship: ShipCode,
    origin: Coordinate,
    orientation: Orientation,
) -> Result<(), GameError> {
    place(grid, &ShipPlacement::new(ship, origin, orientation))
}

/// [`place_ship`] taking a prepared [`ShipPlacement`].
pub fn place(grid: &mut PrimaryGrid, placement: &ShipPlacement) -> Result<(), GameError> {
    check(grid, placement)?;
    for cell in placement.cells()? {
        grid.occupy(cell, placement.ship)?;
    }
    log::debug!(
        "placed {} at {} ({:?})",
        placement.ship,
        placement.origin,
        placement.orientation
    );
    Ok(())
}

/// Validate a placement against `grid` without committing it.
pub fn check(grid: &PrimaryGrid, placement: &ShipPlacement) -> Result<(), GameError> {
    for cell in placement.cells()? {
        if let Cell::Occupied(_) | Cell::Hit(_) = grid.cell_at(cell)? {
            return Err(GameError::Overlap {
                ship: placement.ship,
                row: cell.row as usize,
                col: cell.col as usize,
            });
        }
    }
    Ok(())
}

/// Place a complete fleet on a fresh grid.
///
/// Every ship is attempted so that all problems are reported at once:
/// duplicates, bounds, overlap and ships missing from the fleet. Returns
/// the finished grid only when no ship failed.
pub fn build_fleet(
    placements: &[ShipPlacement],
) -> Result<PrimaryGrid, Vec<(Option<ShipCode>, GameError)>> {
    let mut grid = PrimaryGrid::new();
    let mut seen = [false; NUM_SHIPS];
    let mut failures = Vec::new();

    for placement in placements {
        let idx = placement.ship.index();
        if seen[idx] {
            failures.push((
                Some(placement.ship),
                GameError::ShipAlreadyPlaced(placement.ship),
            ));
            continue;
        }
        seen[idx] = true;
        if let Err(e) = place(&mut grid, placement) {
            failures.push((Some(placement.ship), e));
        }
    }
    for ship in ShipCode::ALL {
        if !seen[ship.index()] {
            failures.push((Some(ship), GameError::MissingShip(ship)));
        }
    }

    if failures.is_empty() {
        Ok(grid)
    } else {
        Err(failures)
    }
}

/// Returns a random placement for `ship` that fits on `grid` without
/// overlapping anything already there.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &PrimaryGrid,
    ship: ShipCode,
) -> Result<ShipPlacement, GameError> {
    let len = ship.length();
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let orientation = if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_r, max_c) = match orientation {
            Orientation::Horizontal => (BOARD_SIZE as usize - 1, BOARD_SIZE as usize - len),
            Orientation::Vertical => (BOARD_SIZE as usize - len, BOARD_SIZE as usize - 1),
        };
        let origin = Coordinate::new(
            rng.random_range(0..=max_r) as u8,
            rng.random_range(0..=max_c) as u8,
        );
        let placement = ShipPlacement::new(ship, origin, orientation);
        if check(grid, &placement).is_ok() {
            return Ok(placement);
        }
    }
    Err(GameError::UnableToPlaceShip(ship))
}

/// A complete random fleet, one placement per catalog entry.
pub fn random_fleet<R: Rng + ?Sized>(rng: &mut R) -> Result<[ShipPlacement; NUM_SHIPS], GameError> {
    let mut grid = PrimaryGrid::new();
    let mut fleet = [ShipPlacement::new(
        ShipCode::AircraftCarrier,
        Coordinate::new(0, 0),
        Orientation::Horizontal,
    ); NUM_SHIPS];
    for (slot, ship) in fleet.iter_mut().zip(ShipCode::ALL) {
        let placement = random_placement(rng, &grid, ship)?;
        place(&mut grid, &placement)?;
        *slot = placement;
    }
    Ok(fleet)
}
