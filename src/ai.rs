// Probability-based targeting over a player's public view of the opponent.
// Uses no_std and avoids heap allocations.

use rand::Rng;

use crate::{
    common::Coordinate,
    config::{BOARD_SIZE, NUM_SHIPS},
    ship::Orientation,
    view::{Sighting, SightingGrid},
};

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// Placements covering more unresolved hits are weighted by this factor per
/// hit, concentrating the density around wounded ships.
const HIT_BIAS: f64 = 10.0;

/// Default sampling temperature. Below 1.0 favours the densest cells.
pub const DEFAULT_TEMPERATURE: f64 = 0.5;

pub type Density = [[f64; GRID_SIZE]; GRID_SIZE];

/// Compute a probability density over all unknown squares given the
/// sightings so far and the lengths of enemy ships still afloat (zero for
/// sunk ships).
///
/// Misses and hits on already-sunk ships block a placement; hits on ships
/// not yet sunk raise its weight.
pub fn calc_pdf(sightings: &SightingGrid, remaining_lengths: &[usize; NUM_SHIPS]) -> Density {
    let mut matrix = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let cells = sightings.rows();

    for &len in remaining_lengths.iter() {
        if len == 0 {
            continue;
        }
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            let (max_row, max_col) = match orient {
                Orientation::Vertical => (GRID_SIZE - len + 1, GRID_SIZE),
                Orientation::Horizontal => (GRID_SIZE, GRID_SIZE - len + 1),
            };
            for r in 0..max_row {
                for c in 0..max_col {
                    let span = |k: usize| match orient {
                        Orientation::Vertical => (r + k, c),
                        Orientation::Horizontal => (r, c + k),
                    };
                    let mut valid = true;
                    let mut n_hits = 0i32;
                    for k in 0..len {
                        let (rr, cc) = span(k);
                        match cells[rr][cc] {
                            Sighting::Miss | Sighting::Hit(Some(_)) => {
                                valid = false;
                                break;
                            }
                            Sighting::Hit(None) => n_hits += 1,
                            Sighting::Unknown => {}
                        }
                    }
                    if !valid {
                        continue;
                    }
                    let weight = libm::pow(HIT_BIAS, n_hits as f64);
                    for k in 0..len {
                        let (rr, cc) = span(k);
                        if cells[rr][cc] == Sighting::Unknown {
                            matrix[rr][cc] += weight;
                        }
                    }
                }
            }
        }
    }

    normalize(matrix, sightings)
}

fn normalize(mut matrix: Density, sightings: &SightingGrid) -> Density {
    let total: f64 = matrix.iter().flatten().sum();
    if total == 0.0 {
        // No placement fits; spread evenly over whatever is still unknown.
        let unknown = sightings.count(|s| *s == Sighting::Unknown);
        if unknown == 0 {
            return matrix;
        }
        let uniform = 1.0 / unknown as f64;
        for (coord, s) in sightings.iter() {
            if s == Sighting::Unknown {
                matrix[coord.row as usize][coord.col as usize] = uniform;
            }
        }
        return matrix;
    }
    for v in matrix.iter_mut().flatten() {
        *v /= total;
    }
    matrix
}

/// Sample a coordinate from a probability matrix using a temperature
/// parameter. Cells with zero weight are never chosen while any cell has
/// positive weight.
pub fn sample_pdf<R: Rng + ?Sized>(pdf: &Density, temperature: f64, rng: &mut R) -> Coordinate {
    let mut adjusted = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let mut total = 0.0;
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let v = if pdf[r][c] > 0.0 {
                libm::pow(pdf[r][c], 1.0 / temperature)
            } else {
                0.0
            };
            adjusted[r][c] = v;
            total += v;
        }
    }
    if total == 0.0 {
        return Coordinate::new(
            rng.random_range(0..BOARD_SIZE),
            rng.random_range(0..BOARD_SIZE),
        );
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last = Coordinate::new(0, 0);
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            if adjusted[r][c] == 0.0 {
                continue;
            }
            last = Coordinate::new(r as u8, c as u8);
            cumulative += adjusted[r][c];
            if threshold < cumulative {
                return last;
            }
        }
    }
    last
}

/// Calculate the density and immediately pick a target from it.
pub fn calc_pdf_and_guess<R: Rng + ?Sized>(
    sightings: &SightingGrid,
    lengths: &[usize; NUM_SHIPS],
    rng: &mut R,
) -> Coordinate {
    let pdf = calc_pdf(sightings, lengths);
    sample_pdf(&pdf, DEFAULT_TEMPERATURE, rng)
}
