#![cfg(feature = "std")]

//! Terminal rendering of grids, player views and AI densities.

use std::fmt::Write;

use crate::{
    ai::Density,
    config::{BOARD_SIZE, SHIPS},
    game::Phase,
    grid::{Cell, PrimaryGrid},
    view::{PlayerView, Sighting, SightingGrid},
};

fn header(out: &mut String) {
    out.push_str("    ╔══════════════════════════════════╗\n");
    out.push_str("    ║   ");
    for c in 0..BOARD_SIZE as usize {
        let _ = write!(out, " {:>2}", c + 1);
    }
    out.push_str(" ║\n");
    out.push_str("    ╠══════════════════════════════════╣\n");
}

fn footer(out: &mut String) {
    out.push_str("    ╚══════════════════════════════════╝\n");
}

/// Render a primary grid, showing ship segments.
pub fn render_primary(grid: &PrimaryGrid) -> String {
    let mut out = String::new();
    header(&mut out);
    for (r, row) in grid.rows().iter().enumerate() {
        let _ = write!(out, "    ║ {} ", (b'A' + r as u8) as char);
        for cell in row.iter() {
            let ch = match cell {
                Cell::Empty => '.',
                Cell::Occupied(_) => 'S',
                Cell::Hit(_) => 'X',
                Cell::Miss => 'o',
            };
            let _ = write!(out, "  {}", ch);
        }
        out.push_str(" ║\n");
    }
    footer(&mut out);
    out.push_str("    Legend: S=Ship  X=Hit  o=Miss  .=Water\n");
    out
}

/// Render a tracking view. Sunk ships show `#`.
pub fn render_tracking(grid: &SightingGrid) -> String {
    let mut out = String::new();
    header(&mut out);
    for (r, row) in grid.rows().iter().enumerate() {
        let _ = write!(out, "    ║ {} ", (b'A' + r as u8) as char);
        for cell in row.iter() {
            let ch = match cell {
                Sighting::Unknown => '.',
                Sighting::Miss => 'o',
                Sighting::Hit(None) => 'X',
                Sighting::Hit(Some(_)) => '#',
            };
            let _ = write!(out, "  {}", ch);
        }
        out.push_str(" ║\n");
    }
    footer(&mut out);
    out.push_str("    Legend: X=Hit  #=Sunk  o=Miss  .=Unknown\n");
    out
}

/// Render the opponent view (top), the player's own grid (bottom) and the
/// fleet status.
pub fn render_view(view: &PlayerView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Opponent waters:");
    out.push_str(&render_tracking(&view.tracking));
    let _ = writeln!(out, "\nYour fleet ({}):", view.viewer);
    out.push_str(&render_primary(&view.own_grid));
    let _ = writeln!(out, "\n    Ships:");
    for def in SHIPS.iter() {
        let status = if view.own_fleet.is_destroyed(def.code()) {
            "SUNK"
        } else {
            "Active"
        };
        let _ = writeln!(out, "      {} ({}): {}", def.name(), def.length(), status);
    }
    let _ = writeln!(
        out,
        "    Opponent ships remaining: {}",
        view.opponent_ships_remaining
    );
    out.push_str(&status_line(view));
    out.push('\n');
    out
}

/// One-line summary of where the game stands.
pub fn status_line(view: &PlayerView) -> String {
    match (view.phase, view.winner, view.cancelled) {
        (Phase::Setup, ..) => "Waiting for fleets".to_string(),
        (Phase::Finished, _, true) => "Game cancelled".to_string(),
        (Phase::Finished, Some(w), _) if w == view.viewer => "You win!".to_string(),
        (Phase::Finished, Some(w), _) => format!("Game over! {} wins!", w),
        (Phase::Finished, None, _) => "Game over".to_string(),
        (Phase::InProgress, ..) if view.is_my_turn() => "Your turn".to_string(),
        (Phase::InProgress, ..) => "Waiting for opponent".to_string(),
    }
}

/// Render a normalized probability distribution matrix.
pub fn render_probability(pdf: &Density) -> String {
    let mut out = String::from("\nProbability distribution:\n   ");
    for c in 0..BOARD_SIZE as usize {
        let _ = write!(out, " {:>4}", c + 1);
    }
    out.push('\n');
    for (r, row) in pdf.iter().enumerate() {
        let _ = write!(out, "{:>2} ", (b'A' + r as u8) as char);
        for v in row.iter() {
            let _ = write!(out, " {:4.2}", v);
        }
        out.push('\n');
    }
    out
}
