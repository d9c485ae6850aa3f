//! Read-only projection of a game for one player.

use alloc::vec::Vec;
use core::fmt;

use crate::common::PlayerId;
use crate::config::NUM_SHIPS;
use crate::fleet::FleetStatus;
use crate::game::{GameState, MoveRecord, Phase};
use crate::grid::{Grid, Mark, PrimaryGrid};
use crate::ship::{ShipCode, ShipPlacement};

/// A tracking-grid cell as the viewer is allowed to see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Sighting {
    #[default]
    Unknown,
    Miss,
    /// The ship is named only once it has been destroyed.
    Hit(Option<ShipCode>),
}

pub type SightingGrid = Grid<Sighting>;

/// What `viewer` may know about a game: their own grids in full, nothing of
/// the opponent's primary grid beyond what their shots revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub viewer: PlayerId,
    pub phase: Phase,
    pub current_player: Option<PlayerId>,
    pub winner: Option<PlayerId>,
    pub cancelled: bool,
    pub own_grid: PrimaryGrid,
    pub own_placements: [Option<ShipPlacement>; NUM_SHIPS],
    pub own_fleet: FleetStatus,
    pub tracking: SightingGrid,
    pub opponent_ships_remaining: usize,
    pub opponent_sunk: Vec<ShipCode>,
    pub history: Vec<MoveRecord>,
}

/// Build the projection of `state` seen by `viewer`.
pub fn inspect(state: &GameState, viewer: PlayerId) -> PlayerView {
    let own = state.board(viewer);
    let enemy_fleet = state.board(viewer.opponent()).fleet();
    let tracking = own.tracking().map(|mark| match mark {
        Mark::Unknown => Sighting::Unknown,
        Mark::Miss => Sighting::Miss,
        Mark::Hit(ship) => Sighting::Hit(enemy_fleet.is_destroyed(ship).then_some(ship)),
    });
    PlayerView {
        viewer,
        phase: state.phase(),
        current_player: state.current_player(),
        winner: state.winner(),
        cancelled: state.is_cancelled(),
        own_grid: *own.primary(),
        own_placements: *own.placements(),
        own_fleet: *own.fleet(),
        tracking,
        opponent_ships_remaining: enemy_fleet.ships_remaining(),
        opponent_sunk: enemy_fleet.sunk().collect(),
        history: state.history().to_vec(),
    }
}

impl GameState {
    /// See [`inspect`].
    pub fn inspect(&self, viewer: PlayerId) -> PlayerView {
        inspect(self, viewer)
    }
}

impl fmt::Debug for Grid<Sighting> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SightingGrid:")?;
        for row in self.rows().iter() {
            for cell in row.iter() {
                let ch = match cell {
                    Sighting::Unknown => '.',
                    Sighting::Miss => 'o',
                    Sighting::Hit(None) => 'X',
                    Sighting::Hit(Some(_)) => '#',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl PlayerView {
    pub fn is_my_turn(&self) -> bool {
        self.current_player == Some(self.viewer)
    }

    /// Lengths of opponent ships not yet sunk; zero for sunk ships.
    pub fn opponent_lengths_afloat(&self) -> [usize; NUM_SHIPS] {
        core::array::from_fn(|i| {
            let ship = ShipCode::ALL[i];
            if self.opponent_sunk.contains(&ship) {
                0
            } else {
                ship.length()
            }
        })
    }
}
