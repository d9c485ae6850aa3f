//! Player strategies
//!
//! A `Player` decides where its fleet goes and where to shoot next. It never
//! touches game state directly; callers feed it the player's [`PlayerView`]
//! and apply its choices through the engine.
//! - AiPlayer: probability-density targeting
//! - CliPlayer: interactive command-line player

use alloc::boxed::Box;
use alloc::vec::Vec;
use rand::rngs::SmallRng;

use crate::{
    common::{Coordinate, GameError, PlayerId},
    game::GameState,
    ship::ShipPlacement,
    shot::ShotOutcome,
    view::PlayerView,
};

/// Interface implemented by different player types.
pub trait Player: Send {
    /// Choose placements for the whole fleet.
    fn place_fleet(&mut self, rng: &mut SmallRng) -> Result<Vec<ShipPlacement>, GameError>;

    /// Choose the next target. `None` means the player gives up.
    fn select_target(&mut self, rng: &mut SmallRng, view: &PlayerView) -> Option<Coordinate>;

    /// Inform the player of the result of a shot, theirs or the opponent's.
    fn handle_outcome(&mut self, _outcome: &ShotOutcome) {}
}

/// Drive a started game to its end with one strategy per seat.
///
/// Each turn the player to move sees only its own projection. A player that
/// returns no target cancels the game. Returns the winner, if any.
pub fn run_match(
    state: &mut GameState,
    players: &mut [Box<dyn Player>; 2],
    rng: &mut SmallRng,
) -> Result<Option<PlayerId>, GameError> {
    while let Some(seat) = state.current_player() {
        let view = state.inspect(seat);
        match players[seat.index()].select_target(rng, &view) {
            Some(target) => {
                let outcome = state.fire_shot(seat, target)?;
                for player in players.iter_mut() {
                    player.handle_outcome(&outcome);
                }
            }
            None => {
                state.cancel();
            }
        }
    }
    Ok(state.winner())
}

pub mod ai;
pub use ai::AiPlayer;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::CliPlayer;
