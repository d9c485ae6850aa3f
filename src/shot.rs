//! Shot resolution against the opponent's primary grid.

use crate::common::{Coordinate, GameError, PlayerId};
use crate::game::{GameState, MoveRecord, Phase};
use crate::grid::{Cell, Mark};
use crate::ship::ShipCode;

/// What a single shot did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotOutcome {
    pub shooter: PlayerId,
    pub target: Coordinate,
    pub is_hit: bool,
    /// Set only on the shot that sank this ship.
    pub destroyed: Option<ShipCode>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

impl ShotOutcome {
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.is_some()
    }
}

/// Fire `shooter`'s shot at `target` on the opponent's grid.
///
/// Everything that can fail is checked before the first write: a rejected
/// shot leaves grids, fleet counters, history and the turn pointer as they
/// were. On success the opponent's cell is struck, the shooter's tracking
/// grid is marked, the move is appended to history, and then either the
/// game finishes (opponent fleet gone) or the turn passes to the opponent.
pub fn resolve_shot(
    state: &mut GameState,
    shooter: PlayerId,
    target: Coordinate,
) -> Result<ShotOutcome, GameError> {
    match state.phase() {
        Phase::Setup => return Err(GameError::GameNotStarted),
        Phase::Finished => return Err(GameError::GameAlreadyFinished),
        Phase::InProgress => {}
    }
    if state.current_player() != Some(shooter) {
        return Err(GameError::NotYourTurn);
    }
    target.ensure_in_bounds()?;

    let target_player = shooter.opponent();
    let (own, enemy) = state.boards_mut(shooter);
    if enemy.primary.cell_at(target)?.is_struck() || own.tracking.cell_at(target)? != Mark::Unknown
    {
        return Err(GameError::AlreadyShot {
            row: target.row as usize,
            col: target.col as usize,
        });
    }

    let (is_hit, destroyed) = match enemy.primary.strike(target)? {
        Cell::Hit(ship) => {
            let sunk = enemy.fleet.register_hit(ship);
            own.tracking.record(target, Mark::Hit(ship))?;
            (true, sunk.then_some(ship))
        }
        _ => {
            own.tracking.record(target, Mark::Miss)?;
            (false, None)
        }
    };
    let fleet_gone = enemy.fleet.all_sunk();

    state.push_move(MoveRecord {
        shooter,
        target,
        is_hit,
        destroyed,
    });
    log::debug!(
        "{} fired at {}: {}{}",
        shooter,
        target,
        if is_hit { "hit" } else { "miss" },
        if destroyed.is_some() { ", ship destroyed" } else { "" }
    );

    let winner = if fleet_gone {
        state.finish_with_winner(shooter);
        Some(shooter)
    } else {
        state.pass_turn_to(target_player);
        None
    };

    Ok(ShotOutcome {
        shooter,
        target,
        is_hit,
        destroyed,
        game_over: winner.is_some(),
        winner,
    })
}
