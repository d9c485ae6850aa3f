mod common;

use battleship_engine::{
    fire_shot, Cell, GameError, Mark, Phase, PlayerId, ShipCode, NUM_SHIPS,
};
use common::{at, new_game, play_player1_win, water_a};

#[test]
fn miss_passes_the_turn() {
    let mut state = new_game();
    let outcome = fire_shot(&mut state, PlayerId::Player1, at(0, 0)).unwrap();

    assert!(!outcome.is_hit);
    assert_eq!(outcome.destroyed, None);
    assert!(!outcome.game_over);
    assert_eq!(outcome.winner, None);
    assert_eq!(state.current_player(), Some(PlayerId::Player2));
    assert_eq!(
        state.board(PlayerId::Player1).tracking().cell_at(at(0, 0)),
        Ok(Mark::Miss)
    );
    assert_eq!(
        state.board(PlayerId::Player2).primary().cell_at(at(0, 0)),
        Ok(Cell::Miss)
    );
    assert_eq!(state.history().len(), 1);
}

#[test]
fn third_hit_sinks_the_submarine() {
    let mut state = new_game();
    let mut misses = water_a();
    let before = state.ships_remaining(PlayerId::Player2);

    for col in 2..4 {
        let outcome = state.fire_shot(PlayerId::Player1, at(2, col)).unwrap();
        assert!(outcome.is_hit);
        assert!(!outcome.is_destroyed());
        assert_eq!(state.ships_remaining(PlayerId::Player2), before);
        state
            .fire_shot(PlayerId::Player2, misses.next().unwrap())
            .unwrap();
    }
    let outcome = state.fire_shot(PlayerId::Player1, at(2, 4)).unwrap();
    assert!(outcome.is_hit);
    assert_eq!(outcome.destroyed, Some(ShipCode::Submarine));
    assert_eq!(state.ships_remaining(PlayerId::Player2), before - 1);
    assert!(!outcome.game_over);
    assert_eq!(state.current_player(), Some(PlayerId::Player2));
}

#[test]
fn repeat_shot_changes_nothing() {
    let mut state = new_game();
    state.fire_shot(PlayerId::Player1, at(2, 2)).unwrap();
    state.fire_shot(PlayerId::Player2, at(1, 0)).unwrap();
    let snapshot = state.clone();

    assert_eq!(
        state.fire_shot(PlayerId::Player1, at(2, 2)),
        Err(GameError::AlreadyShot { row: 2, col: 2 })
    );
    assert_eq!(state, snapshot);
    assert_eq!(state.current_player(), Some(PlayerId::Player1));
    assert_eq!(
        state.board(PlayerId::Player2).fleet().remaining(ShipCode::Submarine),
        2
    );
}

#[test]
fn repeat_miss_is_rejected() {
    let mut state = new_game();
    state.fire_shot(PlayerId::Player1, at(0, 0)).unwrap();
    state.fire_shot(PlayerId::Player2, at(1, 0)).unwrap();
    let snapshot = state.clone();
    assert_eq!(
        state.fire_shot(PlayerId::Player1, at(0, 0)),
        Err(GameError::AlreadyShot { row: 0, col: 0 })
    );
    assert_eq!(state, snapshot);
}

#[test]
fn out_of_turn_shot_changes_nothing() {
    let mut state = new_game();
    let snapshot = state.clone();
    assert_eq!(
        state.fire_shot(PlayerId::Player2, at(0, 0)),
        Err(GameError::NotYourTurn)
    );
    assert_eq!(state, snapshot);
    assert_eq!(state.current_player(), Some(PlayerId::Player1));
}

#[test]
fn out_of_bounds_shot_changes_nothing() {
    let mut state = new_game();
    let snapshot = state.clone();
    assert_eq!(
        state.fire_shot(PlayerId::Player1, at(0, 10)),
        Err(GameError::OutOfBounds { row: 0, col: 10 })
    );
    assert_eq!(state, snapshot);
}

#[test]
fn sinking_the_last_ship_wins() {
    let mut state = new_game();
    let outcome = play_player1_win(&mut state);

    assert!(outcome.is_hit);
    assert!(outcome.game_over);
    assert_eq!(outcome.winner, Some(PlayerId::Player1));
    assert!(outcome.destroyed.is_some());
    assert_eq!(state.phase(), Phase::Finished);
    assert_eq!(state.winner(), Some(PlayerId::Player1));
    assert_eq!(state.current_player(), None);
    assert_eq!(state.ships_remaining(PlayerId::Player2), 0);
    assert_eq!(state.ships_remaining(PlayerId::Player1), NUM_SHIPS);
    assert!(!state.is_cancelled());
    state.check_invariants().unwrap();

    let snapshot = state.clone();
    assert_eq!(
        state.fire_shot(PlayerId::Player2, at(1, 9)),
        Err(GameError::GameAlreadyFinished)
    );
    assert_eq!(
        state.fire_shot(PlayerId::Player1, at(0, 0)),
        Err(GameError::GameAlreadyFinished)
    );
    assert_eq!(state, snapshot);
}

#[test]
fn history_matches_outcomes() {
    let mut state = new_game();
    let first = state.fire_shot(PlayerId::Player1, at(2, 2)).unwrap();
    let second = state.fire_shot(PlayerId::Player2, at(0, 0)).unwrap();
    let history = state.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].shooter, PlayerId::Player1);
    assert_eq!(history[0].target, first.target);
    assert!(history[0].is_hit);
    assert_eq!(history[1].shooter, PlayerId::Player2);
    assert_eq!(history[1].is_hit, second.is_hit);
    assert!(second.is_hit);
    assert_eq!(state.shots_fired(PlayerId::Player1), 1);
    assert_eq!(state.shots_fired(PlayerId::Player2), 1);
}
