mod common;

use battleship_engine::{
    cancel_game, create_game, CancelStatus, GameError, GameState, Orientation, Phase, PlayerId,
    ShipCode, Sighting, NUM_SHIPS,
};
use common::{at, fleet_a, fleet_b, new_game, play_player1_win, ship, water_a};

#[test]
fn created_game_starts_with_player1() {
    let state = create_game(&fleet_a(), &fleet_b()).unwrap();
    assert_eq!(state.phase(), Phase::InProgress);
    assert_eq!(state.current_player(), Some(PlayerId::Player1));
    assert_eq!(state.winner(), None);
    assert!(state.history().is_empty());
    for player in PlayerId::BOTH {
        assert_eq!(state.ships_remaining(player), NUM_SHIPS);
        assert!(state.board(player).fleet_placed());
    }
    state.check_invariants().unwrap();
}

#[test]
fn create_reports_failures_for_both_players() {
    let mut bad_a = fleet_a();
    bad_a[1] = ship(ShipCode::AircraftCarrier, 0, 7, Orientation::Horizontal);
    let mut bad_b = fleet_b();
    bad_b.pop();

    let err = create_game(&bad_a, &bad_b).unwrap_err();
    let v = match err {
        GameError::Validation(v) => v,
        other => panic!("expected validation error, got {other:?}"),
    };
    let p1: Vec<_> = v.for_player(PlayerId::Player1).collect();
    let p2: Vec<_> = v.for_player(PlayerId::Player2).collect();
    assert_eq!(p1.len(), 1);
    assert_eq!(p1[0].ship, Some(ShipCode::AircraftCarrier));
    assert!(matches!(p1[0].error, GameError::OutOfBounds { .. }));
    assert_eq!(p2.len(), 1);
    assert_eq!(p2[0].error, GameError::MissingShip(ShipCode::PatrolBoat));
}

#[test]
fn setup_accepts_ships_one_at_a_time() {
    let mut state = GameState::new();
    assert_eq!(state.phase(), Phase::Setup);
    assert_eq!(state.current_player(), None);
    assert_eq!(
        state.fire_shot(PlayerId::Player1, at(0, 0)),
        Err(GameError::GameNotStarted)
    );

    for p in fleet_a() {
        state.place_ship(PlayerId::Player1, p).unwrap();
    }
    assert_eq!(
        state.place_ship(PlayerId::Player1, fleet_a()[0]),
        Err(GameError::ShipAlreadyPlaced(ShipCode::PatrolBoat))
    );
    assert_eq!(state.start(), Err(GameError::FleetIncomplete(PlayerId::Player2)));

    let overlap = ship(ShipCode::Submarine, 9, 1, Orientation::Horizontal);
    for p in fleet_b() {
        state.place_ship(PlayerId::Player2, p).unwrap();
    }
    state.start().unwrap();
    assert_eq!(state.current_player(), Some(PlayerId::Player1));
    assert_eq!(
        state.place_ship(PlayerId::Player2, overlap),
        Err(GameError::SetupClosed)
    );
    assert_eq!(state, new_game());
}

#[test]
fn rejected_setup_placement_keeps_grid() {
    let mut state = GameState::new();
    state
        .place_ship(
            PlayerId::Player1,
            ship(ShipCode::Battleship, 0, 0, Orientation::Horizontal),
        )
        .unwrap();
    let snapshot = state.clone();
    let res = state.place_ship(
        PlayerId::Player1,
        ship(ShipCode::Destroyer, 0, 3, Orientation::Vertical),
    );
    assert!(matches!(res, Err(GameError::Overlap { .. })));
    assert_eq!(state, snapshot);
}

#[test]
fn cancel_ends_without_winner() {
    let mut state = new_game();
    state.fire_shot(PlayerId::Player1, at(0, 0)).unwrap();

    let (mut state, status) = cancel_game(state);
    assert_eq!(status, CancelStatus::Cancelled);
    assert_eq!(state.phase(), Phase::Finished);
    assert!(state.is_cancelled());
    assert_eq!(state.winner(), None);
    assert_eq!(state.current_player(), None);
    assert_eq!(
        state.fire_shot(PlayerId::Player2, at(1, 0)),
        Err(GameError::GameAlreadyFinished)
    );
    assert_eq!(state.cancel(), CancelStatus::AlreadyCancelled);
    state.check_invariants().unwrap();
}

#[test]
fn cancel_after_win_is_informational() {
    let mut state = new_game();
    play_player1_win(&mut state);
    let snapshot = state.clone();
    let (state, status) = cancel_game(state);
    assert_eq!(status, CancelStatus::AlreadyFinished);
    assert_eq!(state, snapshot);
    assert_eq!(state.winner(), Some(PlayerId::Player1));
}

#[test]
fn cancel_during_setup() {
    let mut state = GameState::new();
    assert_eq!(state.cancel(), CancelStatus::Cancelled);
    assert_eq!(
        state.place_ship(
            PlayerId::Player1,
            ship(ShipCode::Battleship, 0, 0, Orientation::Horizontal)
        ),
        Err(GameError::GameAlreadyFinished)
    );
}

#[test]
fn view_hides_unsunk_ships() {
    let mut state = new_game();
    let mut misses = water_a();
    // two hits on the submarine, one on the patrol boat
    for target in [at(2, 2), at(2, 3), at(7, 0)] {
        state.fire_shot(PlayerId::Player1, target).unwrap();
        state
            .fire_shot(PlayerId::Player2, misses.next().unwrap())
            .unwrap();
    }
    let view = state.inspect(PlayerId::Player1);
    assert_eq!(view.tracking.cell_at(at(2, 2)), Ok(Sighting::Hit(None)));
    assert_eq!(view.tracking.cell_at(at(7, 0)), Ok(Sighting::Hit(None)));
    assert_eq!(view.tracking.cell_at(at(9, 9)), Ok(Sighting::Unknown));
    assert!(view.opponent_sunk.is_empty());
    assert_eq!(view.opponent_ships_remaining, NUM_SHIPS);
    assert!(view.is_my_turn());

    // sink the submarine: every hit on it is now named
    state.fire_shot(PlayerId::Player1, at(2, 4)).unwrap();
    let view = state.inspect(PlayerId::Player1);
    for col in 2..5 {
        assert_eq!(
            view.tracking.cell_at(at(2, col)),
            Ok(Sighting::Hit(Some(ShipCode::Submarine)))
        );
    }
    assert_eq!(view.tracking.cell_at(at(7, 0)), Ok(Sighting::Hit(None)));
    assert_eq!(view.opponent_sunk, vec![ShipCode::Submarine]);
    assert_eq!(view.opponent_lengths_afloat(), [5, 4, 0, 3, 2]);
    assert!(!view.is_my_turn());
}

#[test]
fn view_shows_own_fleet_in_full() {
    let mut state = new_game();
    state.fire_shot(PlayerId::Player1, at(2, 2)).unwrap();
    let view = state.inspect(PlayerId::Player2);
    assert_eq!(view.viewer, PlayerId::Player2);
    assert_eq!(view.own_grid, *state.board(PlayerId::Player2).primary());
    assert_eq!(view.own_fleet.remaining(ShipCode::Submarine), 2);
    assert!(view.own_placements.iter().all(Option::is_some));
    assert_eq!(view.history.len(), 1);
    assert!(view.tracking.iter().all(|(_, s)| s == Sighting::Unknown));
}
