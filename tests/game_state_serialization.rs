use battleship_engine::{
    random_fleet, Coordinate, GameError, GameState, Mark, PlayerId, BOARD_SIZE,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn played_game(seed: u64, shots: usize) -> GameState {
    let mut rng = SmallRng::seed_from_u64(seed);
    let fleet1 = random_fleet(&mut rng).unwrap();
    let fleet2 = random_fleet(&mut rng).unwrap();
    let mut state = GameState::create(&fleet1, &fleet2).unwrap();
    for _ in 0..shots {
        let Some(shooter) = state.current_player() else { break };
        let target = Coordinate::new(
            rng.random_range(0..BOARD_SIZE),
            rng.random_range(0..BOARD_SIZE),
        );
        let _ = state.fire_shot(shooter, target);
    }
    state
}

proptest! {
    #[test]
    fn game_state_roundtrip(seed in any::<u64>(), shots in 0usize..120) {
        let state = played_game(seed, shots);
        let bytes = state.to_bytes().unwrap();
        let restored = GameState::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&state, &restored);
        prop_assert_eq!(state.inspect(PlayerId::Player1), restored.inspect(PlayerId::Player1));
    }

    #[test]
    fn garbage_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = GameState::from_bytes(&bytes);
    }
}

#[test]
fn tampered_snapshot_is_corrupt() {
    let mut state = played_game(3, 10);
    // a cancelled game cannot also be won; forge one through serde
    state.cancel();
    let mut value = serde_json::to_value(&state).unwrap();
    value["winner"] = serde_json::json!("Player1");
    let forged: GameState = serde_json::from_value(value).unwrap();

    let err = forged.check_invariants().unwrap_err();
    assert!(matches!(err, GameError::CorruptState(_)));

    let bytes = bincode::serialize(&forged).unwrap();
    let err = GameState::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GameError>(),
        Some(GameError::CorruptState(_))
    ));
}

#[test]
fn forged_history_is_corrupt() {
    let state = played_game(11, 20);
    let mut value = serde_json::to_value(&state).unwrap();
    value["history"] = serde_json::json!([]);
    let forged: GameState = serde_json::from_value(value).unwrap();
    assert!(matches!(
        forged.check_invariants(),
        Err(GameError::CorruptState(_))
    ));
}

#[test]
fn truncated_bytes_fail_to_decode() {
    let bytes = played_game(5, 30).to_bytes().unwrap();
    assert!(GameState::from_bytes(&bytes[..bytes.len() / 2]).is_err());
}

fn forge(state: &GameState, edit: impl FnOnce(&mut serde_json::Value)) -> GameState {
    let mut value = serde_json::to_value(state).unwrap();
    edit(&mut value);
    serde_json::from_value(value).unwrap()
}

fn assert_corrupt(state: &GameState) {
    assert!(
        matches!(state.check_invariants(), Err(GameError::CorruptState(_))),
        "accepted {state:?}"
    );
}

#[test]
fn finished_needs_winner_or_cancel() {
    let state = played_game(21, 10);
    assert_corrupt(&forge(&state, |v| v["phase"] = serde_json::json!("Finished")));
}

#[test]
fn open_game_cannot_be_cancelled() {
    let state = played_game(22, 10);
    assert_corrupt(&forge(&state, |v| v["cancelled"] = serde_json::json!(true)));
}

#[test]
fn sunk_fleet_cannot_stay_in_progress() {
    let mut state = played_game(23, 0);
    while let Some(shooter) = state.current_player() {
        let tracking = state.board(shooter).tracking();
        let target = Coordinate::all()
            .find(|&c| tracking.cell_at(c) == Ok(Mark::Unknown))
            .unwrap();
        state.fire_shot(shooter, target).unwrap();
    }
    state.check_invariants().unwrap();
    assert_corrupt(&forge(&state, |v| {
        v["phase"] = serde_json::json!("InProgress");
        v["winner"] = serde_json::Value::Null;
    }));
}

#[test]
fn setup_has_no_history() {
    let state = played_game(24, 6);
    assert!(!state.history().is_empty());
    assert_corrupt(&forge(&state, |v| v["phase"] = serde_json::json!("Setup")));
}

#[test]
fn legitimate_states_pass() {
    GameState::new().check_invariants().unwrap();
    let mut setup_cancelled = GameState::new();
    setup_cancelled.cancel();
    setup_cancelled.check_invariants().unwrap();
    let mut cancelled = played_game(25, 12);
    cancelled.cancel();
    cancelled.check_invariants().unwrap();
}
