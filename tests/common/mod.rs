#![allow(dead_code)]

use battleship_engine::{
    Coordinate, GameState, Orientation, PlayerId, ShipCode, ShipPlacement, ShotOutcome,
};

pub fn at(row: u8, col: u8) -> Coordinate {
    Coordinate::new(row, col)
}

pub fn ship(code: ShipCode, row: u8, col: u8, orientation: Orientation) -> ShipPlacement {
    ShipPlacement::new(code, at(row, col), orientation)
}

/// Player 1's fleet: patrol boat on A1-A2, every other ship on an even row.
/// Odd rows are open water.
pub fn fleet_a() -> Vec<ShipPlacement> {
    vec![
        ship(ShipCode::PatrolBoat, 0, 0, Orientation::Horizontal),
        ship(ShipCode::AircraftCarrier, 2, 0, Orientation::Horizontal),
        ship(ShipCode::Battleship, 4, 0, Orientation::Horizontal),
        ship(ShipCode::Submarine, 6, 0, Orientation::Horizontal),
        ship(ShipCode::Destroyer, 8, 0, Orientation::Horizontal),
    ]
}

/// Player 2's fleet: submarine on (2,2)-(2,4), nothing at (0,0).
pub fn fleet_b() -> Vec<ShipPlacement> {
    vec![
        ship(ShipCode::AircraftCarrier, 9, 0, Orientation::Horizontal),
        ship(ShipCode::Battleship, 5, 9, Orientation::Vertical),
        ship(ShipCode::Submarine, 2, 2, Orientation::Horizontal),
        ship(ShipCode::Destroyer, 4, 6, Orientation::Horizontal),
        ship(ShipCode::PatrolBoat, 7, 0, Orientation::Vertical),
    ]
}

pub fn new_game() -> GameState {
    GameState::create(&fleet_a(), &fleet_b()).expect("fixture fleets are valid")
}

/// Every cell of `fleet`, in placement order.
pub fn fleet_cells(fleet: &[ShipPlacement]) -> Vec<Coordinate> {
    fleet
        .iter()
        .flat_map(|p| p.cells().expect("fixture placement in bounds"))
        .collect()
}

/// Open-water cells of [`fleet_a`] (the odd rows), for Player 2 to miss on.
pub fn water_a() -> impl Iterator<Item = Coordinate> {
    (1..10u8)
        .step_by(2)
        .flat_map(|r| (0..10u8).map(move |c| at(r, c)))
}

/// Player 1 sinks all of Player 2's fleet while Player 2 only misses.
/// Returns the outcome of the last shot.
pub fn play_player1_win(state: &mut GameState) -> ShotOutcome {
    let mut misses = water_a();
    let targets = fleet_cells(&fleet_b());
    let last = targets.len() - 1;
    for (i, target) in targets.into_iter().enumerate() {
        let outcome = state.fire_shot(PlayerId::Player1, target).unwrap();
        if i == last {
            return outcome;
        }
        state
            .fire_shot(PlayerId::Player2, misses.next().unwrap())
            .unwrap();
    }
    unreachable!()
}
