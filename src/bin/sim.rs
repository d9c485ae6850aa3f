use battleship_engine::{run_match, AiPlayer, GameState, Player, PlayerId};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    battleship_engine::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);
    let mut players: [Box<dyn Player>; 2] =
        [Box::new(AiPlayer::new()), Box::new(AiPlayer::new())];
    let fleet1 = players[0].place_fleet(&mut rng1)?;
    let fleet2 = players[1].place_fleet(&mut rng2)?;

    let mut state = GameState::create(&fleet1, &fleet2)?;
    let mut shots_rng = SmallRng::seed_from_u64(seed1 ^ seed2.rotate_left(32));
    let winner = run_match(&mut state, &mut players, &mut shots_rng)?;

    let summary = |seat: PlayerId| {
        json!({
            "shots": state.shots_fired(seat),
            "ships_remaining": state.ships_remaining(seat),
        })
    };
    let result = json!({
        "player1": summary(PlayerId::Player1),
        "player2": summary(PlayerId::Player2),
        "winner": winner.map(|w| match w {
            PlayerId::Player1 => "player1",
            PlayerId::Player2 => "player2",
        }),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
