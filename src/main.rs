#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_engine::{
    init_logging, run_match, ui, AiPlayer, CliPlayer, GameError, GameService, GameState,
    InMemoryStore, Opponent, Player, PlayerId, ServiceConfig,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Watch two computer players fight it out.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Play against the computer on this terminal.
    Play {
        #[arg(long, default_value = "Player")]
        name: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { seed } => {
            println!("Starting local AI vs AI game...");
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = make_rng(seed);
            let mut players: [Box<dyn Player>; 2] =
                [Box::new(AiPlayer::new()), Box::new(AiPlayer::new())];
            let fleet1 = players[0].place_fleet(&mut rng)?;
            let fleet2 = players[1].place_fleet(&mut rng)?;
            let mut state = GameState::create(&fleet1, &fleet2)?;
            let winner = run_match(&mut state, &mut players, &mut rng)?;

            for seat in PlayerId::BOTH {
                println!("\n=== {} ===", seat);
                print!("{}", ui::render_view(&state.inspect(seat)));
            }
            match winner {
                Some(w) => println!("\n{} wins after {} shots", w, state.shots_fired(w)),
                None => println!("\nGame ended without a winner"),
            }
        }
        Commands::Play { name, seed } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = make_rng(seed);
            play_vs_computer(&name, &mut rng).await?;
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn play_vs_computer(name: &str, rng: &mut SmallRng) -> anyhow::Result<()> {
    let service = GameService::new(InMemoryStore::new(), ServiceConfig::from_env());
    let mut human = CliPlayer::stdio();
    let mut computer = AiPlayer::new();

    service.create_user(name, None).await?;
    let fleet1 = human.place_fleet(rng)?;
    let fleet2 = computer.place_fleet(rng)?;
    let record = service
        .create_game(name, Opponent::Computer, &fleet1, &fleet2)
        .await?;
    let id = record.id;
    println!("Good luck playing Battleship!");

    loop {
        let view = service.inspect(id, PlayerId::Player1).await?;
        let report = match view.current_player {
            None => {
                print!("{}", ui::render_view(&view));
                return Ok(());
            }
            Some(PlayerId::Player1) => match human.select_target(rng, &view) {
                Some(target) => match service.fire_shot(id, PlayerId::Player1, target).await {
                    Ok(report) => report,
                    Err(e) if e.downcast_ref::<GameError>().is_some() => {
                        println!("✗ {}", e);
                        continue;
                    }
                    Err(e) => return Err(e),
                },
                None => {
                    let (_, message) = service.cancel_game(id).await?;
                    println!("{}", message);
                    continue;
                }
            },
            Some(PlayerId::Player2) => service.computer_move(id, rng).await?,
        };
        human.handle_outcome(&report.outcome);
        println!("{}", report.message);
    }
}
