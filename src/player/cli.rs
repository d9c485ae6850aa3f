#![cfg(feature = "std")]

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use rand::rngs::SmallRng;

use crate::{
    common::{Coordinate, GameError},
    config::{NUM_SHIPS, SHIPS},
    grid::PrimaryGrid,
    placement,
    ship::{Orientation, ShipPlacement},
    shot::ShotOutcome,
    ui,
    view::{PlayerView, Sighting},
};

use super::Player;

/// Interactive player reading commands from a line-based input.
pub struct CliPlayer<R = BufReader<Stdin>, W = Stdout> {
    input: R,
    output: W,
}

impl CliPlayer {
    /// A player on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> CliPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the player, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        let _ = write!(self.output, "{}", text);
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }
}

/// Parse `<coordinate> <H|V>`, e.g. `A5 H`.
pub fn parse_placement(input: &str) -> Result<(Coordinate, Orientation), GameError> {
    let mut parts = input.split_whitespace();
    let coord: Coordinate = parts.next().ok_or(GameError::InvalidCoordinate)?.parse()?;
    let orientation = match parts.next().map(|s| s.to_ascii_uppercase()).as_deref() {
        Some("H") | Some("HORIZONTAL") => Orientation::Horizontal,
        Some("V") | Some("VERTICAL") => Orientation::Vertical,
        _ => return Err(GameError::InvalidCoordinate),
    };
    if parts.next().is_some() {
        return Err(GameError::InvalidCoordinate);
    }
    Ok((coord, orientation))
}

impl<R: BufRead + Send, W: Write + Send> Player for CliPlayer<R, W> {
    fn place_fleet(&mut self, rng: &mut SmallRng) -> Result<Vec<ShipPlacement>, GameError> {
        self.say("\nSHIP PLACEMENT");
        self.say("  Enter a coordinate and orientation (e.g. A5 H or C3 V).");
        self.say("  Rows A-J, columns 1-10. Press ENTER for random placement.");

        let mut grid = PrimaryGrid::new();
        let mut fleet = Vec::with_capacity(NUM_SHIPS);
        for (i, def) in SHIPS.iter().enumerate() {
            loop {
                let text = format!(
                    "\n{}\nShip {}/{}: {} (length {}) > ",
                    ui::render_primary(&grid),
                    i + 1,
                    NUM_SHIPS,
                    def.name(),
                    def.length()
                );
                let placement = match self.prompt(&text) {
                    Some(line) if !line.is_empty() => match parse_placement(&line) {
                        Ok((origin, orientation)) => {
                            ShipPlacement::new(def.code(), origin, orientation)
                        }
                        Err(e) => {
                            self.say(&format!("✗ {}", e));
                            continue;
                        }
                    },
                    _ => placement::random_placement(rng, &grid, def.code())?,
                };
                match placement::place(&mut grid, &placement) {
                    Ok(()) => {
                        self.say(&format!(
                            "✓ {} placed at {} ({:?})",
                            def.name(),
                            placement.origin,
                            placement.orientation
                        ));
                        fleet.push(placement);
                        break;
                    }
                    Err(e) => self.say(&format!("✗ {}", e)),
                }
            }
        }
        Ok(fleet)
    }

    fn select_target(&mut self, _rng: &mut SmallRng, view: &PlayerView) -> Option<Coordinate> {
        let board = ui::render_view(view);
        self.say(&board);
        loop {
            let line = self.prompt("Target (e.g. B7, 'quit' to resign) > ")?;
            if line.eq_ignore_ascii_case("quit") {
                return None;
            }
            match line.parse::<Coordinate>() {
                Ok(target) => match view.tracking.cell_at(target) {
                    Ok(Sighting::Unknown) => return Some(target),
                    _ => self.say(&format!("✗ You already fired at {}", target)),
                },
                Err(e) => self.say(&format!("✗ {}", e)),
            }
        }
    }

    fn handle_outcome(&mut self, outcome: &ShotOutcome) {
        let what = match (outcome.is_hit, outcome.destroyed) {
            (true, Some(ship)) => format!("hit and sank the {}", ship),
            (true, None) => "hit".to_string(),
            (false, _) => "missed".to_string(),
        };
        self.say(&format!("{} fired at {}: {}", outcome.shooter, outcome.target, what));
    }
}
