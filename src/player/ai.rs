use alloc::vec::Vec;
use rand::rngs::SmallRng;

use crate::{
    ai,
    common::{Coordinate, GameError},
    placement,
    ship::ShipPlacement,
    view::{PlayerView, Sighting},
};

use super::Player;

/// Computer player that places randomly and shoots by probability density.
pub struct AiPlayer {
    temperature: f64,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self {
            temperature: ai::DEFAULT_TEMPERATURE,
        }
    }

    /// Use a different sampling temperature; higher is more random.
    pub fn with_temperature(temperature: f64) -> Self {
        Self { temperature }
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for AiPlayer {
    fn place_fleet(&mut self, rng: &mut SmallRng) -> Result<Vec<ShipPlacement>, GameError> {
        Ok(placement::random_fleet(rng)?.to_vec())
    }

    fn select_target(&mut self, rng: &mut SmallRng, view: &PlayerView) -> Option<Coordinate> {
        if view.tracking.count(|s| *s == Sighting::Unknown) == 0 {
            return None;
        }
        let pdf = ai::calc_pdf(&view.tracking, &view.opponent_lengths_afloat());
        let target = ai::sample_pdf(&pdf, self.temperature, rng);
        match view.tracking.cell_at(target) {
            Ok(Sighting::Unknown) => Some(target),
            // Uniform fallback may land on a known cell; take the first unknown.
            _ => view
                .tracking
                .iter()
                .find(|(_, s)| *s == Sighting::Unknown)
                .map(|(c, _)| c),
        }
    }
}
