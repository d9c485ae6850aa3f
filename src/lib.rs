#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod ai;
mod common;
mod config;
mod fleet;
pub mod game;
pub mod grid;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
pub mod player;
#[cfg(feature = "std")]
pub mod service;
mod ship;
pub mod shot;
#[cfg(feature = "std")]
pub mod store;
#[cfg(feature = "std")]
pub mod ui;
pub mod view;

pub use ai::{calc_pdf, calc_pdf_and_guess, sample_pdf};
pub use common::*;
pub use config::*;
pub use fleet::FleetStatus;
pub use game::{
    cancel_game, create_game, fire_shot, CancelStatus, GameState, MoveRecord, Phase, PlayerBoard,
};
pub use grid::{Cell, Grid, Mark, PrimaryGrid, TrackingGrid};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use placement::{place_ship, random_fleet, random_placement};
pub use player::{run_match, AiPlayer, Player};
#[cfg(feature = "std")]
pub use player::CliPlayer;
#[cfg(feature = "std")]
pub use service::{GameService, MoveReport, ServiceError};
pub use ship::*;
pub use shot::{resolve_shot, ShotOutcome};
#[cfg(feature = "std")]
pub use store::{GameId, GameRecord, GameStore, InMemoryStore, Opponent, Score, User};
pub use view::{inspect, PlayerView, Sighting, SightingGrid};
