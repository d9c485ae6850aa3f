#![cfg(feature = "std")]

//! Persistence capability for the game service.
//!
//! The engine never talks to storage itself. [`GameService`](crate::GameService)
//! is handed a [`GameStore`] and writes the complete game record back after
//! every successful transition.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::common::PlayerId;
use crate::game::{GameState, Phase};

pub type GameId = u64;

/// Display name used for a computer-controlled seat.
pub const COMPUTER_NAME: &str = "Computer";

/// Who sits in the second seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opponent {
    Human(String),
    Computer,
}

/// A stored game: the engine state plus the bookkeeping around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub player1: String,
    pub player2: Opponent,
    pub state: GameState,
    pub created_at: u64,
    /// Unix seconds of the last accepted shot, or creation time.
    pub last_move_at: u64,
}

impl GameRecord {
    pub fn name_of(&self, seat: PlayerId) -> &str {
        match (seat, &self.player2) {
            (PlayerId::Player1, _) => &self.player1,
            (PlayerId::Player2, Opponent::Human(name)) => name,
            (PlayerId::Player2, Opponent::Computer) => COMPUTER_NAME,
        }
    }

    pub fn is_computer(&self, seat: PlayerId) -> bool {
        seat == PlayerId::Player2 && self.player2 == Opponent::Computer
    }

    /// Seat held by the human called `name`, if any.
    pub fn seat_of(&self, name: &str) -> Option<PlayerId> {
        PlayerId::BOTH
            .into_iter()
            .find(|&seat| !self.is_computer(seat) && self.name_of(seat) == name)
    }

    pub fn is_active(&self) -> bool {
        self.state.phase() != Phase::Finished
    }

    /// A human is to move and nobody has fired for at least `threshold`.
    pub fn is_dormant(&self, now: u64, threshold: Duration) -> bool {
        self.state
            .current_player()
            .is_some_and(|seat| !self.is_computer(seat))
            && now.saturating_sub(self.last_move_at) >= threshold.as_secs()
    }
}

/// A registered player. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: Option<String>,
}

/// A win by a human player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub game: GameId,
    pub winner: String,
    pub ships_remaining: usize,
    pub recorded_at: u64,
}

#[async_trait::async_trait]
pub trait GameStore: Send + Sync {
    /// Reserve a fresh game identifier.
    async fn next_id(&self) -> anyhow::Result<GameId>;
    async fn load(&self, id: GameId) -> anyhow::Result<Option<GameRecord>>;
    /// Insert or replace the record with `record.id`.
    async fn save(&self, record: &GameRecord) -> anyhow::Result<()>;
    async fn list(&self) -> anyhow::Result<Vec<GameRecord>>;
    async fn add_score(&self, score: Score) -> anyhow::Result<()>;
    async fn scores(&self) -> anyhow::Result<Vec<Score>>;
    /// Register `user` unless the name is taken. Returns `false` if it was.
    async fn insert_user(&self, user: &User) -> anyhow::Result<bool>;
    async fn load_user(&self, name: &str) -> anyhow::Result<Option<User>>;
}

/// Process-local store keeping bincode-encoded records.
#[derive(Default)]
pub struct InMemoryStore {
    games: Mutex<BTreeMap<GameId, Vec<u8>>>,
    scores: Mutex<Vec<Score>>,
    users: Mutex<BTreeMap<String, User>>,
    next_id: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn decode(bytes: &[u8]) -> anyhow::Result<GameRecord> {
        let record: GameRecord = bincode::deserialize(bytes)?;
        record.state.check_invariants()?;
        Ok(record)
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("store lock poisoned")
}

#[async_trait::async_trait]
impl GameStore for InMemoryStore {
    async fn next_id(&self) -> anyhow::Result<GameId> {
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn load(&self, id: GameId) -> anyhow::Result<Option<GameRecord>> {
        let games = self.games.lock().map_err(poisoned)?;
        games.get(&id).map(|b| Self::decode(b)).transpose()
    }

    async fn save(&self, record: &GameRecord) -> anyhow::Result<()> {
        let bytes = bincode::serialize(record)?;
        self.games.lock().map_err(poisoned)?.insert(record.id, bytes);
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<GameRecord>> {
        let games = self.games.lock().map_err(poisoned)?;
        games.values().map(|b| Self::decode(b)).collect()
    }

    async fn add_score(&self, score: Score) -> anyhow::Result<()> {
        self.scores.lock().map_err(poisoned)?.push(score);
        Ok(())
    }

    async fn scores(&self) -> anyhow::Result<Vec<Score>> {
        Ok(self.scores.lock().map_err(poisoned)?.clone())
    }

    async fn insert_user(&self, user: &User) -> anyhow::Result<bool> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if users.contains_key(&user.name) {
            return Ok(false);
        }
        users.insert(user.name.clone(), user.clone());
        Ok(true)
    }

    async fn load_user(&self, name: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().map_err(poisoned)?.get(name).cloned())
    }
}
