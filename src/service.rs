#![cfg(feature = "std")]

//! Async game service: the request-handling surface over the engine.
//!
//! Every operation on a game runs under that game's own lock, loads the
//! record, applies one engine transition and saves the record back. Games
//! never share a lock, so different games proceed in parallel.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::anyhow;
use rand::rngs::SmallRng;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::{
    common::{Coordinate, PlayerId},
    config::ServiceConfig,
    game::{CancelStatus, GameState},
    player::{AiPlayer, Player},
    ship::ShipPlacement,
    shot::ShotOutcome,
    store::{GameId, GameRecord, GameStore, Opponent, Score, User},
    view::PlayerView,
};

/// Failures that belong to the service rather than the game rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    GameNotFound(GameId),
    UserNotFound(String),
    /// A user with this name is already registered.
    UserExists(String),
    /// `computer_move` called while a human is to move.
    NotComputerTurn,
    /// The computer found nothing left to shoot at.
    NoTargetAvailable,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::GameNotFound(id) => write!(f, "Game {} not found", id),
            ServiceError::UserNotFound(name) => write!(f, "User {} does not exist!", name),
            ServiceError::UserExists(_) => write!(f, "A User with that name already exists!"),
            ServiceError::NotComputerTurn => write!(f, "It is not the computer's turn"),
            ServiceError::NoTargetAvailable => write!(f, "No target left to fire at"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Outcome of an accepted shot plus the message shown to players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub outcome: ShotOutcome,
    pub message: String,
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

type LockTable = Mutex<HashMap<GameId, Arc<AsyncMutex<()>>>>;

/// Exclusive access to one game. The table entry is removed once nobody
/// holds or awaits the lock.
struct GameGuard<'a> {
    table: &'a LockTable,
    id: GameId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for GameGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        if let Ok(mut locks) = self.table.lock() {
            if locks
                .get(&self.id)
                .is_some_and(|lock| Arc::strong_count(lock) == 1)
            {
                locks.remove(&self.id);
            }
        }
    }
}

pub struct GameService<S: GameStore> {
    store: S,
    config: ServiceConfig,
    locks: LockTable,
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S, config: ServiceConfig) -> Self {
        Self {
            store,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Number of games whose lock is currently held or awaited.
    pub fn locked_games(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }

    async fn lock_game(&self, id: GameId) -> anyhow::Result<GameGuard<'_>> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .map_err(|_| anyhow!("game lock table poisoned"))?;
            locks.entry(id).or_default().clone()
        };
        let mut guard = GameGuard {
            table: &self.locks,
            id,
            guard: None,
        };
        guard.guard = Some(lock.lock_owned().await);
        Ok(guard)
    }

    async fn require_user(&self, name: &str) -> anyhow::Result<User> {
        self.store
            .load_user(name)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(name.to_string()).into())
    }

    /// Register a player. Names are unique.
    pub async fn create_user(&self, name: &str, email: Option<&str>) -> anyhow::Result<User> {
        let user = User {
            name: name.to_string(),
            email: email.map(str::to_string),
        };
        if !self.store.insert_user(&user).await? {
            return Err(ServiceError::UserExists(user.name).into());
        }
        log::info!("user {} created", user.name);
        Ok(user)
    }

    async fn load(&self, id: GameId) -> anyhow::Result<GameRecord> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| ServiceError::GameNotFound(id).into())
    }

    /// Validate both fleets and store a started game with Player 1 to move.
    pub async fn create_game(
        &self,
        player1: &str,
        player2: Opponent,
        fleet1: &[ShipPlacement],
        fleet2: &[ShipPlacement],
    ) -> anyhow::Result<GameRecord> {
        self.require_user(player1).await?;
        if let Opponent::Human(name) = &player2 {
            self.require_user(name).await?;
        }
        let state = GameState::create(fleet1, fleet2)?;
        let id = self.store.next_id().await?;
        let now = now_secs();
        let record = GameRecord {
            id,
            player1: player1.to_string(),
            player2,
            state,
            created_at: now,
            last_move_at: now,
        };
        self.store.save(&record).await?;
        log::info!(
            "game {} created: {} vs {}",
            id,
            record.name_of(PlayerId::Player1),
            record.name_of(PlayerId::Player2)
        );
        Ok(record)
    }

    /// Fire a shot for `shooter` in game `id`.
    pub async fn fire_shot(
        &self,
        id: GameId,
        shooter: PlayerId,
        target: Coordinate,
    ) -> anyhow::Result<MoveReport> {
        let _guard = self.lock_game(id).await?;
        let mut record = self.load(id).await?;
        self.apply_shot(&mut record, shooter, target).await
    }

    /// Let the computer take its turn in game `id`.
    pub async fn computer_move(&self, id: GameId, rng: &mut SmallRng) -> anyhow::Result<MoveReport> {
        let _guard = self.lock_game(id).await?;
        let mut record = self.load(id).await?;
        let seat = match record.state.current_player() {
            Some(seat) if record.is_computer(seat) => seat,
            _ => return Err(ServiceError::NotComputerTurn.into()),
        };
        let view = record.state.inspect(seat);
        let target = AiPlayer::new()
            .select_target(rng, &view)
            .ok_or(ServiceError::NoTargetAvailable)?;
        self.apply_shot(&mut record, seat, target).await
    }

    async fn apply_shot(
        &self,
        record: &mut GameRecord,
        shooter: PlayerId,
        target: Coordinate,
    ) -> anyhow::Result<MoveReport> {
        let outcome = record.state.fire_shot(shooter, target)?;
        record.last_move_at = now_secs();
        self.store.save(record).await?;

        let shooter_name = record.name_of(shooter).to_string();
        let message = match outcome.winner {
            Some(winner) => {
                log::info!("game {}: {} wins", record.id, shooter_name);
                if !record.is_computer(winner) {
                    let score = Score {
                        game: record.id,
                        winner: shooter_name.clone(),
                        ships_remaining: record.state.ships_remaining(winner),
                        recorded_at: record.last_move_at,
                    };
                    // The win is already saved; a lost score must not undo it.
                    if let Err(e) = self.store.add_score(score).await {
                        log::error!("game {}: failed to record score: {:#}", record.id, e);
                    }
                }
                format!("Game over! {} wins!", shooter_name)
            }
            None => format!(
                "{} has moved. {}'s turn",
                shooter_name,
                record.name_of(shooter.opponent())
            ),
        };
        Ok(MoveReport { outcome, message })
    }

    /// Cancel game `id`. Finished games are reported, not changed.
    pub async fn cancel_game(&self, id: GameId) -> anyhow::Result<(CancelStatus, String)> {
        let _guard = self.lock_game(id).await?;
        let mut record = self.load(id).await?;
        let status = record.state.cancel();
        let message = match status {
            CancelStatus::Cancelled => {
                self.store.save(&record).await?;
                log::info!("game {} cancelled", id);
                "Game Cancelled!"
            }
            CancelStatus::AlreadyFinished => "Game already over!",
            CancelStatus::AlreadyCancelled => "Game already cancelled!",
        };
        Ok((status, message.to_string()))
    }

    /// `viewer`'s projection of game `id`.
    pub async fn inspect(&self, id: GameId, viewer: PlayerId) -> anyhow::Result<PlayerView> {
        let _guard = self.lock_game(id).await?;
        Ok(self.load(id).await?.state.inspect(viewer))
    }

    /// Games `name` plays in that are neither won nor cancelled.
    pub async fn active_games_for(&self, name: &str) -> anyhow::Result<Vec<GameRecord>> {
        self.require_user(name).await?;
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|r| r.is_active() && r.seat_of(name).is_some())
            .collect())
    }

    pub async fn scores(&self) -> anyhow::Result<Vec<Score>> {
        self.store.scores().await
    }

    pub async fn scores_for(&self, name: &str) -> anyhow::Result<Vec<Score>> {
        self.require_user(name).await?;
        Ok(self
            .store
            .scores()
            .await?
            .into_iter()
            .filter(|s| s.winner == name)
            .collect())
    }

    /// Games waiting on a human who has not fired for longer than the
    /// configured threshold, as of `now` (unix seconds).
    pub async fn dormant_games(&self, now: u64) -> anyhow::Result<Vec<GameRecord>> {
        let dormant: Vec<GameRecord> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|r| r.is_dormant(now, self.config.dormant_after))
            .collect();
        log::info!("{} dormant game(s)", dormant.len());
        Ok(dormant)
    }
}
