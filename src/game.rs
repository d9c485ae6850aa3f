//! Game state machine: setup, turn order, win detection and cancellation.

use alloc::vec::Vec;

use crate::common::{Coordinate, GameError, PlayerId, ValidationError};
use crate::config::{NUM_SHIPS, TOTAL_SHIP_CELLS};
use crate::fleet::FleetStatus;
use crate::grid::{Cell, Mark, PrimaryGrid, TrackingGrid};
use crate::placement;
use crate::ship::{ShipCode, ShipPlacement};
use crate::shot::{self, ShotOutcome};

/// Lifecycle phase. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Setup,
    InProgress,
    Finished,
}

/// Result of a cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelStatus {
    Cancelled,
    /// The game had already been won; nothing changed.
    AlreadyFinished,
    /// The game had already been cancelled; nothing changed.
    AlreadyCancelled,
}

/// One entry of the append-only shot log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    pub shooter: PlayerId,
    pub target: Coordinate,
    pub is_hit: bool,
    pub destroyed: Option<ShipCode>,
}

/// Everything one player owns: ship grid, view of the opponent, fleet health
/// and the placements that produced the ship grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerBoard {
    pub(crate) primary: PrimaryGrid,
    pub(crate) tracking: TrackingGrid,
    pub(crate) fleet: FleetStatus,
    pub(crate) placements: [Option<ShipPlacement>; NUM_SHIPS],
}

impl PlayerBoard {
    fn new() -> Self {
        Self {
            primary: PrimaryGrid::new(),
            tracking: TrackingGrid::new(),
            fleet: FleetStatus::new(),
            placements: [None; NUM_SHIPS],
        }
    }

    pub fn primary(&self) -> &PrimaryGrid {
        &self.primary
    }

    pub fn tracking(&self) -> &TrackingGrid {
        &self.tracking
    }

    pub fn fleet(&self) -> &FleetStatus {
        &self.fleet
    }

    pub fn placements(&self) -> &[Option<ShipPlacement>; NUM_SHIPS] {
        &self.placements
    }

    pub fn fleet_placed(&self) -> bool {
        self.placements.iter().all(Option::is_some)
    }
}

/// Complete working set of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    boards: [PlayerBoard; 2],
    current_player: PlayerId,
    phase: Phase,
    cancelled: bool,
    winner: Option<PlayerId>,
    history: Vec<MoveRecord>,
}

impl GameState {
    /// An empty game in `Setup`, waiting for both fleets.
    pub fn new() -> Self {
        Self {
            boards: [PlayerBoard::new(), PlayerBoard::new()],
            current_player: PlayerId::Player1,
            phase: Phase::Setup,
            cancelled: false,
            winner: None,
            history: Vec::new(),
        }
    }

    /// Validate and place both fleets, then start the game with Player 1
    /// to move. Every failure from both fleets is reported together.
    pub fn create(
        player1_fleet: &[ShipPlacement],
        player2_fleet: &[ShipPlacement],
    ) -> Result<Self, GameError> {
        let mut state = Self::new();
        let mut errors = ValidationError::default();
        for (player, fleet) in [
            (PlayerId::Player1, player1_fleet),
            (PlayerId::Player2, player2_fleet),
        ] {
            match placement::build_fleet(fleet) {
                Ok(grid) => {
                    let board = &mut state.boards[player.index()];
                    board.primary = grid;
                    for p in fleet {
                        board.placements[p.ship.index()] = Some(*p);
                    }
                }
                Err(failures) => {
                    for (ship, error) in failures {
                        errors.push(player, ship, error);
                    }
                }
            }
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }
        state.start()?;
        Ok(state)
    }

    /// Place one ship for `player` during setup. All-or-nothing.
    pub fn place_ship(
        &mut self,
        player: PlayerId,
        placement: ShipPlacement,
    ) -> Result<(), GameError> {
        match self.phase {
            Phase::Setup => {}
            Phase::InProgress => return Err(GameError::SetupClosed),
            Phase::Finished => return Err(GameError::GameAlreadyFinished),
        }
        let board = &mut self.boards[player.index()];
        if board.placements[placement.ship.index()].is_some() {
            return Err(GameError::ShipAlreadyPlaced(placement.ship));
        }
        placement::place(&mut board.primary, &placement)?;
        board.placements[placement.ship.index()] = Some(placement);
        Ok(())
    }

    /// Leave setup once both fleets are complete. Player 1 moves first.
    pub fn start(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::Setup => {}
            Phase::InProgress => return Err(GameError::SetupClosed),
            Phase::Finished => return Err(GameError::GameAlreadyFinished),
        }
        for player in PlayerId::BOTH {
            if !self.board(player).fleet_placed() {
                return Err(GameError::FleetIncomplete(player));
            }
        }
        self.phase = Phase::InProgress;
        self.current_player = PlayerId::Player1;
        log::debug!("game started, {} to move", self.current_player);
        Ok(())
    }

    /// Fire a shot for `shooter`. See [`shot::resolve_shot`].
    pub fn fire_shot(
        &mut self,
        shooter: PlayerId,
        target: Coordinate,
    ) -> Result<ShotOutcome, GameError> {
        shot::resolve_shot(self, shooter, target)
    }

    /// End the game without a winner. Finished games are left alone.
    pub fn cancel(&mut self) -> CancelStatus {
        if self.phase == Phase::Finished {
            return if self.cancelled {
                CancelStatus::AlreadyCancelled
            } else {
                CancelStatus::AlreadyFinished
            };
        }
        self.cancelled = true;
        self.phase = Phase::Finished;
        log::debug!("game cancelled");
        CancelStatus::Cancelled
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whose turn it is; `None` unless the game is in progress.
    pub fn current_player(&self) -> Option<PlayerId> {
        (self.phase == Phase::InProgress).then_some(self.current_player)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn board(&self, player: PlayerId) -> &PlayerBoard {
        &self.boards[player.index()]
    }

    pub fn ships_remaining(&self, player: PlayerId) -> usize {
        self.board(player).fleet.ships_remaining()
    }

    /// Shots fired so far by `player`.
    pub fn shots_fired(&self, player: PlayerId) -> usize {
        self.history.iter().filter(|m| m.shooter == player).count()
    }

    /// `(shooter's board, target's board)`, both mutable.
    pub(crate) fn boards_mut(
        &mut self,
        shooter: PlayerId,
    ) -> (&mut PlayerBoard, &mut PlayerBoard) {
        let [one, two] = &mut self.boards;
        match shooter {
            PlayerId::Player1 => (one, two),
            PlayerId::Player2 => (two, one),
        }
    }

    pub(crate) fn push_move(&mut self, record: MoveRecord) {
        self.history.push(record);
    }

    pub(crate) fn pass_turn_to(&mut self, player: PlayerId) {
        self.current_player = player;
    }

    pub(crate) fn finish_with_winner(&mut self, winner: PlayerId) {
        self.phase = Phase::Finished;
        self.winner = Some(winner);
        log::debug!("{} sank the whole enemy fleet", winner);
    }

    /// Re-derive every state invariant from the grids. Used on snapshots
    /// handed back by storage.
    pub fn check_invariants(&self) -> Result<(), GameError> {
        let started = self.phase == Phase::InProgress || !self.history.is_empty();
        for player in PlayerId::BOTH {
            let board = self.board(player);
            let mut placed_cells = 0;
            for (idx, slot) in board.placements.iter().enumerate() {
                let Some(p) = slot else { continue };
                if p.ship.index() != idx {
                    return Err(GameError::CorruptState("placement stored under wrong ship"));
                }
                for cell in p.cells()? {
                    if board.primary.cell_at(cell)?.ship() != Some(p.ship) {
                        return Err(GameError::CorruptState("grid disagrees with placement"));
                    }
                    placed_cells += 1;
                }
            }
            if board.primary.ship_cells() != placed_cells {
                return Err(GameError::CorruptState("grid holds unplaced ship cells"));
            }
            if started && placed_cells != TOTAL_SHIP_CELLS {
                return Err(GameError::CorruptState("fleet incomplete after start"));
            }
            for ship in ShipCode::ALL {
                let hits = board.primary.count(|c| *c == Cell::Hit(ship));
                if board.fleet.remaining(ship) as usize + hits != ship.length() {
                    return Err(GameError::CorruptState("fleet counter disagrees with hits"));
                }
            }
            let enemy = self.board(player.opponent());
            for (coord, mark) in board.tracking.iter() {
                let expected = match enemy.primary.cell_at(coord)? {
                    Cell::Hit(ship) => Mark::Hit(ship),
                    Cell::Miss => Mark::Miss,
                    Cell::Empty | Cell::Occupied(_) => Mark::Unknown,
                };
                if mark != expected {
                    return Err(GameError::CorruptState("tracking grid disagrees with shots"));
                }
            }
        }
        let struck: usize = self
            .boards
            .iter()
            .map(|b| b.primary.count(Cell::is_struck))
            .sum();
        if struck != self.history.len() {
            return Err(GameError::CorruptState("history length disagrees with shots"));
        }
        match self.phase {
            Phase::Setup if !self.history.is_empty() => {
                return Err(GameError::CorruptState("shots recorded during setup"));
            }
            Phase::Setup | Phase::InProgress if self.cancelled => {
                return Err(GameError::CorruptState("cancelled game still open"));
            }
            Phase::InProgress
                if PlayerId::BOTH
                    .iter()
                    .any(|&p| self.board(p).fleet.all_sunk()) =>
            {
                return Err(GameError::CorruptState("game in progress with a sunk fleet"));
            }
            Phase::Finished if self.winner.is_none() && !self.cancelled => {
                return Err(GameError::CorruptState("finished without winner or cancel"));
            }
            _ => {}
        }
        match self.winner {
            Some(w) if self.phase != Phase::Finished || !self.board(w.opponent()).fleet.all_sunk() => {
                Err(GameError::CorruptState("winner without a sunk fleet"))
            }
            Some(_) if self.cancelled => Err(GameError::CorruptState("cancelled game has a winner")),
            _ => Ok(()),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl GameState {
    /// Encode the full state as an opaque blob for storage.
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a blob produced by [`GameState::to_bytes`] and verify it.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let state: GameState = bincode::deserialize(bytes)?;
        state.check_invariants()?;
        Ok(state)
    }
}

/// Create a started game from two fleets.
pub fn create_game(
    player1_fleet: &[ShipPlacement],
    player2_fleet: &[ShipPlacement],
) -> Result<GameState, GameError> {
    GameState::create(player1_fleet, player2_fleet)
}

/// Fire a shot on a loaded game.
pub fn fire_shot(
    state: &mut GameState,
    shooter: PlayerId,
    target: Coordinate,
) -> Result<ShotOutcome, GameError> {
    state.fire_shot(shooter, target)
}

/// Cancel a game, returning the resulting state and what happened.
pub fn cancel_game(mut state: GameState) -> (GameState, CancelStatus) {
    let status = state.cancel();
    (state, status)
}
