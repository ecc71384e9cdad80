//! Game state module - manages the complete game state
//!
//! This module ties together the board, the falling piece, the piece queue, the
//! rail path and the train. It owns every timer and is the single entry point
//! for commands ([`GameState::apply_action`]) and time ([`GameState::tick`]).

use crate::board::{footprint, Board};
use crate::pieces::SPAWN_POSITION;
use crate::rail::RailPath;
use crate::rng::PieceQueue;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TrainSnapshot};
use crate::train::TrainNavigator;
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Absolute board cells covered by the piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        footprint(self.kind, self.rotation, self.x, self.y)
    }

    /// Same piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece one quarter turn clockwise, anchor unchanged
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }
}

/// Outcome of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// The piece moved down one row.
    Moved,
    /// The piece could not move and was committed under this id.
    Committed(PieceId),
    /// Nothing to drop.
    Idle,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Tetromino>,
    queue: PieceQueue,
    rail: RailPath,
    train: TrainNavigator,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    score: u32,
    drop_timer_ms: u32,
    /// Countdown until the next piece appears, if one is scheduled.
    spawn_timer_ms: Option<u32>,
    events: Vec<CoreEvent>,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed and default timings
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    pub fn with_config(seed: u32, config: GameConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            active: None,
            queue: PieceQueue::new(seed),
            rail: RailPath::new(),
            train: TrainNavigator::new(),
            episode_id: 0,
            score: 0,
            drop_timer_ms: 0,
            spawn_timer_ms: None,
            events: Vec::new(),
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_next();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.queue.seed()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Footprint of the falling piece (for rendering)
    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        self.active.map(|p| p.cells())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rail_path(&self) -> &RailPath {
        &self.rail
    }

    pub fn train(&self) -> &TrainNavigator {
        &self.train
    }

    /// Piece that the next spawn will use
    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek()
    }

    /// True while a spawn is scheduled but the piece has not appeared yet
    pub fn spawn_pending(&self) -> bool {
        self.spawn_timer_ms.is_some()
    }

    /// Take and clear all queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.queue.peek();
        out.rail.clear();
        out.rail.extend_from_slice(self.rail.waypoints());
        out.train = TrainSnapshot::from(&self.train);
        out.score = self.score;
        out.placed_count = self.board.placed().len();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.started = self.started;
        out.episode_id = self.episode_id;
        out.seed = self.queue.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Place a new falling piece of `kind` at the spawn anchor.
    ///
    /// If the spawn footprint is blocked the game is over: no piece is
    /// installed and a single `GameOver` event is queued.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        if self.game_over || self.active.is_some() {
            return false;
        }

        let piece = Tetromino::new(kind);
        self.spawn_timer_ms = None;
        self.drop_timer_ms = 0;

        if self.board.test_collision(&piece, 0, 0) {
            self.game_over = true;
            self.events.push(CoreEvent::GameOver { score: self.score });
            log::info!(
                "game over: {:?} blocked at spawn, score {}, {} pieces placed",
                kind,
                self.score,
                self.board.placed().len()
            );
            return false;
        }

        self.active = Some(piece);
        self.events.push(CoreEvent::PieceSpawned { kind });
        log::debug!("spawned {:?} at ({}, {})", kind, piece.x, piece.y);
        true
    }

    /// Spawn the queued piece
    pub fn spawn_next(&mut self) -> bool {
        if self.game_over || self.active.is_some() {
            return false;
        }
        let kind = self.queue.draw();
        self.spawn(kind)
    }

    /// Move the active piece by (dx, dy) if nothing is in the way
    pub fn move_by(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if self.board.test_collision(&active, dx, dy) {
            return false;
        }
        self.active = Some(active.shifted(dx, dy));
        true
    }

    /// Rotate the active piece clockwise in place. No kicks: a colliding
    /// rotation is simply not applied.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let candidate = active.rotated();
        if self.board.test_collision(&candidate, 0, 0) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// One gravity step: move down, or commit if the piece is resting.
    pub fn tick_descend(&mut self) -> Descent {
        if self.active.is_none() {
            return Descent::Idle;
        }
        if self.move_by(0, 1) {
            return Descent::Moved;
        }
        match self.commit() {
            Some(id) => Descent::Committed(id),
            None => Descent::Idle,
        }
    }

    /// Freeze the active piece into the board, rebuild the rail path and
    /// schedule the next spawn.
    pub fn commit(&mut self) -> Option<PieceId> {
        let active = self.active.take()?;
        self.drop_timer_ms = 0;
        self.spawn_timer_ms = Some(self.config.spawn_delay_ms);

        let Some(id) = self.board.place(&active) else {
            log::warn!(
                "commit rejected for {:?} at ({}, {}); piece discarded",
                active.kind,
                active.x,
                active.y
            );
            return None;
        };

        self.rail.rebuild(self.board.placed());
        self.score += self.config.score_per_commit;
        self.events.push(CoreEvent::PieceCommitted {
            piece_id: id,
            kind: active.kind,
        });
        log::debug!(
            "committed piece {} ({:?} {:?}) at ({}, {}), score {}",
            id,
            active.kind,
            active.rotation,
            active.x,
            active.y,
            self.score
        );
        Some(id)
    }

    /// Main game tick - advance every timer by `elapsed_ms`.
    ///
    /// Returns true if the falling piece moved, was committed or spawned.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.started || self.paused {
            return false;
        }

        let mut changed = false;
        if !self.game_over {
            if let Some(remaining) = self.spawn_timer_ms {
                if remaining > elapsed_ms {
                    self.spawn_timer_ms = Some(remaining - elapsed_ms);
                } else {
                    self.spawn_timer_ms = None;
                    changed |= self.spawn_next();
                }
            }

            if self.active.is_some() {
                let interval = self.config.fall_interval_ms.max(1);
                self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
                while self.drop_timer_ms >= interval {
                    self.drop_timer_ms -= interval;
                    match self.tick_descend() {
                        Descent::Moved => changed = true,
                        Descent::Committed(_) => {
                            changed = true;
                            break;
                        }
                        Descent::Idle => break,
                    }
                }
            }
        }

        self.train
            .advance(elapsed_ms, &self.rail, &self.config, &mut self.events);
        changed
    }

    /// Commands only steer a live falling piece.
    fn accepts_commands(&self) -> bool {
        !self.paused && !self.game_over && self.active.is_some()
    }

    /// Apply a game action. Returns whether it had an effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.accepts_commands() && self.move_by(-1, 0),
            GameAction::MoveRight => self.accepts_commands() && self.move_by(1, 0),
            GameAction::MoveDown => self.accepts_commands() && self.move_by(0, 1),
            GameAction::Rotate => self.accepts_commands() && self.rotate(),
            GameAction::Pause => self.set_paused(true),
            GameAction::Resume => self.set_paused(false),
            GameAction::TogglePause => self.set_paused(!self.paused),
            GameAction::Restart => {
                let seed = self.queue.seed();
                let config = self.config;
                let next_episode = self.episode_id.wrapping_add(1);
                *self = Self::with_config(seed, config);
                self.episode_id = next_episode;
                self.start();
                log::info!("restarted: episode {}, seed {}", next_episode, seed);
                true
            }
        }
    }

    fn set_paused(&mut self, paused: bool) -> bool {
        if self.paused == paused {
            return false;
        }
        self.paused = paused;
        log::debug!("paused = {}", paused);
        true
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
