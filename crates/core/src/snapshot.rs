use serde::Serialize;

use crate::game_state::Tetromino;
use crate::train::TrainNavigator;
use crate::types::{PieceKind, Rotation, Waypoint, BOARD_HEIGHT, BOARD_WIDTH, DOCK_X, DOCK_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub cells: [(i8, i8); 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainSnapshot {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub path_index: usize,
    pub in_flight: bool,
}

impl From<&TrainNavigator> for TrainSnapshot {
    fn from(value: &TrainNavigator) -> Self {
        let (x, y) = value.position();
        Self {
            x,
            y,
            heading: value.heading(),
            path_index: value.path_index(),
            in_flight: value.is_in_flight(),
        }
    }
}

impl Default for TrainSnapshot {
    fn default() -> Self {
        Self {
            x: DOCK_X,
            y: DOCK_Y,
            heading: 0.0,
            path_index: 0,
            in_flight: false,
        }
    }
}

/// Plain-data view of a game, written one JSON line per sample in headless mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// Kind codes, row-major; 0 is empty.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub rail: Vec<Waypoint>,
    pub train: TrainSnapshot,
    pub score: u32,
    pub placed_count: usize,
    pub paused: bool,
    pub game_over: bool,
    pub started: bool,
    pub episode_id: u32,
    pub seed: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: PieceKind::I,
            rail: Vec::new(),
            train: TrainSnapshot::default(),
            score: 0,
            placed_count: 0,
            paused: false,
            game_over: false,
            started: false,
            episode_id: 0,
            seed: 0,
        }
    }
}
