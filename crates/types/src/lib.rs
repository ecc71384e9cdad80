//! Shared types - data structures and constants used by every crate
//!
//! Everything in here is plain data: the core logic, the terminal front-end and
//! the headless trace all speak in these types.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 18 rows (indexed 0-17)
//! - **Spawn anchor**: (4, 0), top-centre
//!
//! # World Geometry
//!
//! Rail waypoints and the train live in pixel space. Cell `(x, y)` has its
//! top-left corner at `(GRID_OFFSET_X + x * BLOCK_SIZE, GRID_OFFSET_Y + y * BLOCK_SIZE)`.
//!
//! | Constant | Value |
//! |----------|-------|
//! | `BLOCK_SIZE` | 30 px |
//! | `GRID_OFFSET_X` | 37.5 px |
//! | `GRID_OFFSET_Y` | 80 px |
//!
//! # Timing
//!
//! Timing values are in milliseconds and live in [`GameConfig`]:
//!
//! | Field | Default | Description |
//! |-------|---------|-------------|
//! | `fall_interval_ms` | 1000 | Period of the descent timer |
//! | `spawn_delay_ms` | 500 | Gap between a commit and the next spawn |
//! | `min_hop_ms` | 1000 | Floor on a single train hop |
//! | `hop_pause_ms` | 300 | Rest between hops |
//! | `loop_pause_ms` | 500 | Rest after the train wraps to the path start |
//! | `dock_poll_ms` | 1000 | Retry interval while the rail is empty |
//!
//! # Examples
//!
//! ```
//! use tetris_train_types::{Direction, GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//! assert_eq!(Direction::from_str("junction"), Some(Direction::Junction));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 18);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (18 rows)
pub const BOARD_HEIGHT: u8 = 18;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Spawn anchor column: top-centre of the board.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Spawn anchor row.
pub const SPAWN_Y: i8 = 0;

/// Edge length of one grid cell in world pixels.
pub const BLOCK_SIZE: f32 = 30.0;

/// World x of the board's left edge.
pub const GRID_OFFSET_X: f32 = (375.0 - BOARD_WIDTH as f32 * BLOCK_SIZE) / 2.0;

/// World y of the board's top edge.
pub const GRID_OFFSET_Y: f32 = 80.0;

/// Where the train waits while no rail exists: just left of the board, four rows up from the bottom.
pub const DOCK_X: f32 = GRID_OFFSET_X - 50.0;

/// See [`DOCK_X`].
pub const DOCK_Y: f32 = GRID_OFFSET_Y + (BOARD_HEIGHT as f32 - 4.0) * BLOCK_SIZE + BLOCK_SIZE / 2.0;

/// Added to the travel angle so the train sprite (drawn nose-up) faces forward.
pub const HEADING_OFFSET: f32 = -std::f32::consts::FRAC_PI_2;

/// Default search radius for nearest-waypoint queries, in pixels.
pub const NEAREST_WAYPOINT_DISTANCE: f32 = 50.0;

/// Two placed pieces connect when any of their waypoints are this close.
pub const CONNECT_DISTANCE: f32 = BLOCK_SIZE * 1.5;

/// Consecutive waypoints closer than this are merged by path optimisation.
pub const MIN_WAYPOINT_SPACING: f32 = 5.0;

/// Tunable timing, scoring and train parameters.
///
/// Defaults give one gravity step per second and a 40px/s train. Board
/// dimensions are compile-time constants and not part of the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Descent timer period.
    pub fall_interval_ms: u32,
    /// Delay between a commit and the next spawn.
    pub spawn_delay_ms: u32,
    /// Points added per committed piece.
    pub score_per_commit: u32,
    /// Train cruising speed in pixels per second.
    pub train_speed_px_per_s: f32,
    /// Lower bound on the duration of a single hop.
    pub min_hop_ms: u32,
    /// Rest between two hops.
    pub hop_pause_ms: u32,
    /// Rest after the train wraps back to waypoint 0.
    pub loop_pause_ms: u32,
    /// Poll interval while parked at the dock.
    pub dock_poll_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fall_interval_ms: 1000,
            spawn_delay_ms: 500,
            score_per_commit: 10,
            train_speed_px_per_s: 40.0,
            min_hop_ms: 1000,
            hop_pause_ms: 300,
            loop_pause_ms: 500,
            dock_poll_ms: 1000,
        }
    }
}

/// The seven tetromino piece kinds
///
/// Each kind lays a different rail pattern:
/// - **I**: straight track
/// - **O**: closed square loop
/// - **T**: three-way junction
/// - **S** / **Z**: S- and Z-shaped doglegs
/// - **J** / **L**: corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_train_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Non-zero code used in the `u8` occupancy grid of snapshots.
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]; `0` and unknown codes are empty.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }
}

/// The four rotation states, in clockwise order
///
/// The game only ever rotates clockwise: North → East → South → West → North.
/// `North` is the spawn orientation (rotation index 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_train_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotation index in `0..4`.
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an index, taken modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Direction tag carried by every rail waypoint
///
/// Cardinal tags give the direction of travel leaving the waypoint;
/// `Junction` marks a branch point of a T piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Junction,
}

impl Direction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Direction::North),
            "south" | "s" => Some(Direction::South),
            "east" | "e" => Some(Direction::East),
            "west" | "w" => Some(Direction::West),
            "junction" => Some(Direction::Junction),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Junction => "junction",
        }
    }

    /// Screen-space angle in radians (y grows downward); junctions face east.
    pub fn angle(&self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Direction::North => -FRAC_PI_2,
            Direction::East | Direction::Junction => 0.0,
            Direction::South => FRAC_PI_2,
            Direction::West => PI,
        }
    }
}

/// A point on the rail network in world pixels plus its direction tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
}

impl Waypoint {
    pub const fn new(x: f32, y: f32, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    /// Straight-line distance to a point.
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}

/// Commands accepted from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Rotate piece 90° clockwise, single in-place attempt
    Rotate,
    /// Suspend timers
    Pause,
    /// Continue from the suspended state
    Resume,
    /// Pause when running, resume when paused
    TogglePause,
    /// Replace the whole game with a fresh one (same seed)
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_train_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("moveDown"), Some(GameAction::MoveDown));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "togglepause" => Some(GameAction::TogglePause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
        }
    }
}

/// Index of a placed piece in the board's placement arena.
pub type PieceId = usize;

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(id)`: Covered by the placed piece `id`
pub type Cell = Option<PieceId>;

/// One-shot notifications queued by the core for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CoreEvent {
    PieceSpawned { kind: PieceKind },
    PieceCommitted { piece_id: PieceId, kind: PieceKind },
    TrainArrived { path_index: usize },
    /// The freshly spawned piece collided immediately. Emitted exactly once.
    GameOver { score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings() {
        let c = GameConfig::default();
        assert_eq!(c.fall_interval_ms, 1000);
        assert_eq!(c.spawn_delay_ms, 500);
        assert_eq!(c.min_hop_ms, 1000);
        assert_eq!(c.hop_pause_ms, 300);
        assert_eq!(c.loop_pause_ms, 500);
        assert_eq!(c.dock_poll_ms, 1000);
        assert_eq!(c.train_speed_px_per_s, 40.0);
    }

    #[test]
    fn geometry_constants() {
        assert_eq!(SPAWN_X, 4);
        assert_eq!(GRID_OFFSET_X, 37.5);
        assert_eq!(DOCK_X, -12.5);
        assert_eq!(DOCK_Y, 515.0);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let c: GameConfig = serde_json::from_str(r#"{"fall_interval_ms": 250}"#).unwrap();
        assert_eq!(c.fall_interval_ms, 250);
        assert_eq!(c.spawn_delay_ms, 500);
    }

    #[test]
    fn rotation_index_roundtrip() {
        for i in 0..4 {
            assert_eq!(Rotation::from_index(i).index(), i);
        }
        assert_eq!(Rotation::from_index(5), Rotation::East);
    }
}
