//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens in a game of Tetris Train lives here:
//! falling-piece collision and placement, the rail path built out of placed
//! pieces, and the train that loops along it. There is no I/O; the terminal
//! front-end and the headless trace both drive a [`GameState`] through
//! [`GameState::tick`] and [`GameState::apply_action`] and read it back through
//! [`GameState::snapshot`].
//!
//! # Module Structure
//!
//! - [`board`]: 10x18 occupancy grid and the append-only placed-piece arena
//! - [`pieces`]: cell offsets and rail templates for every kind and rotation
//! - [`rail`]: the waypoint route concatenated from placed pieces
//! - [`train`]: hop-by-hop traversal of the route with eased interpolation
//! - [`rng`]: uniform piece selection with one piece of lookahead
//! - [`game_state`]: timers, commands, score and lifecycle
//! - [`snapshot`]: plain-data view for renderers and traces
//!
//! # Game Rules
//!
//! - Pieces fall one row per second and are committed as soon as they cannot
//!   move down. The next piece appears half a second later.
//! - Rotation is a single clockwise attempt with no wall kicks.
//! - Rows are never cleared: every placed piece is permanent track.
//! - The game ends when a new piece collides at the spawn position. The train
//!   keeps running afterwards.
//!
//! # Example
//!
//! ```
//! use tetris_train_core::GameState;
//! use tetris_train_types::{CoreEvent, GameAction};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::Rotate);
//!
//! // Let gravity run until the first piece lands.
//! while game.board().placed().is_empty() {
//!     game.tick(16);
//! }
//! assert_eq!(game.score(), 10);
//! assert!(game
//!     .take_events()
//!     .iter()
//!     .any(|e| matches!(e, CoreEvent::PieceCommitted { piece_id: 0, .. })));
//! ```
//!
//! # Timing
//!
//! The game uses a fixed timestep: call [`GameState::tick`] every frame with
//! the elapsed milliseconds (16ms per frame in the terminal front-end).

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rail;
pub mod rng;
pub mod snapshot;
pub mod train;

pub use tetris_train_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, PlacedPiece};
pub use game_state::{Descent, GameState, Tetromino};
pub use pieces::{get_shape, rail_template, world_segment, RailSegment};
pub use rail::{connected_pairs, segments_connect, RailPath};
pub use rng::{next_piece, PieceQueue, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TrainSnapshot};
pub use train::{direction_heading, TrainNavigator, TrainPhase};
