//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: [`GameView`] paints a
//! [`core::GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`]
//! of styled characters, and [`TerminalRenderer`] flushes framebuffers to the
//! terminal with crossterm, diffing against the previous frame.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep the view pure so layouts can be asserted on in tests
//! - Allow precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_train_core as core;
pub use tetris_train_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{rail_glyph, train_glyph, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer, TerminalSession};
