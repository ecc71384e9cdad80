//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Every key
//! press is one discrete command; there is no auto-repeat handling beyond what
//! the terminal itself sends.

pub mod map;

pub use tetris_train_types as types;

pub use map::{handle_key_event, should_quit};
