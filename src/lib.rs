//! Tetris Train (workspace facade crate).
//!
//! Re-exports the member crates under stable names
//! (`tetris_train::{core, input, term, types}`) and hosts the pieces of the
//! binary that are worth testing on their own: argument parsing and the
//! headless trace.

pub mod cli;
pub mod headless;

pub use tetris_train_core as core;
pub use tetris_train_input as input;
pub use tetris_train_term as term;
pub use tetris_train_types as types;
