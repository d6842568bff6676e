//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] for the engine,
//! and into [`HostCommand`] for lifecycle keys the engine never sees (quit,
//! restart, forfeit).

pub mod map;

pub use pocket_tetris_types as types;

pub use map::{handle_key_event, host_command, should_quit, HostCommand};
