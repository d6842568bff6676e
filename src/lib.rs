//! Pocket Tetris (workspace facade crate).
//!
//! The engine and its terminal host live in dedicated crates under `crates/`;
//! this package re-exports them as `pocket_tetris::{core,input,term,types}` and
//! adds the host-side pieces shared by the binary and the integration tests.

pub mod config;
pub mod event_log;
pub mod session;

pub use pocket_tetris_core as core;
pub use pocket_tetris_input as input;
pub use pocket_tetris_term as term;
pub use pocket_tetris_types as types;
