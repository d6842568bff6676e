//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole simulation: shapes, board, collision, piece
//! control, line clearing, scoring and the tick clock. It has **no dependencies**
//! on UI, terminal or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Runs in any host (terminal, badge display, headless)
//! - **Bounded**: A tick is O(width x height) in the worst case and never blocks
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven piece kinds as 16-bit rotation masks with colors
//! - [`rng`]: seeded LCG and the weighted 28-entry bag randomizer
//! - [`board`]: 12x15 grid with row clear/shift operations
//! - [`collision`]: placement checks for a piece against the board
//! - [`queue`]: FIFO of player actions, with a thread-safe sender
//! - [`scoring`]: lock bonus and line-clear points
//! - [`game_state`]: current/next piece control, tick loop, lifecycle
//! - [`snapshot`]: per-frame read-only copy for presentation
//!
//! # Game Rules
//!
//! - **Weighted draw**: each piece is drawn from a fresh bag of 4 copies of every kind
//! - **Plain rotation**: a rotation that collides is rejected; there are no wall kicks
//! - **Gravity**: one row every 500ms
//! - **Lock**: a piece locks the moment a drop cannot move it down
//! - **Scoring**: +10 per lock, 100/200/400/800 for 1/2/3/4 rows at once
//!
//! # Example
//!
//! ```
//! use pocket_tetris_core::GameState;
//! use pocket_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.tick(16, Some(GameAction::MoveRight));
//! game.tick(16, Some(GameAction::Rotate));
//!
//! // Keep dropping until the first piece locks.
//! while game.take_last_event().is_none() {
//!     game.tick(0, Some(GameAction::Drop));
//! }
//! assert!(game.score() >= 10);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per frame with the
//! elapsed milliseconds and at most one new action.

pub mod board;
pub mod catalog;
pub mod collision;
pub mod game_state;
pub mod queue;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use pocket_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{cells, color, shape, Shape};
pub use collision::{is_free, is_occupied};
pub use game_state::{Direction, GamePhase, GameState, Tetromino};
pub use queue::{ActionQueue, ActionSender};
pub use rng::{draw_bag, Randomizer, SimpleRng};
pub use scoring::{calculate_line_score, calculate_score, ScoreResult};
pub use snapshot::GameSnapshot;
