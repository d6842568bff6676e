//! Terminal presentation for the puzzle engine.
//!
//! Rendering goes through a small framebuffer instead of a widget toolkit:
//! [`GameView`] paints a [`GameSnapshot`](crate::core::GameSnapshot) into a
//! [`FrameBuffer`], and [`TerminalRenderer`] flushes it to the terminal as a
//! diff against the previous frame. Board cells are 2 columns wide by default
//! to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use pocket_tetris_core as core;
pub use pocket_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, Weight};
pub use game_view::{preview_rotation, AnchorY, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
