//! Read-only copy of everything a presentation layer needs for one frame.

use crate::game_state::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells, indexed `[y][x]`.
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Tetromino,
    pub next: Tetromino,
    pub score: u32,
    pub visual_score: u32,
    pub rows: u32,
    pub playing: bool,
    pub just_lost: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The falling piece, only while it is visible (i.e. the game is running).
    pub fn visible_piece(&self) -> Option<Tetromino> {
        self.playing.then_some(self.current)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: Tetromino::new(PieceKind::I, 0),
            next: Tetromino::new(PieceKind::I, 0),
            score: 0,
            visual_score: 0,
            rows: 0,
            playing: false,
            just_lost: false,
        }
    }
}
