//! Game state module - manages the complete game state
//!
//! This module ties together the board, catalog, randomizer, action queue and scoring.
//! It owns the tick loop: draining one queued action per tick, auto-dropping the
//! current piece every 500ms, locking, clearing rows and detecting loss.
//!
//! Game lifecycle: **Reset → Playing → Lost → (Reset)**. There is no pause state;
//! a host pauses by not calling [`GameState::tick`].

use crate::board::Board;
use crate::catalog::{cells, Cells};
use crate::collision::{is_free, is_occupied};
use crate::queue::{ActionQueue, ActionSender};
use crate::rng::Randomizer;
use crate::scoring::{calculate_score, get_drop_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Column of the bounding-box origin
    pub x: i8,
    /// Row of the bounding-box origin
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino in spawn orientation on the top row
    pub fn new(kind: PieceKind, x: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y: 0,
        }
    }

    /// Block offsets within the bounding box for the current rotation
    pub fn cells(&self) -> Cells {
        cells(self.kind, self.rotation)
    }

    /// Absolute board coordinates of each block
    pub fn blocks(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.cells().map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Check if all blocks are in bounds and on empty cells
    pub fn is_valid(&self, board: &Board) -> bool {
        is_free(board, self.kind, self.x, self.y, self.rotation)
    }
}

/// Direction for [`GameState::try_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    fn delta(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Lost,
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    board: Board,
    current: Tetromino,
    next: Tetromino,
    randomizer: Randomizer,
    actions: ActionQueue,
    /// Last lock event (consumed by observers).
    last_event: Option<CoreLastEvent>,
    score: u32,
    /// Displayed score; climbs toward `score` by one point per tick.
    visual_score: u32,
    rows: u32,
    drop_interval_ms: u32,
    /// Time accumulated since the last auto-drop.
    elapsed_ms: u32,
    playing: bool,
    /// Set on loss, cleared when read by [`GameState::take_just_lost`] or on reset.
    just_lost: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed, already playing.
    pub fn new(seed: u32) -> Self {
        let mut randomizer = Randomizer::new(seed);
        let current = randomizer.next_piece();
        let next = randomizer.next_piece();

        Self {
            board: Board::new(),
            current,
            next,
            randomizer,
            actions: ActionQueue::new(),
            last_event: None,
            score: 0,
            visual_score: 0,
            rows: 0,
            drop_interval_ms: get_drop_interval_ms(0),
            elapsed_ms: 0,
            playing: true,
            just_lost: false,
        }
    }

    /// Start a fresh game: empty board, zero score and rows, two new pieces.
    ///
    /// The randomizer keeps running, so consecutive games get different pieces.
    /// Action senders stay connected; anything already queued is discarded.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
        self.actions.clear();
        self.board.clear();
        self.rows = 0;
        self.drop_interval_ms = get_drop_interval_ms(0);
        self.score = 0;
        self.visual_score = 0;
        self.current = self.randomizer.next_piece();
        self.next = self.randomizer.next_piece();
        self.last_event = None;
        self.just_lost = false;
        self.playing = true;
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn phase(&self) -> GamePhase {
        if self.playing {
            GamePhase::Playing
        } else {
            GamePhase::Lost
        }
    }

    /// Peek at the loss flag without consuming it.
    pub fn just_lost(&self) -> bool {
        self.just_lost
    }

    /// Consume the loss flag: true exactly once per loss.
    pub fn take_just_lost(&mut self) -> bool {
        std::mem::take(&mut self.just_lost)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn visual_score(&self) -> u32 {
        self.visual_score
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn current(&self) -> Tetromino {
        self.current
    }

    pub fn next(&self) -> Tetromino {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for hosts and tests that stage a position.
    ///
    /// Callers are responsible for not overlapping the current piece.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the falling piece.
    pub fn set_current_piece(&mut self, piece: Tetromino) {
        self.current = piece;
    }

    /// Replace the preview piece.
    pub fn set_next_piece(&mut self, piece: Tetromino) {
        self.next = piece;
    }

    /// Current randomizer state (a seed that continues this piece sequence)
    pub fn seed(&self) -> u32 {
        self.randomizer.seed()
    }

    /// Number of actions waiting to be processed.
    ///
    /// Takes `&mut self` because actions sent through an [`ActionSender`] are
    /// first moved from the channel into the queue, so they are counted too.
    pub fn pending_actions(&mut self) -> usize {
        self.actions.len()
    }

    /// Queue an action for a later tick. Never validates game state.
    pub fn enqueue(&mut self, action: GameAction) {
        self.actions.push(action);
    }

    /// Handle for queueing actions from another thread.
    pub fn action_sender(&self) -> ActionSender {
        self.actions.sender()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<CoreLastEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in out.board.iter_mut().enumerate() {
            if let Some(cells) = self.board.row(y) {
                row.copy_from_slice(cells);
            }
        }
        out.current = self.current;
        out.next = self.next;
        out.score = self.score;
        out.visual_score = self.visual_score;
        out.rows = self.rows;
        out.playing = self.playing;
        out.just_lost = self.just_lost;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Main game tick.
    ///
    /// Queues `action` (if any), then, while playing: advances the visual score by
    /// one, applies at most one queued action, and auto-drops once for every full
    /// drop interval exceeded by the accumulated time.
    ///
    /// Returns true if at least one auto-drop happened.
    pub fn tick(&mut self, elapsed_ms: u32, action: Option<GameAction>) -> bool {
        if let Some(action) = action {
            self.actions.push(action);
        }

        if !self.playing {
            return false;
        }

        if self.visual_score < self.score {
            self.visual_score += 1;
        }

        if let Some(action) = self.actions.pop() {
            self.apply_action(action);
        }

        if !self.playing {
            return false;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let mut dropped = false;
        while self.playing && self.elapsed_ms > self.drop_interval_ms {
            self.elapsed_ms -= self.drop_interval_ms;
            self.drop_piece();
            dropped = true;
        }

        dropped
    }

    /// Apply a game action immediately. A lost game ignores it.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if !self.playing {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.try_move(Direction::Left),
            GameAction::MoveRight => self.try_move(Direction::Right),
            GameAction::Rotate => self.try_rotate(),
            GameAction::Drop => self.drop_piece(),
        }
    }

    /// Try to move the current piece one cell. Leaves state unchanged on failure.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        if !self.playing {
            return false;
        }
        let (dx, dy) = direction.delta();
        let piece = self.current;
        let (x, y) = (piece.x + dx, piece.y + dy);

        if is_free(&self.board, piece.kind, x, y, piece.rotation) {
            self.current = Tetromino { x, y, ..piece };
            return true;
        }

        false
    }

    /// Try to rotate the current piece in place. No wall kicks.
    pub fn try_rotate(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        let piece = self.current;
        let rotation = piece.rotation.rotate_cw();

        if is_free(&self.board, piece.kind, piece.x, piece.y, rotation) {
            self.current = Tetromino { rotation, ..piece };
            return true;
        }

        false
    }

    /// Move the current piece down one row, locking it if it cannot descend.
    ///
    /// Returns true if the piece moved, false if it locked or the game is over.
    pub fn drop_piece(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        if self.try_move(Direction::Down) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// End the current game immediately.
    pub fn forfeit(&mut self) {
        if self.playing {
            self.lose();
        }
    }

    fn lose(&mut self) {
        self.playing = false;
        self.just_lost = true;
    }

    /// Lock the current piece, clear rows, score, and promote the next piece
    fn lock_piece(&mut self) {
        let piece = self.current;

        // Only a board staged through `board_mut` under the piece can refuse it.
        if !self
            .board
            .lock_piece(piece.kind, piece.x, piece.y, piece.rotation)
        {
            self.actions.clear();
            self.lose();
            return;
        }

        let lines_cleared = self.board.clear_full_rows().len() as u32;
        let result = calculate_score(lines_cleared);
        self.score = self.score.saturating_add(result.total);

        if lines_cleared > 0 {
            self.rows += lines_cleared;
            self.drop_interval_ms = get_drop_interval_ms(self.rows);
        }

        self.current = self.next;
        self.next = self.randomizer.next_piece();

        // Inputs aimed at the old piece are dropped.
        self.actions.clear();

        let lost = is_occupied(
            &self.board,
            self.current.kind,
            self.current.x,
            self.current.y,
            self.current.rotation,
        );
        if lost {
            self.lose();
        }

        self.last_event = Some(CoreLastEvent {
            kind: piece.kind,
            lines_cleared,
            line_clear_score: result.line_clear_score,
            score: self.score,
            rows: self.rows,
            lost,
        });
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
