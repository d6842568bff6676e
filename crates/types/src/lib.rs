//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, event logging).
//!
//! # Board Dimensions
//!
//! The playfield is sized for a small badge display:
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 15 rows (indexed 0-14)
//! - **Spawn position**: row 0, random column that keeps the bounding box on the board
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DROP_INTERVAL_MS` | 500 | Auto-drop interval (constant, not level-scaled) |
//! | `TICK_MS` | 16 | Default host frame interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use pocket_tetris_types::{PieceKind, Rotation, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let rotated = Rotation::North.rotate_cw();
//! assert_eq!(rotated, Rotation::East);
//! assert_eq!(rotated.index(), 1);
//!
//! assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
//!
//! assert_eq!(BOARD_WIDTH, 12);
//! assert_eq!(BOARD_HEIGHT, 15);
//! ```

/// Board width in cells (12 columns)
pub const BOARD_WIDTH: u8 = 12;

/// Board height in cells (15 rows)
pub const BOARD_HEIGHT: u8 = 15;

/// Default host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Auto-drop interval in milliseconds.
///
/// Constant for every row count; there is no difficulty ramp.
pub const DROP_INTERVAL_MS: u32 = 500;

/// Points awarded every time a piece locks.
pub const LOCK_SCORE: u32 = 10;

/// Points for a single-row clear. Each additional simultaneous row doubles it.
pub const LINE_CLEAR_BASE: u32 = 100;

/// Copies of each piece kind in the randomizer bag.
pub const BAG_COPIES: usize = 4;

/// Number of entries in the randomizer bag (7 kinds x 4 copies).
pub const BAG_SIZE: usize = PieceKind::ALL.len() * BAG_COPIES;


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Purple, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use pocket_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// The four 90° orientations of a piece.
///
/// The cycle goes North → East → South → West → North, matching rotation
/// indices 0 → 1 → 2 → 3 → 0 in the shape catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use pocket_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index (0-3) used to select a mask from the catalog.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Build a rotation from an index, wrapping modulo 4.
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Directional intents delivered by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece to the next orientation (no wall kicks)
    Rotate,
    /// Move piece one cell down, locking it if it cannot descend
    Drop,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(GameAction::MoveLeft),
            "right" => Some(GameAction::MoveRight),
            "rotate" | "up" => Some(GameAction::Rotate),
            "drop" | "down" => Some(GameAction::Drop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "left",
            GameAction::MoveRight => "right",
            GameAction::Rotate => "rotate",
            GameAction::Drop => "drop",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Outcome of the most recent lock, emitted by the engine.
///
/// Consumed by hosts (e.g. the event log) through `GameState::take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreLastEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    pub score: u32,
    pub rows: u32,
    /// The piece promoted after this lock was blocked at spawn.
    pub lost: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
