//! Board module - manages the game grid
//!
//! The board is a 12x15 grid where each cell is empty or holds the kind of the piece
//! that locked there. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..14 (top to bottom).

use arrayvec::ArrayVec;

use crate::catalog::cells;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const _: () = assert!(BOARD_WIDTH > 0 && BOARD_HEIGHT > 0, "board must not be empty");
const _: () = assert!(BOARD_HEIGHT as usize <= i8::MAX as usize && BOARD_WIDTH as usize <= i8::MAX as usize);

/// Row indices removed by one clear pass, in the order they were found (bottom first).
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 12 columns x 15 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Kind stored at (x, y); out-of-bounds reads as empty.
    pub fn block(&self, x: i8, y: i8) -> Cell {
        self.get(x, y).flatten()
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Borrow one row of cells, or None past the bottom.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Remove row `y`: every row above moves down by one and row 0 becomes empty.
    /// Rows below `y` are untouched. Returns the number of rows removed (1 or 0).
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= BOARD_HEIGHT as usize {
            return 0;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..y * width, width);

        for cell in &mut self.cells[..width] {
            *cell = None;
        }

        1
    }

    /// Clear all full rows, scanning from the bottom up.
    ///
    /// After a row is removed the same index is examined again, since the row
    /// above has just moved into it. A stack of complete rows collapses in one pass.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = BOARD_HEIGHT as usize;

        while y > 0 {
            if self.is_row_full(y - 1) {
                self.clear_row(y - 1);
                // At most BOARD_HEIGHT rows can ever be full at once.
                let _ = cleared.try_push(y - 1);
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Write every block of `kind` at `rotation`, with its bounding box at (x, y).
    ///
    /// All-or-nothing: returns false without touching the board if any block
    /// would land out of bounds or on a filled cell.
    pub fn lock_piece(&mut self, kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> bool {
        if !cells(kind, rotation).all(|(dx, dy)| self.is_valid(x + dx, y + dy)) {
            return false;
        }

        for (dx, dy) in cells(kind, rotation) {
            self.set(x + dx, y + dy, Some(kind));
        }

        true
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill row `y` completely with `kind`, optionally leaving one column open.
    pub fn fill_row(&mut self, y: i8, kind: PieceKind, hole: Option<i8>) {
        for x in 0..BOARD_WIDTH as i8 {
            if Some(x) != hole {
                self.set(x, y, Some(kind));
            }
        }
    }

    /// Create from a 2D vector (converts to flat array)
    ///
    /// Returns None unless the input is exactly `BOARD_HEIGHT` rows of `BOARD_WIDTH` cells.
    pub fn from_cells(cells_2d: &[Vec<Cell>]) -> Option<Self> {
        if cells_2d.len() != BOARD_HEIGHT as usize
            || cells_2d.iter().any(|row| row.len() != BOARD_WIDTH as usize)
        {
            return None;
        }

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            flat[y * BOARD_WIDTH as usize..(y + 1) * BOARD_WIDTH as usize].copy_from_slice(row);
        }
        Some(Self { cells: flat })
    }

    /// Convert to 2D vector for testing/display
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(BOARD_WIDTH as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
