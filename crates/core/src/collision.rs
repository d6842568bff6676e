//! Collision checks for a piece placement against the board.
//!
//! Pure and read-only: the board is only borrowed immutably.

use crate::board::Board;
use crate::catalog::cells;
use crate::types::{PieceKind, Rotation};

/// True if any block of `kind` at `rotation`, with its bounding box at (x, y),
/// falls outside the board or onto a filled cell.
pub fn is_occupied(board: &Board, kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> bool {
    cells(kind, rotation).any(|(dx, dy)| {
        let (px, py) = (x + dx, y + dy);
        board.is_out_of_bounds(px, py) || board.is_occupied(px, py)
    })
}

/// Negation of [`is_occupied`].
pub fn is_free(board: &Board, kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> bool {
    !is_occupied(board, kind, x, y, rotation)
}
