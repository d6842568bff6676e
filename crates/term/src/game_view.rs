//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{catalog, GameSnapshot, Tetromino};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Orientation used for the next-piece preview.
///
/// The long and skewed pieces read better lying on their side.
pub fn preview_rotation(kind: PieceKind) -> Rotation {
    match kind {
        PieceKind::I | PieceKind::S | PieceKind::T | PieceKind::Z => Rotation::East,
        PieceKind::J | PieceKind::L | PieceKind::O => Rotation::North,
    }
}

/// Largest cell size `GameView::new` accepts, in terminal columns and rows.
pub const MAX_CELL_W: u16 = 8;
pub const MAX_CELL_H: u16 = 4;

impl GameView {
    /// Cell sizes are clamped to `1..=MAX_CELL_W` and `1..=MAX_CELL_H`.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
            cell_h: cell_h.clamp(1, MAX_CELL_H),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered play field, in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16).saturating_mul(self.cell_w).saturating_add(2),
            (BOARD_HEIGHT as u16).saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::default(),
        });

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell {
                    Some(kind) => self.draw_board_cell(fb, start_x, start_y, x, y, *kind),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        if let Some(piece) = snap.visible_piece() {
            self.draw_piece(fb, start_x, start_y, piece);
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if !snap.playing {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience wrapper that allocates a fresh framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, piece: Tetromino) {
        for (x, y) in piece.blocks() {
            if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                self.draw_board_cell(fb, start_x, start_y, x as u16, y as u16, piece.kind);
            }
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(catalog::color(kind), PLAY_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x.saturating_add(1 + cell_x * self.cell_w);
        let py = start_y.saturating_add(1 + cell_y * self.cell_h);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.visual_score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ROWS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.rows, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let kind = snap.next.kind;
        let style = CellStyle::new(catalog::color(kind), PANEL_BG).bold();
        for (dx, dy) in catalog::cells(kind, preview_rotation(kind)) {
            let px = panel_x.saturating_add(dx as u16 * self.cell_w);
            let py = y.saturating_add(dy as u16 * self.cell_h);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn top_view() -> GameView {
        GameView::default().with_anchor_y(AnchorY::Top)
    }

    fn contains(fb: &FrameBuffer, needle: &str) -> bool {
        (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn frame_fits_board_at_double_width() {
        assert_eq!(GameView::default().frame_size(), (26, 17));
    }

    #[test]
    fn oversized_cells_are_clamped() {
        let view = GameView::new(u16::MAX, u16::MAX);
        assert_eq!(view.frame_size(), (12 * MAX_CELL_W + 2, 15 * MAX_CELL_H + 2));

        let view = GameView::new(0, 0);
        assert_eq!(view.frame_size(), (14, 17));

        let fb = view.render(&GameSnapshot::default(), Viewport::new(10, 5));
        assert_eq!((fb.width(), fb.height()), (10, 5));
    }

    #[test]
    fn draws_border_and_empty_grid() {
        let snap = GameSnapshot::default();
        let fb = top_view().render(&snap, Viewport::new(26, 17));
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(25, 16).map(|c| c.ch), Some('┘'));
        assert_eq!(fb.get(1, 1).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn locked_cells_use_catalog_color() {
        let mut snap = GameSnapshot::default();
        snap.board[14][0] = Some(PieceKind::Z);
        let fb = top_view().render(&snap, Viewport::new(26, 17));
        let cell = fb.get(1, 15).expect("in bounds");
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, catalog::color(PieceKind::Z));
    }

    #[test]
    fn current_piece_drawn_only_while_playing() {
        let mut game = GameState::new(3);
        game.set_current_piece(Tetromino::new(PieceKind::O, 0));
        let mut snap = game.snapshot();
        // O fills the top-left 2x2 of its box.
        let fb = top_view().render(&snap, Viewport::new(26, 17));
        assert_eq!(fb.get(3, 1).map(|c| c.ch), Some('█'));

        snap.playing = false;
        let fb = top_view().render(&snap, Viewport::new(26, 17));
        assert_eq!(fb.get(3, 1).map(|c| c.ch), Some('·'));
        assert!(contains(&fb, "GAME OVER"));
    }

    #[test]
    fn side_panel_shows_visual_score_and_rows() {
        let mut snap = GameSnapshot::default();
        snap.playing = true;
        snap.score = 510;
        snap.visual_score = 37;
        snap.rows = 4;
        let fb = top_view().render(&snap, Viewport::new(50, 17));
        assert!(contains(&fb, "SCORE"));
        assert!(contains(&fb, "37"));
        assert!(!contains(&fb, "510"));
        assert!(contains(&fb, "ROWS"));
        assert!(contains(&fb, "NEXT"));
    }

    #[test]
    fn preview_lays_long_pieces_on_their_side() {
        assert_eq!(preview_rotation(PieceKind::I), Rotation::East);
        assert_eq!(preview_rotation(PieceKind::T), Rotation::East);
        assert_eq!(preview_rotation(PieceKind::O), Rotation::North);
        assert_eq!(preview_rotation(PieceKind::L), Rotation::North);
    }

    #[test]
    fn narrow_viewport_does_not_panic() {
        let snap = GameState::new(9).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
