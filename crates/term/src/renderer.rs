//! Pushes framebuffers to the real terminal.
//!
//! The renderer remembers what the terminal currently shows. Each frame it
//! emits only the runs of cells that differ, falling back to a full repaint
//! after `enter`, `invalidate` or a size change.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, ClearType},
};

use crate::fb::{CellStyle, FrameBuffer, Rgb, Weight};
use crate::game_view::GameView;

/// Worst-case escape bytes for one cell: cursor move, reset, weight, two colors, glyph.
const BYTES_PER_CELL: usize = 48;

pub struct TerminalRenderer {
    out: io::Stdout,
    /// What the terminal is showing right now.
    shown: FrameBuffer,
    repaint: bool,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    /// Renderer whose output buffer holds a full repaint of `view`'s play field
    /// without growing. Larger terminals grow it once on the first frame.
    pub fn for_view(view: &GameView) -> Self {
        let (w, h) = view.frame_size();
        Self {
            out: io::stdout(),
            shown: FrameBuffer::new(0, 0),
            repaint: true,
            buf: Vec::with_capacity(usize::from(w) * usize::from(h) * BYTES_PER_CELL),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.out.flush()?;
        self.repaint = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next frame (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.repaint = true;
    }

    /// Show `fb`, then hand the previous frame back through `fb` for reuse.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let prev = (!self.repaint).then_some(&self.shown);
        encode_frame(prev, fb, &mut self.buf)?;
        self.out.write_all(&self.buf)?;
        self.out.flush()?;

        std::mem::swap(&mut self.shown, fb);
        self.repaint = false;
        Ok(())
    }
}

/// Last style sent to the terminal, so runs of equal cells skip the escapes.
#[derive(Default)]
struct Pen(Option<CellStyle>);

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
        if self.0 == Some(style) {
            return Ok(());
        }
        // SGR reset also clears colors, so it has to come first.
        queue!(out, SetAttribute(Attribute::Reset))?;
        match style.weight {
            Weight::Normal => {}
            Weight::Bold => queue!(out, SetAttribute(Attribute::Bold))?,
            Weight::Dim => queue!(out, SetAttribute(Attribute::Dim))?,
        }
        queue!(
            out,
            SetForegroundColor(color(style.fg)),
            SetBackgroundColor(color(style.bg))
        )?;
        self.0 = Some(style);
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Encode the escapes that turn `prev` into `next`.
///
/// With no usable `prev` (missing, or a different size) the screen is cleared
/// and every cell is written.
pub fn encode_frame(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        queue!(out, terminal::Clear(ClearType::All))?;
    }

    let mut pen = Pen::default();
    for y in 0..next.height() {
        let Some(row) = next.row(y) else { break };
        let old = prev.and_then(|p| p.row(y));
        let unchanged = |x: usize| old.is_some_and(|o| o[x] == row[x]);

        let mut x = 0;
        while x < row.len() {
            if unchanged(x) {
                x += 1;
                continue;
            }
            queue!(out, cursor::MoveTo(x as u16, y))?;
            while x < row.len() && !unchanged(x) {
                pen.apply(out, row[x].style)?;
                queue!(out, Print(row[x].ch))?;
                x += 1;
            }
        }
    }

    queue!(out, SetAttribute(Attribute::Reset), ResetColor)
}
