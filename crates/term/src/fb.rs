//! Character-cell framebuffer that `GameView` paints into.
//!
//! Storage is one row-major `Vec<Cell>`; rows are handed out as slices so the
//! renderer can compare frames a row at a time.

pub use crate::types::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub weight: Weight,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            weight: Weight::Normal,
        }
    }

    pub const fn bold(self) -> Self {
        Self {
            weight: Weight::Bold,
            ..self
        }
    }

    pub const fn dim(self) -> Self {
        Self {
            weight: Weight::Dim,
            ..self
        }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub const fn blank(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(CellStyle::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions; contents are unspecified until the next `clear`.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::default());
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        (y < self.height).then(|| &self.cells[start..start + w])
    }

    fn row_mut(&mut self, y: u16) -> Option<&mut [Cell]> {
        if y >= self.height {
            return None;
        }
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        Some(&mut self.cells[start..start + w])
    }

    /// Row `y` from column `x` to the right edge.
    fn span_mut(&mut self, x: u16, y: u16) -> Option<&mut [Cell]> {
        self.row_mut(y).and_then(|row| row.get_mut(usize::from(x)..))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.row(y).and_then(|row| row.get(usize::from(x)).copied())
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.span_mut(x, y).and_then(|s| s.first_mut()) {
            *slot = cell;
        }
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write `s` left to right, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        if let Some(span) = self.span_mut(x, y) {
            for (slot, ch) in span.iter_mut().zip(s.chars()) {
                *slot = Cell { ch, style };
            }
        }
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) {
        // u32::MAX has 10 digits.
        let mut digits = [b'0'; 10];
        let mut start = digits.len();
        let mut n = value;
        loop {
            start -= 1;
            digits[start] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        if let Ok(text) = std::str::from_utf8(&digits[start..]) {
            self.put_str(x, y, text, style);
        }
    }

    /// Fill a `w`x`h` block, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        let bottom = y.saturating_add(h).min(self.height);
        for row_y in y..bottom {
            if let Some(span) = self.span_mut(x, row_y) {
                let len = span.len().min(usize::from(w));
                span[..len].fill(Cell { ch, style });
            }
        }
    }

    /// Row `y` as plain text, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .map(|row| row.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }
}
