//! Shape catalog - the seven piece kinds as 16-bit rotation masks
//!
//! Each rotation is a 16-bit integer whose bits describe a 4x4 frame, read
//! row-major from the most significant bit. For example `J` at rotation 0 is
//! `0x44C0`:
//!
//! ```text
//! 0100 = 0x4 << 12 = 0x4000
//! 0100 = 0x4 <<  8 = 0x0400
//! 1100 = 0xC <<  4 = 0x00C0
//! 0000 = 0x0 <<  0 = 0x0000
//!                    ------
//!                    0x44C0
//! ```
//!
//! The masks are bit-exact with the reference assets and must not change.

use crate::types::{PieceKind, Rgb, Rotation, BOARD_WIDTH};

/// Offset of a single block relative to the piece's bounding-box origin (col, row).
pub type BlockOffset = (i8, i8);

/// Static definition of a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Side of the bounding box that the piece actually uses (2-4).
    pub size: u8,
    /// One mask per rotation, indexed by [`Rotation::index`].
    pub rotations: [u16; 4],
    pub color: Rgb,
}

impl Shape {
    pub const fn mask(&self, rotation: Rotation) -> u16 {
        self.rotations[rotation.index()]
    }
}

const I: Shape = Shape {
    size: 4,
    rotations: [0x0F00, 0x2222, 0x00F0, 0x4444],
    color: Rgb::new(0, 255, 255),
};

const J: Shape = Shape {
    size: 3,
    rotations: [0x44C0, 0x8E00, 0x6440, 0x0E20],
    color: Rgb::new(0, 0, 255),
};

const L: Shape = Shape {
    size: 3,
    rotations: [0x4460, 0x0E80, 0xC440, 0x2E00],
    color: Rgb::new(255, 165, 0),
};

const O: Shape = Shape {
    size: 2,
    rotations: [0xCC00, 0xCC00, 0xCC00, 0xCC00],
    color: Rgb::new(255, 255, 0),
};

const S: Shape = Shape {
    size: 3,
    rotations: [0x06C0, 0x8C40, 0x6C00, 0x4620],
    color: Rgb::new(0, 255, 0),
};

const T: Shape = Shape {
    size: 3,
    rotations: [0x0E40, 0x4C40, 0x4E00, 0x4640],
    color: Rgb::new(128, 0, 128),
};

const Z: Shape = Shape {
    size: 3,
    rotations: [0x0C60, 0x4C80, 0xC600, 0x2640],
    color: Rgb::new(255, 0, 0),
};

const CATALOG: [Shape; 7] = [I, J, L, O, S, T, Z];

/// All shapes, indexed by [`PieceKind::index`].
pub static SHAPES: [Shape; 7] = CATALOG;

/// True if every set bit of `mask` lies inside the top-left `size`x`size` square.
const fn fits_in(mask: u16, size: u8) -> bool {
    let mut i = 0;
    while i < 16 {
        if mask & (0x8000 >> i) != 0 && (i % 4 >= size as u32 || i / 4 >= size as u32) {
            return false;
        }
        i += 1;
    }
    true
}

const fn catalog_is_well_formed() -> bool {
    let mut k = 0;
    while k < CATALOG.len() {
        let shape = &CATALOG[k];
        if shape.size < 2 || shape.size > 4 || shape.size > BOARD_WIDTH {
            return false;
        }
        let mut r = 0;
        while r < 4 {
            let mask = shape.rotations[r];
            if mask.count_ones() != 4 || !fits_in(mask, shape.size) {
                return false;
            }
            r += 1;
        }
        k += 1;
    }
    true
}

const _: () = assert!(catalog_is_well_formed(), "malformed shape catalog");

/// Look up the static definition of a piece kind.
pub fn shape(kind: PieceKind) -> &'static Shape {
    &SHAPES[kind.index()]
}

/// Display color of a piece kind.
pub fn color(kind: PieceKind) -> Rgb {
    shape(kind).color
}

/// Iterate the occupied offsets of `kind` at `rotation`.
///
/// Offsets are yielded in bit order (MSB first), so row-major from the top-left.
pub fn cells(kind: PieceKind, rotation: Rotation) -> Cells {
    Cells::new(shape(kind).mask(rotation))
}

/// Lazy iterator over the set bits of a rotation mask, as `(col, row)` offsets.
#[derive(Debug, Clone)]
pub struct Cells {
    mask: u16,
    index: u8,
}

impl Cells {
    pub fn new(mask: u16) -> Self {
        Self { mask, index: 0 }
    }
}

impl Iterator for Cells {
    type Item = BlockOffset;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < 16 {
            let i = self.index;
            self.index += 1;
            if self.mask & (0x8000 >> i) != 0 {
                return Some(((i % 4) as i8, (i / 4) as i8));
            }
        }
        None
    }
}
