//! RNG module - weighted bag randomizer
//!
//! The bag holds four copies of each of the seven kinds (28 entries). Every
//! draw picks uniformly from a freshly built bag, so draws are independent and
//! each kind has weight 4/28. Nothing is removed from the bag between draws.
//!
//! Also provides a simple LCG so that a seed fully determines a game.

use crate::catalog::shape;
use crate::game_state::Tetromino;
use crate::types::{PieceKind, BAG_COPIES, BAG_SIZE, BOARD_WIDTH};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Build the 28-entry bag: each kind repeated `BAG_COPIES` times, in catalog order.
pub fn draw_bag() -> [PieceKind; BAG_SIZE] {
    let mut bag = [PieceKind::I; BAG_SIZE];
    for (i, slot) in bag.iter_mut().enumerate() {
        *slot = PieceKind::ALL[i / BAG_COPIES];
    }
    bag
}

/// Weighted piece generator
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: SimpleRng,
}

impl Randomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Pick one kind from a fresh bag.
    pub fn next_kind(&mut self) -> PieceKind {
        let bag = draw_bag();
        bag[self.rng.next_range(BAG_SIZE as u32) as usize]
    }

    /// Create the next piece: spawn orientation, top row, random column that keeps
    /// the bounding box on the board.
    pub fn next_piece(&mut self) -> Tetromino {
        let kind = self.next_kind();
        let span = (BOARD_WIDTH - shape(kind).size) as u32 + 1;
        let x = self.rng.next_range(span) as i8;
        Tetromino::new(kind, x)
    }

    /// Current RNG state (a seed that continues this sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
