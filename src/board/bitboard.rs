//! Bitboard implementation for fast occupancy queries

use super::{Pos, TOTAL_CELLS};

/// Number of u64 words needed to cover every cell
const WORDS: usize = TOTAL_CELLS.div_ceil(64);

/// Bitboard representation of one color's stones
/// Uses 4 x u64 to represent 225 cells (4 * 64 = 256 >= 225)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        let idx = pos.to_index();
        self.bits[idx / 64] |= 1u64 << (idx % 64);
    }

    /// Clear a bit at position
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        let idx = pos.to_index();
        self.bits[idx / 64] &= !(1u64 << (idx % 64));
    }

    /// Check if bit is set at position. Off-board positions are never set.
    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        if !pos.in_bounds() {
            return false;
        }
        let idx = pos.to_index();
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Union of two bitboards
    #[inline]
    pub fn union(&self, other: &Bitboard) -> Bitboard {
        let mut bits = self.bits;
        for (w, o) in bits.iter_mut().zip(other.bits.iter()) {
            *w |= o;
        }
        Bitboard { bits }
    }

    /// Iterate over set bit positions in row-major order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter {
            bits: self.bits,
            word_idx: 0,
            current_word: self.bits[0],
        }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: [u64; WORDS],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= WORDS {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        let idx = self.word_idx * 64 + bit_pos;

        // Clear the bit we just found
        self.current_word &= self.current_word - 1;

        // Padding bits past the last cell are never set, but guard anyway
        if idx < TOTAL_CELLS {
            Some(Pos::from_index(idx))
        } else {
            None
        }
    }
}
