//! Board structure built on two color bitboards

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::{GameError, InvalidReason, Result};

/// Game board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    /// Black stones bitboard
    black: Bitboard,
    /// White stones bitboard
    white: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Validated placement for committed moves.
    ///
    /// Rejects off-board positions, occupied cells and `Stone::Empty`,
    /// leaving the board untouched on error.
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) -> Result<()> {
        if !pos.in_bounds() {
            return Err(GameError::invalid(pos, InvalidReason::OutOfBounds));
        }
        if stone.is_empty() {
            return Err(GameError::invalid(pos, InvalidReason::EmptyStone));
        }
        if !self.is_empty(pos) {
            return Err(GameError::invalid(pos, InvalidReason::Occupied));
        }
        self.set(pos, stone);
        Ok(())
    }

    /// Raw write with no legality checks. Search code goes through
    /// [`super::Placement`] so every write is paired with a clear.
    #[inline]
    pub(crate) fn set(&mut self, pos: Pos, stone: Stone) {
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Remove a stone
    #[inline]
    pub(crate) fn clear(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Every occupied cell in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = Pos> {
        self.black.union(&self.white).iter_ones()
    }

    /// Every empty cell in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(move |&p| self.is_empty(p))
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == TOTAL_CELLS
    }

    /// Copy of the grid, indexed `[row][col]`
    pub fn cells(&self) -> [[Stone; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE];
        for pos in self.black.iter_ones() {
            grid[pos.row as usize][pos.col as usize] = Stone::Black;
        }
        for pos in self.white.iter_ones() {
            grid[pos.row as usize][pos.col as usize] = Stone::White;
        }
        grid
    }
}
