//! Scoped trial placement
//!
//! A [`Placement`] writes one stone when created and clears that exact cell
//! when dropped, so every early return, cutoff, or unwind restores the board.

use std::ops::{Deref, DerefMut};

use super::{Board, Pos, Stone};

/// Temporary stone on a borrowed board.
///
/// Derefs to the board, so recursive search and evaluation code can take
/// `&mut Board` and be handed `&mut placement` directly.
pub struct Placement<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl<'a> Placement<'a> {
    /// Place `stone` at `pos` until the guard is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is off the board, already occupied, or `stone` is
    /// `Empty`. Callers only offer empty candidate cells, so hitting this is
    /// an engine defect rather than a user error.
    pub fn new(board: &'a mut Board, pos: Pos, stone: Stone) -> Self {
        assert!(
            pos.in_bounds() && board.is_empty(pos) && !stone.is_empty(),
            "internal invariant violated: trial placement of {:?} at {} onto {:?}",
            stone,
            pos,
            if pos.in_bounds() { Some(board.get(pos)) } else { None },
        );
        board.set(pos, stone);
        Self { board, pos }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.clear(self.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_reverts_on_drop() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black).unwrap();
        let before = board.clone();
        {
            let placed = Placement::new(&mut board, Pos::new(7, 8), Stone::White);
            assert_eq!(placed.get(Pos::new(7, 8)), Stone::White);
            assert_eq!(placed.stone_count(), 2);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_nested_placements_unwind_in_order() {
        let mut board = Board::new();
        {
            let mut outer = Placement::new(&mut board, Pos::new(0, 0), Stone::Black);
            {
                let inner = Placement::new(&mut outer, Pos::new(0, 1), Stone::White);
                assert_eq!(inner.stone_count(), 2);
            }
            assert_eq!(outer.stone_count(), 1);
        }
        assert!(board.is_board_empty());
    }

    #[test]
    fn test_early_return_still_reverts() {
        fn count_with_trial(board: &mut Board) -> Option<u32> {
            let placed = Placement::new(board, Pos::new(3, 3), Stone::Black);
            if placed.stone_count() == 1 {
                return Some(1);
            }
            None
        }
        let mut board = Board::new();
        assert_eq!(count_with_trial(&mut board), Some(1));
        assert!(board.is_board_empty());
    }

    #[test]
    #[should_panic(expected = "internal invariant violated")]
    fn test_placement_on_occupied_cell_panics() {
        let mut board = Board::new();
        board.place_stone(Pos::new(2, 2), Stone::Black).unwrap();
        let _ = Placement::new(&mut board, Pos::new(2, 2), Stone::White);
    }
}
