//! Candidate move generation
//!
//! Only cells near existing stones are worth considering in Gomoku. A cell
//! qualifies when it is within two steps of some stone in every direction
//! (Chebyshev 2) but not at the far corners of that square (Manhattan 3).

use crate::board::{Board, Pos, BOARD_SIZE};

/// Chebyshev radius around each stone.
pub const CANDIDATE_RADIUS: i32 = 2;
/// Manhattan cap inside that square, trims the (±2, ±2) corners.
pub const CANDIDATE_MANHATTAN: i32 = 3;

/// Empty cells near existing stones, deduplicated.
///
/// An empty board yields the center. If no empty cell lies near any stone
/// the whole set of empty cells is returned, so there is always a legal
/// move while one exists. The output is unordered.
#[must_use]
pub fn generate_candidates(board: &Board) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![Pos::center()];
    }

    let mut moves = Vec::with_capacity(64);
    let mut seen = [[false; BOARD_SIZE]; BOARD_SIZE];

    for stone in board.occupied() {
        for dr in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
            for dc in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
                if dr.abs() + dc.abs() > CANDIDATE_MANHATTAN {
                    continue;
                }
                let Some(pos) = stone.offset(dr, dc, 1) else {
                    continue;
                };

                let seen_cell = &mut seen[pos.row as usize][pos.col as usize];
                if *seen_cell {
                    continue;
                }
                *seen_cell = true;

                if board.is_empty(pos) {
                    moves.push(pos);
                }
            }
        }
    }

    if moves.is_empty() {
        moves.extend(board.empty_cells());
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Stone, TOTAL_CELLS};
    use std::collections::HashSet;

    #[test]
    fn test_empty_board_returns_center() {
        let board = Board::new();
        assert_eq!(generate_candidates(&board), vec![Pos::center()]);
    }

    #[test]
    fn test_single_stone_neighbourhood() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black).unwrap();
        let moves = generate_candidates(&board);

        // 5x5 square minus the stone and the four (±2, ±2) corners
        assert_eq!(moves.len(), 25 - 1 - 4);
        for pos in &moves {
            let center = Pos::new(7, 7);
            assert!(pos.chebyshev(center) <= 2);
            assert!(pos.manhattan(center) <= 3);
        }
        assert!(!moves.contains(&Pos::new(9, 9)));
        assert!(moves.contains(&Pos::new(9, 8)));
    }

    #[test]
    fn test_corner_stone_stays_on_board() {
        let mut board = Board::new();
        board.place_stone(Pos::new(0, 0), Stone::White).unwrap();
        let moves = generate_candidates(&board);
        // (0,1) (0,2) (1,0) (1,1) (1,2) (2,0) (2,1)
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|p| p.in_bounds()));
    }

    #[test]
    fn test_no_duplicates_and_no_occupied() {
        let mut board = Board::new();
        for (r, c) in [(7, 7), (7, 8), (8, 7), (6, 9)] {
            board.place_stone(Pos::new(r, c), Stone::Black).unwrap();
        }
        board.place_stone(Pos::new(8, 8), Stone::White).unwrap();

        let moves = generate_candidates(&board);
        let unique: HashSet<Pos> = moves.iter().copied().collect();
        assert_eq!(unique.len(), moves.len());
        assert!(moves.iter().all(|&p| board.is_empty(p)));
    }

    #[test]
    fn test_last_empty_cell_is_offered() {
        let mut board = Board::new();
        for idx in 0..TOTAL_CELLS - 1 {
            let pos = Pos::from_index(idx);
            let color = if (pos.col / 2 + pos.row) % 2 == 0 { Stone::Black } else { Stone::White };
            board.place_stone(pos, color).unwrap();
        }
        assert_eq!(generate_candidates(&board), vec![Pos::new(14, 14)]);
    }

    #[test]
    fn test_full_board_has_no_candidates() {
        let mut board = Board::new();
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            let color = if (pos.col / 2 + pos.row) % 2 == 0 { Stone::Black } else { Stone::White };
            board.place_stone(pos, color).unwrap();
        }
        assert!(generate_candidates(&board).is_empty());
    }
}
