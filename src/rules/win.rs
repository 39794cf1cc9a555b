//! Win and draw conditions for free-style Gomoku
//!
//! Five or more stones in an unbroken line wins (overlines count).
//! A full board with no line is a draw.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Steps scanned each way from the placed stone. A run of five through
/// `pos` never needs more than four cells on either side.
const MAX_REACH: i32 = 4;

/// Length of the contiguous run of `color` through `pos` along `(dr, dc)`,
/// counting `pos` itself and scanning at most [`MAX_REACH`] cells each way.
#[inline]
fn run_through(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> i32 {
    let mut count = 1;
    for sign in [1, -1] {
        for k in 1..=MAX_REACH {
            match pos.offset(dr * sign, dc * sign, k) {
                Some(p) if board.get(p) == color => count += 1,
                _ => break,
            }
        }
    }
    count
}

/// Fast five-in-a-row check at a specific position.
///
/// Only checks the 4 axes through `pos`, so the cost is constant no matter
/// how many stones are on the board. `pos` itself is assumed to hold
/// `color` (or to be about to).
#[inline]
pub fn check_win(board: &Board, pos: Pos, color: Stone) -> bool {
    if color.is_empty() {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_through(board, pos, dr, dc, color) >= 5)
}

/// Draw: every cell filled and nobody has completed a line.
#[inline]
pub fn is_draw(board: &Board, has_winner: bool) -> bool {
    !has_winner && board.is_full()
}

/// First five cells of the winning line through `pos`, in board order.
pub fn find_five_line(board: &Board, pos: Pos, color: Stone) -> Option<[Pos; 5]> {
    if color.is_empty() || board.get(pos) != color {
        return None;
    }

    for &(dr, dc) in &DIRECTIONS {
        // Walk back to the start of the run, then collect forward
        let mut start = pos;
        while let Some(prev) = start.offset(dr, dc, -1) {
            if board.get(prev) != color {
                break;
            }
            start = prev;
        }

        let mut line = Vec::with_capacity(5);
        let mut cur = Some(start);
        while let Some(p) = cur {
            if board.get(p) != color || line.len() == 5 {
                break;
            }
            line.push(p);
            cur = p.offset(dr, dc, 1);
        }

        if line.len() == 5 {
            return Some([line[0], line[1], line[2], line[3], line[4]]);
        }
    }
    None
}
