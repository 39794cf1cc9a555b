//! Threat scoring for candidate cells
//!
//! Every score here answers "what would a stone of this color build at this
//! empty cell?". The stone is put down through a [`Placement`] guard, the
//! four axes through the cell are measured, and the guard takes it back off,
//! so callers always get their board back exactly as it was.

use std::cmp::Ordering;

use crate::board::{Board, Placement, Pos, Stone, DIRECTIONS};

use super::patterns::{defensive, PatternScore};

/// Bound on the heuristic position score. Kept well below the search's win
/// score so no leaf evaluation can be mistaken for a forced result.
pub const EVAL_LIMIT: i32 = 500_000_000;

/// Threat value of placing `stone` at `pos`, summed over the four axes.
///
/// Occupied or off-board cells score 0. The board is left bit-identical.
#[must_use]
pub fn score_placement(board: &mut Board, pos: Pos, stone: Stone) -> i32 {
    if stone.is_empty() || !pos.in_bounds() || !board.is_empty(pos) {
        return 0;
    }

    let placed = Placement::new(board, pos, stone);
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| {
            let (run, open_ends) = measure_axis(&placed, pos, dr, dc, stone);
            PatternScore::line(run, open_ends)
        })
        .sum()
}

/// Run length through `pos` along one axis and how many ends are empty.
/// The board edge and opponent stones both count as blocked.
fn measure_axis(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> (i32, u8) {
    let mut run = 1;
    let mut open_ends = 0;

    for sign in [1, -1] {
        let mut k = 1;
        while let Some(p) = pos.offset(dr * sign, dc * sign, k) {
            match board.get(p) {
                s if s == color => {
                    run += 1;
                    k += 1;
                }
                Stone::Empty => {
                    open_ends += 1;
                    break;
                }
                _ => break,
            }
        }
    }

    (run, open_ends)
}

/// Ordering key of a candidate for the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePriority {
    /// What the mover builds by playing here
    pub attack: i32,
    /// What the opponent would build here, with the defensive bias applied
    pub defense: i32,
}

impl MovePriority {
    /// Descending order: defense first, attack breaks ties.
    pub fn cmp_defense_first(&self, other: &Self) -> Ordering {
        other
            .defense
            .cmp(&self.defense)
            .then_with(|| other.attack.cmp(&self.attack))
    }
}

/// Attack and (biased) defense value of `pos` for `mover`.
#[must_use]
pub fn move_priority(board: &mut Board, pos: Pos, mover: Stone) -> MovePriority {
    MovePriority {
        attack: score_placement(board, pos, mover),
        defense: defensive(score_placement(board, pos, mover.opponent())),
    }
}

/// Sort candidates for `mover`: the cells the opponent most wants come
/// first, the mover's own gain decides between equal blocks.
///
/// The order is total: equal priorities fall back to the smaller `(row, col)`,
/// so the same board always yields the same sequence.
#[must_use]
pub fn order_candidates(board: &mut Board, candidates: Vec<Pos>, mover: Stone) -> Vec<(Pos, MovePriority)> {
    let mut scored: Vec<(Pos, MovePriority)> = candidates
        .into_iter()
        .map(|pos| (pos, move_priority(board, pos, mover)))
        .collect();

    scored.sort_by(|a, b| a.1.cmp_defense_first(&b.1).then_with(|| a.0.cmp(&b.0)));
    scored
}

/// Static evaluation from `ai`'s point of view.
///
/// Sum of the AI's threat values over the empty candidates minus the
/// human's, with the human side weighted by [`defensive`]. Clamped to
/// [`EVAL_LIMIT`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn evaluate_position(board: &mut Board, candidates: &[Pos], ai: Stone) -> i32 {
    let human = ai.opponent();
    let mut total: i64 = 0;

    for &pos in candidates {
        if !board.is_empty(pos) {
            continue;
        }
        total += i64::from(score_placement(board, pos, ai));
        total -= i64::from(defensive(score_placement(board, pos, human)));
    }

    let limit = i64::from(EVAL_LIMIT);
    // Clamped into ±EVAL_LIMIT, so the value fits an i32
    total.clamp(-limit, limit) as i32
}
