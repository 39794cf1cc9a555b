//! Pattern scores for Gomoku evaluation
//!
//! A line through a candidate cell is classified by the length of its
//! contiguous run and by how many of the run's two ends are still open.
//! The table is monotonic: a longer run, or more open ends at the same
//! length, never scores less.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five (or more) in a row
    pub const FIVE: i32 = 1_000_000;

    /// Open four: _OOOO_ (cannot be stopped)
    pub const OPEN_FOUR: i32 = 100_000;
    /// Closed four: XOOOO_ or _OOOOX (one way to extend)
    pub const CLOSED_FOUR: i32 = 50_000;

    /// Open three: _OOO_ (becomes open four if not blocked)
    pub const OPEN_THREE: i32 = 10_000;
    /// Closed three: XOOO_ or _OOOX
    pub const CLOSED_THREE: i32 = 1_500;

    /// Open two: _OO_
    pub const OPEN_TWO: i32 = 1_000;
    /// Closed two: XOO_ or _OOX
    pub const CLOSED_TWO: i32 = 200;

    /// Lone stone with room on both sides
    pub const OPEN_ONE: i32 = 10;
    /// Anything else: dead shapes, fully blocked singles
    pub const MINIMAL: i32 = 1;

    /// Score for one axis given the run length through the cell and the
    /// number of open ends (0, 1 or 2).
    #[must_use]
    pub fn line(run: i32, open_ends: u8) -> i32 {
        match (run, open_ends) {
            (r, _) if r >= 5 => Self::FIVE,
            (4, 2) => Self::OPEN_FOUR,
            (4, 1) => Self::CLOSED_FOUR,
            (3, 2) => Self::OPEN_THREE,
            (3, 1) => Self::CLOSED_THREE,
            (2, 2) => Self::OPEN_TWO,
            (2, 1) => Self::CLOSED_TWO,
            (1, 2) => Self::OPEN_ONE,
            _ => Self::MINIMAL,
        }
    }
}

/// Defensive weighting applied to the opponent's threats: 125%.
///
/// Saturating so a pile of fives on a crowded board cannot wrap.
#[inline]
#[must_use]
pub fn defensive(score: i32) -> i32 {
    score.saturating_add(score / 4)
}
