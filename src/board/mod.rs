//! Board representation for Gomoku

pub mod bitboard;
pub mod board;
pub mod placement;


// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;
pub use placement::Placement;

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// The four line axes through a cell: horizontal, vertical, diagonal SE, diagonal SW.
/// Each axis is scanned in both directions, so one vector per axis is enough.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Stone::Empty
    }
}

/// Position on the board
///
/// Fields are public so hosts can express any requested coordinate; whether
/// it lies on the board is checked by [`Pos::in_bounds`] when a move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Build a position from signed coordinates, `None` when off the board.
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        if Self::is_valid(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Center of the board
    #[inline]
    pub const fn center() -> Self {
        Self {
            row: (BOARD_SIZE / 2) as u8,
            col: (BOARD_SIZE / 2) as u8,
        }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Step `k` cells along `(dr, dc)`, `None` when that leaves the board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, k: i32) -> Option<Pos> {
        Pos::try_new(i32::from(self.row) + dr * k, i32::from(self.col) + dc * k)
    }

    /// Chebyshev distance (king moves)
    #[inline]
    pub fn chebyshev(self, other: Pos) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Manhattan distance
    #[inline]
    pub fn manhattan(self, other: Pos) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}
