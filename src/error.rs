//! Error types for the engine and session layer

use crate::board::Pos;
use crate::session::GameStatus;

/// Why a move was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Row or column outside `[0, BOARD_SIZE)`
    OutOfBounds,
    /// Cell already holds a stone
    Occupied,
    /// Tried to place `Stone::Empty`
    EmptyStone,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InvalidReason::OutOfBounds => "out of bounds",
            InvalidReason::Occupied => "cell is occupied",
            InvalidReason::EmptyStone => "no stone color given",
        };
        f.write_str(text)
    }
}

/// Main error type for the Gomoku engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// User-facing: the requested move is illegal. State is unchanged.
    #[error("invalid move at {pos}: {reason}")]
    InvalidMove { pos: Pos, reason: InvalidReason },

    /// User-facing: the game has already ended. State is unchanged.
    #[error("game is already over ({status:?})")]
    MoveOnTerminalGame { status: GameStatus },

    /// Logic defect inside the engine. Never expected in a correct build.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl GameError {
    pub fn invalid(pos: Pos, reason: InvalidReason) -> Self {
        GameError::InvalidMove { pos, reason }
    }

    /// True for the errors a caller should report back to the player.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, GameError::InvariantViolation(_))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GameError>;
