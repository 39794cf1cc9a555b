//! Game session: the board plus the bookkeeping around it
//!
//! A [`GameSession`] is what hosts talk to. It validates and commits moves,
//! tracks whose stones are whose, detects the end of the game and asks the
//! engine for the AI's reply.
//!
//! ```
//! use gomoku::{start_game, AIEngine, GameStatus, Pos, Stone};
//!
//! let mut session = start_game();
//! let mut engine = AIEngine::new();
//!
//! session.apply_move(Pos::new(7, 7), Stone::Black).unwrap();
//! let reply = session.request_ai_move(&mut engine).unwrap();
//! assert_eq!(reply.status, GameStatus::InProgress);
//! assert_eq!(session.move_count(), 2);
//! ```

use crate::board::{Board, Pos, Stone, BOARD_SIZE};
use crate::engine::{AIEngine, MoveResult};
use crate::error::{GameError, Result};
use crate::rules::{check_win, find_five_line, is_draw};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    BlackWon,
    WhiteWon,
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Winning color, if any
    pub fn winner(self) -> Option<Stone> {
        match self {
            GameStatus::BlackWon => Some(Stone::Black),
            GameStatus::WhiteWon => Some(Stone::White),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    fn won_by(stone: Stone) -> Self {
        match stone {
            Stone::White => GameStatus::WhiteWon,
            _ => GameStatus::BlackWon,
        }
    }
}

/// Read-only copy of the session for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub cells: [[Stone; BOARD_SIZE]; BOARD_SIZE],
    pub move_count: u32,
    pub last_move: Option<Pos>,
    pub status: GameStatus,
}

/// The AI's committed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiMove {
    pub pos: Pos,
    pub status: GameStatus,
    pub result: MoveResult,
}

/// One game between a human and the engine.
///
/// `move_count` always equals the number of stones on the board.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    move_count: u32,
    last_move: Option<Pos>,
    status: GameStatus,
    ai_color: Stone,
}

/// Fresh game with the human on Black (moving first) and the AI on White.
#[must_use]
pub fn start_game() -> GameSession {
    GameSession::new(Stone::White)
}

impl GameSession {
    /// Fresh game with the AI playing `ai_color`. `Stone::Empty` is treated
    /// as White.
    #[must_use]
    pub fn new(ai_color: Stone) -> Self {
        let ai_color = if ai_color.is_empty() { Stone::White } else { ai_color };
        log::debug!("new game, AI plays {:?}", ai_color);
        Self {
            board: Board::new(),
            move_count: 0,
            last_move: None,
            status: GameStatus::InProgress,
            ai_color,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn ai_color(&self) -> Stone {
        self.ai_color
    }

    #[inline]
    pub fn human_color(&self) -> Stone {
        self.ai_color.opponent()
    }

    /// Black moves on even counts. Alternation is the host's to enforce;
    /// this only reports whose turn it would be.
    #[inline]
    pub fn side_to_move(&self) -> Stone {
        if self.move_count % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        }
    }

    /// Validate and commit `stone` at `pos`, returning the new status.
    ///
    /// Rejected moves leave the session unchanged.
    pub fn apply_move(&mut self, pos: Pos, stone: Stone) -> Result<GameStatus> {
        if self.status.is_terminal() {
            return Err(GameError::MoveOnTerminalGame { status: self.status });
        }
        self.board.place_stone(pos, stone)?;
        self.move_count += 1;
        self.last_move = Some(pos);

        let won = check_win(&self.board, pos, stone);
        if won {
            self.status = GameStatus::won_by(stone);
        } else if is_draw(&self.board, won) {
            self.status = GameStatus::Draw;
        }

        if self.status.is_terminal() {
            log::info!("game over after {} moves: {:?}", self.move_count, self.status);
        }
        Ok(self.status)
    }

    /// Ask `engine` for the AI's move and commit it.
    pub fn request_ai_move(&mut self, engine: &mut AIEngine) -> Result<AiMove> {
        if self.status.is_terminal() {
            return Err(GameError::MoveOnTerminalGame { status: self.status });
        }
        let Some(result) = engine.choose_move(&self.board, self.ai_color) else {
            log::error!("engine found no move on a board that is not finished");
            return Err(GameError::InvariantViolation(
                "no move available while the game is in progress".to_string(),
            ));
        };
        let status = self.commit_engine_move(result.best_move)?;
        Ok(AiMove {
            pos: result.best_move,
            status,
            result,
        })
    }

    /// Commit a move the engine produced elsewhere (e.g. on a worker thread).
    ///
    /// The engine only offers empty cells, so an illegal placement here is
    /// reported as an invariant violation rather than a user error.
    pub fn commit_engine_move(&mut self, pos: Pos) -> Result<GameStatus> {
        match self.apply_move(pos, self.ai_color) {
            Err(GameError::InvalidMove { pos, reason }) => {
                log::error!("engine chose illegal move {}: {}", pos, reason);
                Err(GameError::InvariantViolation(format!(
                    "engine chose illegal move {pos}: {reason}"
                )))
            }
            other => other,
        }
    }

    /// Current state for display (`queryState`).
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cells: self.board.cells(),
            move_count: self.move_count,
            last_move: self.last_move,
            status: self.status,
        }
    }

    /// The five cells of the winning line once the game is won.
    #[must_use]
    pub fn winning_line(&self) -> Option<[Pos; 5]> {
        let winner = self.status.winner()?;
        let last = self.last_move?;
        find_five_line(&self.board, last, winner)
    }
}
