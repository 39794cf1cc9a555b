//! Main AI engine: decides the opponent's next move
//!
//! The decision follows a fixed priority:
//!
//! 1. **Immediate win**: any empty cell that completes five for the AI
//! 2. **Forced block**: any empty cell that would complete five for the opponent
//! 3. **Alpha-Beta**: iterative deepening search over threat-ordered candidates
//!
//! Both immediate checks scan the whole board in row-major order, so a
//! threat far from the recent fighting is never missed.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Pos, Stone};
//!
//! let mut engine = AIEngine::new();
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! let result = engine.choose_move(&board, Stone::White).unwrap();
//! println!("Best move: {}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::rules::check_win;
use crate::search::{SearchResult, Searcher, StopHandle, WIN_SCORE};

/// Which stage of the decision produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Completes five for the AI
    ImmediateWin,
    /// Occupies the cell where the opponent would complete five
    Block,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move decision with search statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Chosen cell
    pub best_move: Pos,
    /// Score from the AI's point of view
    pub score: i32,
    /// Stage that found this move
    pub search_type: SearchType,
    /// Deepest completed search depth (0 for the immediate checks)
    pub depth: i8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn immediate_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score: WIN_SCORE,
            search_type: SearchType::ImmediateWin,
            depth: 0,
            nodes: 0,
            time_ms,
        }
    }

    #[inline]
    fn block(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score: 0,
            search_type: SearchType::Block,
            depth: 0,
            nodes: 0,
            time_ms,
        }
    }

    #[inline]
    fn from_alphabeta(pos: Pos, result: &SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: pos,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            depth: result.depth,
            nodes: result.nodes,
            time_ms,
        }
    }
}

/// Main AI engine for Gomoku.
///
/// Holds the searcher and its configuration. One engine can serve many
/// decisions; nothing carries over between calls, so the same board always
/// gets the same answer.
pub struct AIEngine {
    searcher: Searcher,
}

impl AIEngine {
    /// Engine with the default depth schedule (2, 3, 4) and widths (12, 8).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
        }
    }

    /// Engine whose search also stops when `stop` is raised.
    #[must_use]
    pub fn with_stop_handle(config: EngineConfig, stop: StopHandle) -> Self {
        Self {
            searcher: Searcher::with_stop_handle(config, stop),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.searcher.config()
    }

    /// Handle that cancels a running [`AIEngine::choose_move`].
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.searcher.stop_handle()
    }

    /// Convenience wrapper returning only the cell.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, color: Stone) -> Option<Pos> {
        self.choose_move(board, color).map(|result| result.best_move)
    }

    /// Pick the next move for `color`.
    ///
    /// Returns `None` only when the board has no empty cell. The board is
    /// not modified; committing the move is the caller's job.
    #[must_use]
    pub fn choose_move(&mut self, board: &Board, color: Stone) -> Option<MoveResult> {
        let start = Instant::now();
        let elapsed_ms = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        if board.is_full() {
            return None;
        }

        if let Some(pos) = find_immediate_win(board, color) {
            log::info!("{:?} plays {}: completes five", color, pos);
            return Some(MoveResult::immediate_win(pos, elapsed_ms()));
        }

        if let Some(pos) = find_immediate_win(board, color.opponent()) {
            log::info!("{:?} plays {}: blocks a five", color, pos);
            return Some(MoveResult::block(pos, elapsed_ms()));
        }

        let result = self.searcher.search(board, color);
        let pos = result.best_move?;
        let move_result = MoveResult::from_alphabeta(pos, &result, elapsed_ms());
        log::info!(
            "{:?} plays {}: score {} depth {} nodes {} in {}ms{}",
            color,
            pos,
            move_result.score,
            move_result.depth,
            move_result.nodes,
            move_result.time_ms,
            if result.aborted { " (interrupted)" } else { "" }
        );
        Some(move_result)
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// First empty cell in row-major order where `color` would complete five.
#[must_use]
pub fn find_immediate_win(board: &Board, color: Stone) -> Option<Pos> {
    board
        .empty_cells()
        .find(|&pos| check_win(board, pos, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn board_with(black: &[(u8, u8)], white: &[(u8, u8)]) -> Board {
        let mut board = Board::new();
        for &(r, c) in black {
            board.place_stone(Pos::new(r, c), Stone::Black).unwrap();
        }
        for &(r, c) in white {
            board.place_stone(Pos::new(r, c), Stone::White).unwrap();
        }
        board
    }

    #[test]
    fn test_engine_default() {
        let engine = AIEngine::default();
        assert_eq!(engine.config(), &EngineConfig::default());
    }

    #[test]
    fn test_engine_empty_board() {
        let mut engine = AIEngine::new();
        let result = engine.choose_move(&Board::new(), Stone::Black).unwrap();
        assert_eq!(result.best_move, Pos::center());
        assert_eq!(result.search_type, SearchType::AlphaBeta);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut engine = AIEngine::new();
        let board = board_with(&[(0, 0), (1, 1), (14, 0), (14, 14)], &[(5, 5), (5, 6), (5, 7), (5, 8)]);

        let result = engine.choose_move(&board, Stone::White).unwrap();
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        // Row-major scan reaches (5,4) before (5,9)
        assert_eq!(result.best_move, Pos::new(5, 4));
    }

    #[test]
    fn test_win_preferred_over_block() {
        let mut engine = AIEngine::new();
        let board = board_with(&[(1, 1), (1, 2), (1, 3), (1, 4)], &[(9, 5), (9, 6), (9, 7), (9, 8)]);

        let result = engine.choose_move(&board, Stone::White).unwrap();
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert!(result.best_move == Pos::new(9, 4) || result.best_move == Pos::new(9, 9));
    }

    #[test]
    fn test_engine_blocks_opponent_four() {
        let mut engine = AIEngine::new();
        let board = board_with(&[(3, 3), (3, 4), (3, 5), (3, 6)], &[(10, 10), (11, 12), (12, 10)]);

        let result = engine.choose_move(&board, Stone::White).unwrap();
        assert_eq!(result.search_type, SearchType::Block);
        assert_eq!(result.best_move, Pos::new(3, 2));
    }

    #[test]
    fn test_block_found_far_from_last_move() {
        let mut engine = AIEngine::new();
        // Closed four in the corner; recent play is on the other side of the board
        let board = board_with(&[(0, 0), (1, 1), (2, 2), (3, 3)], &[(12, 12), (12, 13), (13, 12)]);

        let result = engine.choose_move(&board, Stone::White).unwrap();
        assert_eq!(result.search_type, SearchType::Block);
        assert_eq!(result.best_move, Pos::new(4, 4));
    }

    #[test]
    fn test_engine_blocks_open_three() {
        let mut engine = AIEngine::new();
        let board = board_with(&[(3, 3), (3, 4), (3, 5)], &[(10, 10)]);

        let result = engine.choose_move(&board, Stone::White).unwrap();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert!(
            result.best_move == Pos::new(3, 2) || result.best_move == Pos::new(3, 6),
            "got {}",
            result.best_move
        );
    }

    #[test]
    fn test_engine_is_deterministic() {
        let board = board_with(&[(7, 7), (8, 8), (6, 8)], &[(7, 8), (8, 7)]);
        let a = AIEngine::new().choose_move(&board, Stone::White).unwrap();
        let b = AIEngine::new().choose_move(&board, Stone::White).unwrap();
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn test_engine_full_board_returns_none() {
        let mut board = Board::new();
        for idx in 0..crate::board::TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            let color = if (pos.col / 2 + pos.row) % 2 == 0 { Stone::Black } else { Stone::White };
            board.place_stone(pos, color).unwrap();
        }
        let mut engine = AIEngine::new();
        assert_matches!(engine.choose_move(&board, Stone::White), None);
    }

    #[test]
    fn test_engine_does_not_modify_board() {
        let board = board_with(&[(7, 7), (7, 9)], &[(8, 8)]);
        let before = board.clone();
        let mut engine = AIEngine::new();
        let _ = engine.get_move(&board, Stone::White);
        assert_eq!(board, before);
    }

    #[test]
    fn test_engine_alternating_colors() {
        let mut engine = AIEngine::new();
        let mut board = Board::new();
        let mut color = Stone::Black;
        for _ in 0..6 {
            let pos = engine.get_move(&board, color).unwrap();
            board.place_stone(pos, color).unwrap();
            color = color.opponent();
        }
        assert_eq!(board.stone_count(), 6);
    }

    #[test]
    fn test_stopped_engine_still_answers() {
        let stop = StopHandle::new();
        let mut engine = AIEngine::with_stop_handle(EngineConfig::default(), stop.clone());
        engine.stop_handle().stop();
        assert!(stop.is_stopped());
        let board = board_with(&[(7, 7)], &[]);
        let result = engine.choose_move(&board, Stone::White).unwrap();
        assert_eq!(result.depth, 0);
        assert!(board.is_empty(result.best_move));
    }

    #[test]
    fn test_find_immediate_win_none_without_four() {
        let board = board_with(&[(3, 3), (3, 4), (3, 5)], &[]);
        assert_eq!(find_immediate_win(&board, Stone::Black), None);
        assert_eq!(find_immediate_win(&board, Stone::White), None);
    }
}
