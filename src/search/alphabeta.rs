//! Alpha-Beta search with iterative deepening
//!
//! Plain minimax with explicit max (AI to move) and min (human to move)
//! layers, scored from the AI's point of view throughout.
//!
//! # Features
//!
//! - Iterative deepening with the previous depth's best move searched first.
//!   Root candidates are ordered once per decision; later depths only move
//!   the principal move to the front
//! - Threat-ordered, width-limited candidate lists at every node
//! - A cell that completes five for the side to move is never cut by the
//!   width limit
//! - Early exit once a forced win is found
//! - Optional deadline and an external stop flag; an interrupted depth is
//!   thrown away and the last completed depth is kept
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::Searcher;
//! use gomoku::EngineConfig;
//!
//! let mut searcher = Searcher::new(EngineConfig::default());
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! let result = searcher.search(&board, Stone::White);
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: {}", best_move);
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::board::{Board, Placement, Pos, Stone};
use crate::config::EngineConfig;
use crate::eval::{evaluate_position, order_candidates};
use crate::rules::check_win;

use super::movegen::generate_candidates;

/// Score of a completed five, before the depth adjustment.
pub const WIN_SCORE: i32 = 1_000_000_000;

/// Root scores at or above this end iterative deepening.
pub const DECISIVE_SCORE: i32 = WIN_SCORE - 100;

/// Infinity score for alpha-beta bounds
const INF: i32 = WIN_SCORE + 1_000;

/// Nodes between wall-clock checks. The stop flag is read at every node.
const TIME_CHECK_INTERVAL: u64 = 64;

/// Shared cancellation flag.
///
/// Clones share the flag, so a host can keep one and hand another to the
/// engine running on a worker thread.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask any search holding this handle to stop at its next check.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` only when the board has no empty cell
    pub best_move: Option<Pos>,
    /// Score of the best move from the AI's point of view
    pub score: i32,
    /// Deepest fully completed iteration (0 if none completed)
    pub depth: i8,
    /// Total nodes searched
    pub nodes: u64,
    /// The deadline or stop flag cut the search short
    pub aborted: bool,
}

/// Iterative deepening alpha-beta searcher.
pub struct Searcher {
    config: EngineConfig,
    stop: StopHandle,
    ai: Stone,
    nodes: u64,
    deadline: Option<Instant>,
    aborted: bool,
}

impl Searcher {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_stop_handle(config, StopHandle::new())
    }

    /// Searcher that also stops when `stop` is raised.
    #[must_use]
    pub fn with_stop_handle(config: EngineConfig, stop: StopHandle) -> Self {
        Self {
            config,
            stop,
            ai: Stone::Empty,
            nodes: 0,
            deadline: None,
            aborted: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Best move for `ai` on `board`.
    ///
    /// The caller's board is never touched; the search works on a private
    /// copy and every trial stone is taken back before returning.
    #[must_use]
    pub fn search(&mut self, board: &Board, ai: Stone) -> SearchResult {
        self.ai = ai;
        self.nodes = 0;
        self.aborted = false;
        self.deadline = self.config.time_limit.map(|limit| Instant::now() + limit);

        let mut work = board.clone();
        let max_depth = self.config.max_depth_for(board.stone_count());

        let candidates = generate_candidates(&work);
        let winning = winning_cell(&work, &candidates, ai);
        let ordered = order_candidates(&mut work, candidates, ai);
        let mut root_moves: Vec<Pos> = ordered.into_iter().map(|(pos, _)| pos).collect();
        if let Some(win) = winning {
            root_moves.retain(|&p| p != win);
            root_moves.insert(0, win);
        }
        root_moves.truncate(self.config.root_width.max(1));

        let mut best = SearchResult {
            best_move: root_moves.first().copied(),
            score: 0,
            depth: 0,
            nodes: 0,
            aborted: false,
        };
        if root_moves.is_empty() {
            return best;
        }

        for depth in 1..=max_depth {
            let Some((mv, score)) = self.search_root(&mut work, &root_moves, depth) else {
                log::warn!(
                    "search interrupted at depth {} after {} nodes, keeping depth {}",
                    depth,
                    self.nodes,
                    best.depth
                );
                best.aborted = true;
                break;
            };

            best.best_move = Some(mv);
            best.score = score;
            best.depth = depth;
            log::debug!("depth {}: best {} score {} nodes {}", depth, mv, score, self.nodes);

            // Principal move first at the next depth
            if let Some(idx) = root_moves.iter().position(|&p| p == mv) {
                root_moves[..=idx].rotate_right(1);
            }

            if score >= DECISIVE_SCORE {
                break;
            }
        }

        debug_assert_eq!(&work, board, "search left stones on the board");
        best.nodes = self.nodes;
        best
    }

    /// One full-width root iteration. `None` if the search was interrupted.
    ///
    /// Ties keep the earlier move, so the ordering decides between equals.
    fn search_root(&mut self, board: &mut Board, moves: &[Pos], depth: i8) -> Option<(Pos, i32)> {
        let mut alpha = -INF;
        let mut best: Option<(Pos, i32)> = None;

        for &mv in moves {
            let score = {
                let mut child = Placement::new(board, mv, self.ai);
                self.minimax(&mut child, depth - 1, false, alpha, INF, mv)
            };
            if self.aborted {
                return None;
            }
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        best
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `last_move` is the stone just played; `maximizing` is true when the
    /// AI is the side to move at this node.
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: i8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        last_move: Pos,
    ) -> i32 {
        self.nodes += 1;
        if self.should_stop() {
            return 0;
        }

        let just_moved = if maximizing { self.ai.opponent() } else { self.ai };
        if check_win(board, last_move, just_moved) {
            // Sooner wins (more depth left) score higher, sooner losses lower
            let score = WIN_SCORE + i32::from(depth);
            return if just_moved == self.ai { score } else { -score };
        }
        if board.is_full() {
            return 0;
        }

        let candidates = generate_candidates(board);
        if depth <= 0 {
            return evaluate_position(board, &candidates, self.ai);
        }

        let side = if maximizing { self.ai } else { self.ai.opponent() };
        // Same score the child would report after the five is played
        if winning_cell(board, &candidates, side).is_some() {
            let score = WIN_SCORE + i32::from(depth - 1);
            return if side == self.ai { score } else { -score };
        }

        let mut ordered = order_candidates(board, candidates, side);
        ordered.truncate(self.config.node_width.max(1));

        if maximizing {
            let mut best = -INF;
            for (mv, _) in ordered {
                let score = {
                    let mut child = Placement::new(board, mv, side);
                    self.minimax(&mut child, depth - 1, false, alpha, beta, mv)
                };
                if self.aborted {
                    return 0;
                }
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INF;
            for (mv, _) in ordered {
                let score = {
                    let mut child = Placement::new(board, mv, side);
                    self.minimax(&mut child, depth - 1, true, alpha, beta, mv)
                };
                if self.aborted {
                    return 0;
                }
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Latch `aborted` once the stop flag is raised or the deadline passes.
    #[inline]
    fn should_stop(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        let timed_out = self.nodes % TIME_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        if timed_out || self.stop.is_stopped() {
            self.aborted = true;
        }
        self.aborted
    }
}

/// First candidate where `color` would complete five.
fn winning_cell(board: &Board, candidates: &[Pos], color: Stone) -> Option<Pos> {
    candidates.iter().copied().find(|&pos| check_win(board, pos, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

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
    fn test_search_empty_board() {
        let mut searcher = Searcher::new(EngineConfig::default());
        let board = Board::new();

        let result = searcher.search(&board, Stone::Black);
        assert_eq!(result.best_move, Some(Pos::center()));
        assert!(!result.aborted);
    }

    #[test]
    fn test_search_finds_winning_move() {
        let mut searcher = Searcher::new(EngineConfig::default());
        let board = board_with(&[(0, 0), (14, 14), (0, 14)], &[(9, 3), (9, 4), (9, 5), (9, 6)]);

        let result = searcher.search(&board, Stone::White);
        let mv = result.best_move.unwrap();
        assert!(mv == Pos::new(9, 2) || mv == Pos::new(9, 7), "got {}", mv);
        assert!(result.score >= DECISIVE_SCORE);
        assert_eq!(result.depth, 1, "a win found at depth 1 ends the search");
    }

    #[test]
    fn test_winning_cell_survives_narrow_root() {
        // Many cells around the corners outrank the five for defense
        let config = EngineConfig {
            root_width: 1,
            ..EngineConfig::default()
        };
        let board = board_with(&[(0, 0), (14, 14), (0, 14)], &[(9, 3), (9, 4), (9, 5), (9, 6)]);

        let result = Searcher::new(config).search(&board, Stone::White);
        assert_eq!(result.best_move, Some(Pos::new(9, 2)));
        assert!(result.score >= DECISIVE_SCORE);
    }

    #[test]
    fn test_opponent_five_seen_below_width_limit() {
        // Black's five at (12,2) scores low for defense but still ends the line
        let config = EngineConfig {
            node_width: 1,
            ..EngineConfig::default()
        };
        let mut board = board_with(&[(12, 3), (12, 4), (12, 5), (12, 6)], &[(6, 6), (6, 7), (7, 6)]);
        let mut searcher = Searcher::new(config);
        searcher.ai = Stone::White;
        let mut child = Placement::new(&mut board, Pos::new(5, 5), Stone::White);
        let score = searcher.minimax(&mut child, 1, false, -INF, INF, Pos::new(5, 5));
        assert_eq!(score, -WIN_SCORE);
    }

    #[test]
    fn test_search_blocks_open_three() {
        let mut searcher = Searcher::new(EngineConfig::default());
        let board = board_with(&[(3, 3), (3, 4), (3, 5)], &[(10, 10)]);

        let result = searcher.search(&board, Stone::White);
        let mv = result.best_move.unwrap();
        assert!(mv == Pos::new(3, 2) || mv == Pos::new(3, 6), "got {}", mv);
    }

    #[test]
    fn test_search_restores_board() {
        let mut searcher = Searcher::new(EngineConfig::default());
        let board = board_with(&[(7, 7), (8, 8), (6, 9)], &[(7, 8), (9, 9)]);
        let before = board.clone();
        let _ = searcher.search(&board, Stone::Black);
        assert_eq!(board, before);
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = board_with(&[(7, 7), (8, 8), (6, 6)], &[(7, 8), (8, 7)]);
        let a = Searcher::new(EngineConfig::default()).search(&board, Stone::White);
        let b = Searcher::new(EngineConfig::default()).search(&board, Stone::White);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn test_search_losing_score() {
        // Black has two separate open fours; White cannot stop both
        let board = board_with(
            &[(2, 2), (2, 3), (2, 4), (2, 5), (10, 2), (10, 3), (10, 4), (10, 5)],
            &[(5, 9), (6, 9), (7, 11), (12, 12), (13, 0), (0, 13), (14, 7), (5, 13)],
        );
        let config = EngineConfig::default().with_max_depth(2);
        let result = Searcher::new(config).search(&board, Stone::White);
        assert!(result.score <= -WIN_SCORE, "score {}", result.score);
    }

    #[test]
    fn test_depth_follows_schedule() {
        let board = board_with(&[(7, 7)], &[]);
        let result = Searcher::new(EngineConfig::default()).search(&board, Stone::White);
        assert_eq!(result.depth, 2);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_stop_handle_before_search_falls_back_to_ordering() {
        let stop = StopHandle::new();
        stop.stop();
        let mut searcher = Searcher::with_stop_handle(EngineConfig::default(), stop);
        let board = board_with(&[(3, 3), (3, 4), (3, 5)], &[(10, 10)]);

        let result = searcher.search(&board, Stone::White);
        assert!(result.aborted);
        assert_eq!(result.depth, 0);
        // Top ordered root candidate: the smaller end of the open three
        assert_eq!(result.best_move, Some(Pos::new(3, 2)));
        assert_eq!(board, board_with(&[(3, 3), (3, 4), (3, 5)], &[(10, 10)]));
    }

    #[test]
    fn test_zero_time_limit_aborts() {
        let config = EngineConfig::default().with_time_limit(Duration::ZERO);
        let mut searcher = Searcher::new(config);
        let board = board_with(&[(7, 7), (7, 8)], &[(8, 8)]);

        let result = searcher.search(&board, Stone::White);
        assert!(result.aborted);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_stop_handle_reset() {
        let stop = StopHandle::new();
        let shared = stop.clone();
        shared.stop();
        assert!(stop.is_stopped());
        stop.reset();
        assert!(!shared.is_stopped());
    }
}
