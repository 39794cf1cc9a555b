//! Gomoku AI opponent
//!
//! A computer opponent for free-style Gomoku:
//! - 15x15 board, Black moves first
//! - Five or more in a row wins (overlines count)
//! - A full board without a line is a draw
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - [`board`]: Board representation with bitboards, scoped trial placement
//! - [`rules`]: Win and draw detection
//! - [`eval`]: Threat scoring, move ordering and leaf evaluation
//! - [`search`]: Candidate generation and alpha-beta with iterative deepening
//! - [`engine`]: Decision policy (win, block, search)
//! - [`session`]: Game sessions that hosts drive
//! - [`ui`]: egui desktop host
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{start_game, AIEngine, Pos, Stone};
//!
//! let mut session = start_game();
//! let mut engine = AIEngine::new();
//!
//! session.apply_move(Pos::new(7, 7), Stone::Black).unwrap();
//! let reply = session.request_ai_move(&mut engine).unwrap();
//! println!("AI plays at {}", reply.pos);
//! ```
//!
//! # Decision Priority
//!
//! 1. Immediate winning move
//! 2. Block the opponent's immediate win
//! 3. Alpha-Beta search over threat-ordered candidates

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod logging;
pub mod rules;
pub mod search;
pub mod session;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{GameError, InvalidReason, Result};
pub use search::{SearchResult, StopHandle};
pub use session::{start_game, AiMove, GameSession, GameStatus, SessionSnapshot};
