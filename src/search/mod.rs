//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate generation around existing stones
//! - Alpha-Beta search with iterative deepening

pub mod alphabeta;
pub mod movegen;

pub use alphabeta::{SearchResult, Searcher, StopHandle, DECISIVE_SCORE, WIN_SCORE};
pub use movegen::generate_candidates;
