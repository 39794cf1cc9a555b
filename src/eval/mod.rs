//! Threat evaluation
//!
//! - `patterns`: the run/open-end scoring table and the defensive bias
//! - `threat`: per-cell threat scores, move priorities and the leaf evaluation

pub mod patterns;
pub mod threat;

pub use patterns::{defensive, PatternScore};
pub use threat::{evaluate_position, move_priority, order_candidates, score_placement, MovePriority, EVAL_LIMIT};
