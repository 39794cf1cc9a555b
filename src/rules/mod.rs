//! Game rules for free-style Gomoku
//!
//! - Five or more in a row wins
//! - A full board without a line is a draw

pub mod win;

// Re-exports for convenient access
pub use win::{check_win, find_five_line, is_draw};
