//! Engine tuning knobs
//!
//! Defaults reproduce the classic opponent: shallow search early, deeper as
//! the board fills, no wall-clock limit.

use std::time::Duration;

/// Search configuration shared by [`crate::AIEngine`] and the searcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Depth while fewer than 10 stones are on the board
    pub early_depth: i8,
    /// Depth while fewer than 20 stones are on the board
    pub mid_depth: i8,
    /// Depth from 20 stones on
    pub late_depth: i8,
    /// Candidates searched at the root
    pub root_width: usize,
    /// Candidates searched at every internal node
    pub node_width: usize,
    /// Wall-clock budget per decision. `None` searches every depth fully.
    pub time_limit: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            early_depth: 2,
            mid_depth: 3,
            late_depth: 4,
            root_width: 12,
            node_width: 8,
            time_limit: None,
        }
    }
}

impl EngineConfig {
    /// Stone count below which `early_depth` applies.
    pub const EARLY_STONES: u32 = 10;
    /// Stone count below which `mid_depth` applies.
    pub const MID_STONES: u32 = 20;

    /// Iterative deepening ceiling for a board holding `stones` stones.
    /// Never less than 1.
    #[must_use]
    pub fn max_depth_for(&self, stones: u32) -> i8 {
        let depth = if stones < Self::EARLY_STONES {
            self.early_depth
        } else if stones < Self::MID_STONES {
            self.mid_depth
        } else {
            self.late_depth
        };
        depth.max(1)
    }

    /// Cap every phase of the depth schedule at `depth`.
    #[must_use]
    pub fn with_max_depth(mut self, depth: i8) -> Self {
        let depth = depth.max(1);
        self.early_depth = self.early_depth.min(depth);
        self.mid_depth = self.mid_depth.min(depth);
        self.late_depth = self.late_depth.min(depth);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
