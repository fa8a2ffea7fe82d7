//! Alpaca - Engine Configuration
//!
//! Settings shared by the session loops and the command line, plus the
//! translation of `go`-style clock parameters into search limits.

use crate::search::SearchInfo;
use crate::transposition::{HASH_MAX_MB, HASH_MIN_MB};
use crate::types::MAX_DEPTH;
use std::time::Duration;

pub const DEFAULT_HASH_MB: usize = 64;
pub const DEFAULT_MOVE_OVERHEAD_MS: u64 = 50;
pub const DEFAULT_MOVES_TO_GO: u32 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub hash_mb: usize,
    pub default_depth: i32,
    /// Subtracted from every clock-derived budget
    pub move_overhead_ms: u64,
    /// Assumed moves left when the clock gives none
    pub default_moves_to_go: u32,
    pub post_thinking: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            hash_mb: DEFAULT_HASH_MB,
            default_depth: MAX_DEPTH as i32,
            move_overhead_ms: DEFAULT_MOVE_OVERHEAD_MS,
            default_moves_to_go: DEFAULT_MOVES_TO_GO,
            post_thinking: true,
        }
    }
}

impl EngineConfig {
    pub fn with_hash(mut self, hash_mb: usize) -> Self {
        self.hash_mb = hash_mb.clamp(HASH_MIN_MB, HASH_MAX_MB);
        self
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.default_depth = depth.clamp(1, MAX_DEPTH as i32);
        self
    }

    /// Search limits for one move
    pub fn search_info(&self, limits: &TimeControl) -> SearchInfo {
        let depth = if limits.infinite { MAX_DEPTH as i32 } else { limits.depth.unwrap_or(self.default_depth) };
        let mut info = SearchInfo::new(depth);
        info.post_thinking = self.post_thinking;
        info.node_limit = limits.nodes;

        if !limits.infinite {
            if let Some(budget) = self.time_budget(limits) {
                info.set_time_budget(budget);
            }
        }
        info
    }

    /// Thinking time: fixed movetime, or clock split over moves-to-go less overhead plus increment
    pub fn time_budget(&self, limits: &TimeControl) -> Option<Duration> {
        if let Some(movetime) = limits.movetime {
            return Some(Duration::from_millis(movetime));
        }
        let time = limits.time?;
        let moves_to_go = limits.moves_to_go.unwrap_or(self.default_moves_to_go).max(1) as u64;
        let share = (time / moves_to_go).saturating_sub(self.move_overhead_ms);
        Some(Duration::from_millis((share + limits.inc).max(1)))
    }
}

/// Clock parameters of a single `go` request, already resolved for the side to move
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeControl {
    pub depth: Option<i32>,
    pub movetime: Option<u64>,
    pub time: Option<u64>,
    pub inc: u64,
    pub moves_to_go: Option<u32>,
    pub nodes: Option<u64>,
    pub infinite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.hash_mb, 64);
        assert_eq!(config.default_depth, MAX_DEPTH as i32);
        assert_eq!(config.move_overhead_ms, 50);
        assert_eq!(config.default_moves_to_go, 30);
        assert!(config.post_thinking);
        assert_eq!(EngineConfig::default().with_hash(1).hash_mb, HASH_MIN_MB);
        assert_eq!(EngineConfig::default().with_depth(500).default_depth, MAX_DEPTH as i32);
    }

    #[test]
    fn test_clock_budget() {
        let config = EngineConfig::default();
        let limits = TimeControl { time: Some(60_000), inc: 1_000, ..Default::default() };
        assert_eq!(config.time_budget(&limits), Some(Duration::from_millis(2_000 - 50 + 1_000)));

        let limits = TimeControl { time: Some(10_000), moves_to_go: Some(5), ..Default::default() };
        assert_eq!(config.time_budget(&limits), Some(Duration::from_millis(1_950)));

        let limits = TimeControl { movetime: Some(500), time: Some(10_000), ..Default::default() };
        assert_eq!(config.time_budget(&limits), Some(Duration::from_millis(500)));

        assert_eq!(config.time_budget(&TimeControl::default()), None);
    }

    #[test]
    fn test_search_info_limits() {
        let config = EngineConfig::default().with_depth(6);
        let info = config.search_info(&TimeControl::default());
        assert_eq!(info.depth, 6);
        assert!(info.stop_time.is_none());

        let info = config.search_info(&TimeControl { depth: Some(3), nodes: Some(1_000), ..Default::default() });
        assert_eq!(info.depth, 3);
        assert_eq!(info.node_limit, Some(1_000));

        let info = config.search_info(&TimeControl { infinite: true, time: Some(5_000), ..Default::default() });
        assert_eq!(info.depth, MAX_DEPTH as i32);
        assert!(info.stop_time.is_none());

        let info = config.search_info(&TimeControl { movetime: Some(100), ..Default::default() });
        assert!(info.stop_time.is_some());
    }
}
