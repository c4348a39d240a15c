//! Match state and core simulation types
//!
//! Everything the presentation layer needs to draw a HUD lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::accuracy_percent;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting on the start screen
    Ready,
    /// Clock running, shots accepted
    Active,
    /// Clock frozen
    Paused,
    /// Time ran out; totals are final
    Over,
}

impl MatchPhase {
    /// Status label shown by frontends
    pub fn label(&self) -> &'static str {
        match self {
            MatchPhase::Ready => "READY",
            MatchPhase::Active => "ACTIVE",
            MatchPhase::Paused => "PAUSED",
            MatchPhase::Over => "COMPLETE",
        }
    }
}

/// Score, clock and shot counters for one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub score: u64,
    /// Whole seconds left on the countdown
    pub time_remaining: u32,
    /// 1-based difficulty level
    pub level: u32,
    pub shots_fired: u32,
    /// Never exceeds `shots_fired`
    pub shots_hit: u32,
    pub phase: MatchPhase,
}

impl MatchState {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            score: 0,
            time_remaining: duration_secs,
            level: 1,
            shots_fired: 0,
            shots_hit: 0,
            phase: MatchPhase::Ready,
        }
    }

    /// Hit percentage in [0, 100]
    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.shots_hit, self.shots_fired)
    }
}

/// Read-only view of a match for polling frontends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    pub score: u64,
    pub time_remaining: u32,
    pub level: u32,
    pub max_level: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub accuracy: u32,
    pub target_center: Vec2,
    pub target_size: f32,
    pub live_projectiles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let s = MatchState::new(30);
        assert_eq!(s.phase, MatchPhase::Ready);
        assert_eq!(s.time_remaining, 30);
        assert_eq!(s.level, 1);
        assert_eq!(s.accuracy(), 0);
    }

    #[test]
    fn test_accuracy_with_misses_only() {
        let mut s = MatchState::new(30);
        s.shots_fired = 10;
        s.shots_hit = 0;
        assert_eq!(s.accuracy(), 0);
        s.shots_hit = 7;
        assert_eq!(s.accuracy(), 70);
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(MatchPhase::Over.label(), "COMPLETE");
        assert_eq!(MatchPhase::Active.label(), "ACTIVE");
    }
}
