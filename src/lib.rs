//! Target Range - a timed target-shooting game core
//!
//! Core modules:
//! - `sim`: Match state machine, scheduler, target motion, projectiles, scoring
//! - `config`: Data-driven match tuning with fail-fast validation
//!
//! Rendering and input devices live outside this crate. A presentation layer
//! feeds [`sim::Command`]s in and consumes [`sim::MatchEvent`]s out.

pub mod config;
pub mod sim;

pub use config::{ConfigError, MatchConfig};
pub use sim::{Command, Match, MatchEvent, MatchObserver, MatchPhase, MatchSnapshot};

use glam::Vec2;

/// Game configuration constants (defaults for [`MatchConfig`])
pub mod consts {
    /// Match length in seconds
    pub const MATCH_DURATION_SECS: u32 = 30;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Where projectiles leave the bow (bow at x=100 plus its 60px draw)
    pub const SHOOTER_X: f32 = 160.0;
    pub const SHOOTER_Y: f32 = FIELD_HEIGHT / 2.0;

    /// Target column and vertical travel limits
    pub const TARGET_X: f32 = FIELD_WIDTH - 150.0;
    pub const TARGET_MIN_Y: f32 = 60.0;
    pub const TARGET_MAX_Y: f32 = FIELD_HEIGHT - 60.0;

    /// Countdown period
    pub const COUNTDOWN_PERIOD_MS: u64 = 1000;
    /// Projectile flight time from bow to snapshot point
    pub const FLIGHT_DURATION_MS: u64 = 800;
    /// Fraction of the flight at which the shot is resolved
    pub const RESOLVE_THRESHOLD: f32 = 0.95;
    /// How long a resolved projectile stays visible
    pub const HIT_LINGER_MS: u64 = 600;
    pub const MISS_LINGER_MS: u64 = 300;
    /// Largest wall-clock step accepted per update (suspend/resume guard)
    pub const MAX_FRAME_DELTA_MS: u64 = 250;

    /// Hits needed per level-up
    pub const HITS_PER_LEVEL: u32 = 5;

    /// Scoring rings (radius px, points)
    pub const BULLSEYE_RADIUS: f32 = 10.0;
    pub const INNER_RADIUS: f32 = 30.0;
    pub const BULLSEYE_POINTS: u32 = 10;
    pub const INNER_POINTS: u32 = 5;
    pub const OUTER_POINTS: u32 = 2;
    /// Target size the ring radii are tuned for
    pub const BASE_TARGET_SIZE: f32 = 120.0;

    /// Level table: (speed px/tick, size px, motion period ms)
    pub const LEVEL_TABLE: [(f32, f32, u64); 3] =
        [(5.0, 120.0, 16), (9.0, 100.0, 16), (11.0, 80.0, 16)];
}

/// Linear interpolation between two points, `t` clamped to [0, 1]
#[inline]
pub fn lerp_point(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Accuracy percentage, rounded half away from zero
#[inline]
pub fn accuracy_percent(shots_hit: u32, shots_fired: u32) -> u32 {
    if shots_fired == 0 {
        return 0;
    }
    let hit = shots_hit.min(shots_fired) as f64;
    (hit * 100.0 / shots_fired as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_point_clamps() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 50.0);
        assert_eq!(lerp_point(a, b, 0.5), Vec2::new(50.0, 25.0));
        assert_eq!(lerp_point(a, b, 2.0), b);
        assert_eq!(lerp_point(a, b, -1.0), a);
    }

    #[test]
    fn test_accuracy_percent() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(0, 10), 0);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(1, 2), 50);
        assert_eq!(accuracy_percent(5, 5), 100);
    }
}
