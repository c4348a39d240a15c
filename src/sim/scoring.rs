//! Collision and scoring
//!
//! A shot is tested against the target as it is *now*, not where it was when
//! the shot was fired. Hits score by distance ring, times the current level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::MatchState;
use super::target::TargetState;
use crate::config::ScoringConfig;

/// Scoring ring a hit landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Bullseye,
    Inner,
    Outer,
}

impl Tier {
    pub fn base_points(&self, scoring: &ScoringConfig) -> u32 {
        match self {
            Tier::Bullseye => scoring.bullseye_points,
            Tier::Inner => scoring.inner_points,
            Tier::Outer => scoring.outer_points,
        }
    }
}

/// Result of resolving one projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotOutcome {
    pub hit: bool,
    pub tier: Option<Tier>,
    /// Points after the level multiplier
    pub points: u32,
    /// Distance from the target center at arrival
    pub distance: f32,
}

impl ShotOutcome {
    pub fn miss() -> Self {
        Self {
            hit: false,
            tier: None,
            points: 0,
            distance: f32::INFINITY,
        }
    }
}

/// Pick the ring for a hit at `distance` from center
pub fn tier_for(distance: f32, size: f32, scoring: &ScoringConfig) -> Tier {
    let scale = if scoring.scale_tiers_with_size {
        size / scoring.base_target_size
    } else {
        1.0
    };
    if distance <= scoring.bullseye_radius * scale {
        Tier::Bullseye
    } else if distance <= scoring.inner_radius * scale {
        Tier::Inner
    } else {
        Tier::Outer
    }
}

/// Test an arrival point against the current target
pub fn resolve(
    arrival: Vec2,
    target: &TargetState,
    level: u32,
    scoring: &ScoringConfig,
) -> ShotOutcome {
    if !target.contains(arrival) {
        return ShotOutcome::miss();
    }
    let distance = arrival.distance(target.center());
    let tier = tier_for(distance, target.size, scoring);
    ShotOutcome {
        hit: true,
        tier: Some(tier),
        points: tier.base_points(scoring) * level.max(1),
        distance,
    }
}

/// Apply an outcome to the match totals. `shots_fired` was already counted at
/// launch, so a miss changes nothing.
pub fn apply(outcome: &ShotOutcome, state: &mut MatchState) {
    if outcome.hit {
        state.score += outcome.points as u64;
        state.shots_hit = (state.shots_hit + 1).min(state.shots_fired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldConfig, LevelParams};

    fn target() -> TargetState {
        TargetState::new(
            &FieldConfig::default(),
            &LevelParams {
                speed: 5.0,
                size: 120.0,
                motion_period_ms: 16,
            },
        )
    }

    #[test]
    fn test_dead_center_is_bullseye() {
        let t = target();
        let out = resolve(t.center(), &t, 1, &ScoringConfig::default());
        assert!(out.hit);
        assert_eq!(out.tier, Some(Tier::Bullseye));
        assert_eq!(out.points, 10);
        assert_eq!(out.distance, 0.0);
    }

    #[test]
    fn test_ring_boundaries() {
        let t = target();
        let s = ScoringConfig::default();
        let c = t.center();
        assert_eq!(resolve(c + Vec2::new(10.0, 0.0), &t, 1, &s).tier, Some(Tier::Bullseye));
        assert_eq!(resolve(c + Vec2::new(10.5, 0.0), &t, 1, &s).tier, Some(Tier::Inner));
        assert_eq!(resolve(c + Vec2::new(0.0, 30.0), &t, 1, &s).tier, Some(Tier::Inner));
        let outer = resolve(c + Vec2::new(0.0, -45.0), &t, 1, &s);
        assert_eq!(outer.tier, Some(Tier::Outer));
        assert_eq!(outer.points, 2);
    }

    #[test]
    fn test_box_corner_is_outer_hit() {
        let t = target();
        let out = resolve(t.center() + Vec2::splat(60.0), &t, 1, &ScoringConfig::default());
        assert!(out.hit);
        assert_eq!(out.tier, Some(Tier::Outer));
    }

    #[test]
    fn test_outside_box_is_miss() {
        let t = target();
        let out = resolve(t.center() + Vec2::new(0.0, 61.0), &t, 3, &ScoringConfig::default());
        assert!(!out.hit);
        assert_eq!(out.tier, None);
        assert_eq!(out.points, 0);
    }

    #[test]
    fn test_level_multiplier() {
        let t = target();
        let s = ScoringConfig::default();
        assert_eq!(resolve(t.center(), &t, 2, &s).points, 20);
        assert_eq!(resolve(t.center() + Vec2::new(20.0, 0.0), &t, 3, &s).points, 15);
    }

    #[test]
    fn test_scaled_tiers_follow_size() {
        let mut t = target();
        t.size = 60.0;
        let s = ScoringConfig {
            scale_tiers_with_size: true,
            ..Default::default()
        };
        // radii halve to 5 and 15
        assert_eq!(tier_for(6.0, t.size, &s), Tier::Inner);
        assert_eq!(tier_for(16.0, t.size, &s), Tier::Outer);
        assert_eq!(tier_for(6.0, t.size, &ScoringConfig::default()), Tier::Bullseye);
    }

    #[test]
    fn test_apply_only_counts_hits() {
        let mut state = MatchState::new(30);
        state.shots_fired = 2;
        let t = target();
        let s = ScoringConfig::default();
        apply(&ShotOutcome::miss(), &mut state);
        assert_eq!((state.score, state.shots_hit), (0, 0));
        apply(&resolve(t.center(), &t, 1, &s), &mut state);
        assert_eq!((state.score, state.shots_hit), (10, 1));
    }
}
