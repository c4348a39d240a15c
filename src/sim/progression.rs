//! Difficulty progression
//!
//! Level is a pure function of hits, capped by the level table and never
//! lowered within a match.

use super::state::MatchState;
use super::target::TargetState;
use crate::config::{LevelParams, ProgressionConfig};

/// Level earned by `shots_hit` hits
pub fn level_for_hits(shots_hit: u32, hits_per_level: u32, max_level: u32) -> u32 {
    (shots_hit / hits_per_level.max(1) + 1).min(max_level.max(1))
}

/// Re-evaluate the level after a hit. On a level-up the target takes the new
/// row's speed and size and the new parameters are returned so the caller can
/// re-time motion ticks.
pub fn evaluate(
    state: &mut MatchState,
    target: &mut TargetState,
    progression: &ProgressionConfig,
) -> Option<LevelParams> {
    let earned = level_for_hits(
        state.shots_hit,
        progression.hits_per_level,
        progression.max_level(),
    );
    if earned <= state.level {
        return None;
    }
    state.level = earned;
    let params = progression.params(earned);
    target.apply_level(&params);
    log::info!(
        "Level {}: speed={} size={} period={}ms",
        earned,
        params.speed,
        params.size,
        params.motion_period_ms
    );
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use proptest::prelude::*;

    fn setup() -> (MatchState, TargetState, ProgressionConfig) {
        let progression = ProgressionConfig::default();
        let target = TargetState::new(&FieldConfig::default(), &progression.params(1));
        (MatchState::new(30), target, progression)
    }

    #[test]
    fn test_level_for_hits() {
        assert_eq!(level_for_hits(0, 5, 3), 1);
        assert_eq!(level_for_hits(4, 5, 3), 1);
        assert_eq!(level_for_hits(5, 5, 3), 2);
        assert_eq!(level_for_hits(10, 5, 3), 3);
        assert_eq!(level_for_hits(500, 5, 3), 3);
    }

    #[test]
    fn test_fifth_hit_levels_up_fourth_does_not() {
        let (mut state, mut target, progression) = setup();
        state.shots_fired = 5;
        state.shots_hit = 4;
        assert!(evaluate(&mut state, &mut target, &progression).is_none());
        assert_eq!(state.level, 1);
        assert_eq!((target.speed, target.size), (5.0, 120.0));

        state.shots_hit = 5;
        let params = evaluate(&mut state, &mut target, &progression).expect("level up");
        assert_eq!(state.level, 2);
        assert_eq!(params.speed, 9.0);
        assert_eq!((target.speed, target.size), (9.0, 100.0));
    }

    #[test]
    fn test_capped_at_max_level() {
        let (mut state, mut target, progression) = setup();
        state.shots_fired = 40;
        state.shots_hit = 40;
        evaluate(&mut state, &mut target, &progression);
        assert_eq!(state.level, 3);
        assert!(evaluate(&mut state, &mut target, &progression).is_none());
        assert_eq!(target.size, 80.0);
    }

    proptest! {
        #[test]
        fn prop_level_monotonic_and_capped(hits in prop::collection::vec(0u32..3, 1..60)) {
            let (mut state, mut target, progression) = setup();
            let mut last = state.level;
            for h in hits {
                state.shots_fired += h;
                state.shots_hit += h;
                evaluate(&mut state, &mut target, &progression);
                prop_assert!(state.level >= last);
                prop_assert!(state.level <= progression.max_level());
                last = state.level;
            }
        }
    }
}
