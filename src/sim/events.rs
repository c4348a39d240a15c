//! Notifications emitted by the simulation for the presentation layer.

use serde::{Deserialize, Serialize};

use super::scoring::Tier;
use super::state::MatchPhase;

/// Everything a frontend might want to redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    PhaseChanged { phase: MatchPhase },
    ScoreChanged { score: u64 },
    TimeChanged { time_remaining: u32 },
    LevelChanged { level: u32 },
    AccuracyChanged { accuracy: u32 },
    /// Target center height and current size.
    TargetMoved { position: f32, size: f32 },
    ProjectileLaunched { id: u32, x: f32, y: f32 },
    ProjectileUpdated { id: u32, x: f32, y: f32 },
    ProjectileResolved {
        id: u32,
        hit: bool,
        tier: Option<Tier>,
        points: u32,
    },
    /// Cosmetic lifetime over; drop the sprite.
    ProjectileRemoved { id: u32 },
    LevelUp { level: u32 },
    MatchEnded {
        final_score: u64,
        final_accuracy: u32,
        final_level: u32,
    },
}

/// Callback-style consumer of [`MatchEvent`]s. Every method defaults to a
/// no-op so a frontend implements only what it draws.
#[allow(unused_variables)]
pub trait MatchObserver {
    fn on_phase_changed(&mut self, phase: MatchPhase) {}
    fn on_score_changed(&mut self, score: u64) {}
    fn on_time_changed(&mut self, time_remaining: u32) {}
    fn on_level_changed(&mut self, level: u32) {}
    fn on_accuracy_changed(&mut self, accuracy: u32) {}
    fn on_target_moved(&mut self, position: f32, size: f32) {}
    fn on_projectile_launched(&mut self, id: u32, x: f32, y: f32) {}
    fn on_projectile_updated(&mut self, id: u32, x: f32, y: f32) {}
    fn on_projectile_resolved(&mut self, id: u32, hit: bool, tier: Option<Tier>, points: u32) {}
    fn on_projectile_removed(&mut self, id: u32) {}
    fn on_level_up(&mut self, level: u32) {}
    fn on_match_ended(&mut self, final_score: u64, final_accuracy: u32, final_level: u32) {}
}

impl MatchEvent {
    /// Route this event to the matching observer method
    pub fn dispatch<O: MatchObserver + ?Sized>(&self, observer: &mut O) {
        match *self {
            MatchEvent::PhaseChanged { phase } => observer.on_phase_changed(phase),
            MatchEvent::ScoreChanged { score } => observer.on_score_changed(score),
            MatchEvent::TimeChanged { time_remaining } => observer.on_time_changed(time_remaining),
            MatchEvent::LevelChanged { level } => observer.on_level_changed(level),
            MatchEvent::AccuracyChanged { accuracy } => observer.on_accuracy_changed(accuracy),
            MatchEvent::TargetMoved { position, size } => observer.on_target_moved(position, size),
            MatchEvent::ProjectileLaunched { id, x, y } => {
                observer.on_projectile_launched(id, x, y)
            }
            MatchEvent::ProjectileUpdated { id, x, y } => observer.on_projectile_updated(id, x, y),
            MatchEvent::ProjectileResolved {
                id,
                hit,
                tier,
                points,
            } => observer.on_projectile_resolved(id, hit, tier, points),
            MatchEvent::ProjectileRemoved { id } => observer.on_projectile_removed(id),
            MatchEvent::LevelUp { level } => observer.on_level_up(level),
            MatchEvent::MatchEnded {
                final_score,
                final_accuracy,
                final_level,
            } => observer.on_match_ended(final_score, final_accuracy, final_level),
        }
    }
}
