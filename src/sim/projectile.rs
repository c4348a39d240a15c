//! In-flight projectiles
//!
//! Each shot flies in a straight line from the bow to where the target center
//! was at launch. Progress is derived from elapsed active time, so it is
//! independent of how often the projectile is advanced.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::scoring::ShotOutcome;
use crate::lerp_point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub origin: Vec2,
    /// Target center at launch time; never re-aimed
    pub destination: Vec2,
    /// Scheduler time of launch (ms)
    pub launched_at: u64,
    pub flight_ms: u64,
    /// Fraction of the flight covered, monotonic in [0, 1]
    pub progress: f32,
    /// Set exactly once, when the projectile arrives
    pub outcome: Option<ShotOutcome>,
}

impl Projectile {
    pub fn launch(id: u32, origin: Vec2, destination: Vec2, now: u64, flight_ms: u64) -> Self {
        Self {
            id,
            origin,
            destination,
            launched_at: now,
            flight_ms: flight_ms.max(1),
            progress: 0.0,
            outcome: None,
        }
    }

    /// Current interpolated position
    #[inline]
    pub fn position(&self) -> Vec2 {
        lerp_point(self.origin, self.destination, self.progress)
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Update progress for scheduler time `now`. Returns the new position, or
    /// `None` once the projectile has been resolved.
    pub fn advance(&mut self, now: u64) -> Option<Vec2> {
        if self.is_resolved() {
            return None;
        }
        let elapsed = now.saturating_sub(self.launched_at);
        let progress = (elapsed as f64 / self.flight_ms as f64).min(1.0) as f32;
        self.progress = self.progress.max(progress);
        Some(self.position())
    }

    /// Whether the flight is far enough along to be scored
    pub fn has_arrived(&self, threshold: f32) -> bool {
        self.progress >= threshold
    }

    /// Record the outcome. Returns false if it was already resolved.
    pub fn resolve(&mut self, outcome: ShotOutcome) -> bool {
        if self.is_resolved() {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot() -> Projectile {
        Projectile::launch(1, Vec2::new(160.0, 250.0), Vec2::new(1050.0, 330.0), 1_000, 800)
    }

    #[test]
    fn test_interpolates_both_axes() {
        let mut p = shot();
        let pos = p.advance(1_400).expect("in flight");
        assert!((p.progress - 0.5).abs() < 1e-6);
        assert!((pos.x - 605.0).abs() < 1e-3);
        assert!((pos.y - 290.0).abs() < 1e-3);
    }

    #[test]
    fn test_progress_caps_at_one() {
        let mut p = shot();
        let pos = p.advance(50_000).expect("in flight");
        assert_eq!(p.progress, 1.0);
        assert_eq!(pos, p.destination);
    }

    #[test]
    fn test_progress_never_decreases() {
        let mut p = shot();
        p.advance(1_600);
        let before = p.progress;
        // a stale timestamp must not pull the projectile back
        p.advance(1_100);
        assert_eq!(p.progress, before);
        p.advance(500);
        assert_eq!(p.progress, before);
    }

    #[test]
    fn test_arrival_threshold() {
        let mut p = shot();
        p.advance(1_000 + 759);
        assert!(!p.has_arrived(0.95));
        p.advance(1_000 + 760);
        assert!(p.has_arrived(0.95));
    }

    #[test]
    fn test_resolves_exactly_once() {
        let mut p = shot();
        p.advance(1_800);
        assert!(p.resolve(ShotOutcome::miss()));
        assert!(!p.resolve(ShotOutcome::miss()));
        assert!(p.advance(2_000).is_none());
        assert_eq!(p.progress, 1.0);
    }
}
