//! Per-frame simulation pass
//!
//! One call to [`Match::update`] replays everything that came due since the
//! previous call, in time order: projectiles are brought up to each task's due
//! time before the task runs, so a shot that lands before the final countdown
//! tick is scored and one still in the air is not.

use glam::Vec2;

use super::events::MatchEvent;
use super::progression;
use super::scoring;
use super::session::{Match, TaskKind};
use super::state::MatchPhase;

impl Match {
    /// Advance to host wall-clock time `now_ms`. Time spent outside `Active`
    /// is dropped, and oversized steps are clamped.
    pub fn update(&mut self, now_ms: u64) {
        let delta = self.frame_clock.observe(now_ms);
        self.advance(delta);
    }

    /// Advance active time by `delta_ms` directly, bypassing the wall clock.
    /// Does nothing unless the match is `Active`.
    pub fn advance(&mut self, delta_ms: u64) {
        if self.state.phase != MatchPhase::Active || delta_ms == 0 {
            return;
        }
        let until = self.scheduler.now() + delta_ms;
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.advance_projectiles(fired.at, false);
            self.run_task(fired.kind);
            if self.state.phase != MatchPhase::Active {
                return;
            }
        }
        self.scheduler.settle(until);
        self.advance_projectiles(until, true);
    }

    fn run_task(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::Motion => {
                self.target.step();
                self.emit(MatchEvent::TargetMoved {
                    position: self.target.position,
                    size: self.target.size,
                });
            }
            TaskKind::Countdown => {
                self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
                self.emit(MatchEvent::TimeChanged {
                    time_remaining: self.state.time_remaining,
                });
                if self.state.time_remaining == 0 {
                    self.end();
                }
            }
            TaskKind::Despawn(id) => {
                let before = self.projectiles.len();
                self.projectiles.retain(|p| p.id != id);
                if self.projectiles.len() != before {
                    self.emit(MatchEvent::ProjectileRemoved { id });
                }
            }
        }
    }

    /// Move every in-flight projectile to scheduler time `at` and resolve the
    /// ones that arrived. Position updates are reported on the frame boundary
    /// and on arrival only.
    fn advance_projectiles(&mut self, at: u64, report: bool) {
        let threshold = self.config.timing.resolve_threshold;
        let mut arrivals = Vec::new();
        for p in &mut self.projectiles {
            let Some(pos) = p.advance(at) else {
                continue;
            };
            let arrived = p.has_arrived(threshold);
            if report || arrived {
                self.events.push(MatchEvent::ProjectileUpdated {
                    id: p.id,
                    x: pos.x,
                    y: pos.y,
                });
            }
            if arrived {
                arrivals.push((p.id, pos));
            }
        }
        for (id, pos) in arrivals {
            self.resolve_arrival(id, pos);
        }
    }

    fn resolve_arrival(&mut self, id: u32, arrival: Vec2) {
        let outcome =
            scoring::resolve(arrival, &self.target, self.state.level, &self.config.scoring);
        let Some(projectile) = self.projectiles.iter_mut().find(|p| p.id == id) else {
            return;
        };
        if !projectile.resolve(outcome) {
            return;
        }
        scoring::apply(&outcome, &mut self.state);
        log::debug!(
            "Shot {} {} (distance {:.1}, +{})",
            id,
            if outcome.hit { "hit" } else { "missed" },
            outcome.distance,
            outcome.points
        );
        self.emit(MatchEvent::ProjectileResolved {
            id,
            hit: outcome.hit,
            tier: outcome.tier,
            points: outcome.points,
        });

        let timing = &self.config.timing;
        let linger = if outcome.hit {
            timing.hit_linger_ms
        } else {
            timing.miss_linger_ms
        };
        self.scheduler.once(linger, TaskKind::Despawn(id));

        if !outcome.hit {
            return;
        }
        self.emit(MatchEvent::ScoreChanged {
            score: self.state.score,
        });
        self.emit(MatchEvent::AccuracyChanged {
            accuracy: self.state.accuracy(),
        });

        let previous_period = self.config.progression.params(self.state.level).motion_period_ms;
        if let Some(params) =
            progression::evaluate(&mut self.state, &mut self.target, &self.config.progression)
        {
            let level = self.state.level;
            self.emit(MatchEvent::LevelChanged { level });
            self.emit(MatchEvent::LevelUp { level });
            self.emit(MatchEvent::TargetMoved {
                position: self.target.position,
                size: self.target.size,
            });
            // New period starts counting from the level-up
            if params.motion_period_ms != previous_period {
                if let Some(old) = self.motion_task.take() {
                    self.scheduler.cancel(old);
                }
                self.motion_task =
                    Some(self.scheduler.every(params.motion_period_ms, TaskKind::Motion));
            }
        }
    }
}
