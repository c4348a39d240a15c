//! Match lifecycle
//!
//! `Match` owns every piece of mutable game state: the totals, the target, the
//! live projectiles and the scheduler driving them. Frontends talk to it only
//! through [`Command`]s and drain [`MatchEvent`]s back out.

use glam::Vec2;

use super::clock::{FrameClock, Scheduler, TaskId};
use super::commands::Command;
use super::events::MatchEvent;
use super::projectile::Projectile;
use super::state::{MatchPhase, MatchSnapshot, MatchState};
use super::target::TargetState;
use crate::config::{ConfigError, MatchConfig};

/// Work items the scheduler hands back to the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskKind {
    Motion,
    Countdown,
    /// Remove a resolved projectile once its linger time is up
    Despawn(u32),
}

/// One play session from the start screen to game over
#[derive(Debug, Clone)]
pub struct Match {
    pub(crate) config: MatchConfig,
    pub(crate) state: MatchState,
    pub(crate) target: TargetState,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) scheduler: Scheduler<TaskKind>,
    pub(crate) frame_clock: FrameClock,
    pub(crate) motion_task: Option<TaskId>,
    pub(crate) events: Vec<MatchEvent>,
    next_projectile_id: u32,
}

impl Match {
    /// Build a match in the `Ready` phase. Fails if the config is invalid.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = MatchState::new(config.timing.match_duration_secs);
        let target = TargetState::new(&config.field, &config.progression.params(1));
        let frame_clock = FrameClock::new(config.timing.max_frame_delta_ms);
        Ok(Self {
            config,
            state,
            target,
            projectiles: Vec::new(),
            scheduler: Scheduler::new(),
            frame_clock,
            motion_task: None,
            events: Vec::new(),
            next_projectile_id: 1,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn target(&self) -> &TargetState {
        &self.target
    }

    /// Live projectiles, in flight or lingering
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Active (unpaused) time since the match started, in ms
    pub fn active_time_ms(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.state.phase,
            score: self.state.score,
            time_remaining: self.state.time_remaining,
            level: self.state.level,
            max_level: self.config.progression.max_level(),
            shots_fired: self.state.shots_fired,
            shots_hit: self.state.shots_hit,
            accuracy: self.state.accuracy(),
            target_center: self.target.center(),
            target_size: self.target.size,
            live_projectiles: self.projectiles.len(),
        }
    }

    /// Take all notifications produced since the last call
    ///
    /// Notifications left undrained when a new match begins or the match is
    /// reset are dropped.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    /// Catch the simulation up to wall-clock `now_ms`, then apply `command`
    pub fn handle(&mut self, command: Command, now_ms: u64) {
        self.update(now_ms);
        match command {
            Command::Start => self.start(),
            Command::PauseToggle => self.pause_toggle(),
            Command::Resume => self.resume(),
            Command::Restart => self.restart(),
            Command::Reset => self.reset(),
            Command::Shoot => self.shoot(),
        }
        self.frame_clock.anchor(now_ms);
    }

    fn ignored(&self, what: &str) {
        log::debug!("Ignoring {} while {:?}", what, self.state.phase);
    }

    /// Begin a match from `Ready` or `Over`
    pub fn start(&mut self) {
        match self.state.phase {
            MatchPhase::Ready | MatchPhase::Over => self.begin(),
            _ => self.ignored("start"),
        }
    }

    /// Abandon the current match and begin a fresh one
    pub fn restart(&mut self) {
        match self.state.phase {
            MatchPhase::Active | MatchPhase::Paused | MatchPhase::Over => self.begin(),
            MatchPhase::Ready => self.ignored("restart"),
        }
    }

    fn begin(&mut self) {
        self.events.clear();
        self.discard_projectiles();
        self.state = MatchState::new(self.config.timing.match_duration_secs);
        self.state.phase = MatchPhase::Active;
        let params = self.config.progression.params(1);
        self.target = TargetState::new(&self.config.field, &params);

        self.scheduler = Scheduler::new();
        self.motion_task = Some(self.scheduler.every(params.motion_period_ms, TaskKind::Motion));
        self.scheduler.every(self.config.timing.countdown_period_ms, TaskKind::Countdown);
        self.frame_clock.rebase();

        log::info!(
            "Match started: {}s, {} levels",
            self.state.time_remaining,
            self.config.progression.max_level()
        );
        self.emit(MatchEvent::PhaseChanged {
            phase: MatchPhase::Active,
        });
        self.emit_hud();
    }

    pub fn pause(&mut self) {
        if self.state.phase != MatchPhase::Active {
            return self.ignored("pause");
        }
        self.scheduler.suspend();
        self.state.phase = MatchPhase::Paused;
        log::info!(
            "Paused at {}s remaining (score {})",
            self.state.time_remaining,
            self.state.score
        );
        self.emit(MatchEvent::PhaseChanged {
            phase: MatchPhase::Paused,
        });
        self.emit(MatchEvent::ScoreChanged {
            score: self.state.score,
        });
        self.emit(MatchEvent::TimeChanged {
            time_remaining: self.state.time_remaining,
        });
    }

    pub fn resume(&mut self) {
        if self.state.phase != MatchPhase::Paused {
            return self.ignored("resume");
        }
        self.scheduler.resume();
        self.frame_clock.rebase();
        self.state.phase = MatchPhase::Active;
        log::info!("Resumed");
        self.emit(MatchEvent::PhaseChanged {
            phase: MatchPhase::Active,
        });
    }

    pub fn pause_toggle(&mut self) {
        match self.state.phase {
            MatchPhase::Active => self.pause(),
            MatchPhase::Paused => self.resume(),
            _ => self.ignored("pause toggle"),
        }
    }

    /// Back to the start screen from any phase
    pub fn reset(&mut self) {
        self.events.clear();
        self.discard_projectiles();
        self.scheduler = Scheduler::new();
        self.motion_task = None;
        self.state = MatchState::new(self.config.timing.match_duration_secs);
        self.target = TargetState::new(&self.config.field, &self.config.progression.params(1));
        log::info!("Match reset");
        self.emit(MatchEvent::PhaseChanged {
            phase: MatchPhase::Ready,
        });
        self.emit_hud();
    }

    /// Fire at the target's current center. Only honoured while `Active`.
    pub fn shoot(&mut self) {
        if self.state.phase != MatchPhase::Active {
            return self.ignored("shoot");
        }
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;

        let field = &self.config.field;
        let origin = Vec2::new(field.shooter_x, field.shooter_y);
        let projectile = Projectile::launch(
            id,
            origin,
            self.target.center(),
            self.scheduler.now(),
            self.config.timing.flight_duration_ms,
        );
        self.projectiles.push(projectile);
        self.state.shots_fired += 1;

        log::debug!("Shot {} fired at y={}", id, self.target.position);
        self.emit(MatchEvent::ProjectileLaunched {
            id,
            x: origin.x,
            y: origin.y,
        });
        self.emit(MatchEvent::AccuracyChanged {
            accuracy: self.state.accuracy(),
        });
    }

    /// Time is up: freeze totals and stop everything
    pub(crate) fn end(&mut self) {
        self.scheduler.clear();
        self.motion_task = None;
        self.discard_projectiles();
        self.state.phase = MatchPhase::Over;

        let (score, accuracy, level) = (self.state.score, self.state.accuracy(), self.state.level);
        log::info!(
            "Match over: score={} accuracy={}% level={}",
            score,
            accuracy,
            level
        );
        self.emit(MatchEvent::PhaseChanged {
            phase: MatchPhase::Over,
        });
        self.emit(MatchEvent::MatchEnded {
            final_score: score,
            final_accuracy: accuracy,
            final_level: level,
        });
    }

    /// Drop every projectile without scoring it
    fn discard_projectiles(&mut self) {
        let dropped: Vec<u32> = self.projectiles.drain(..).map(|p| p.id).collect();
        for id in dropped {
            self.emit(MatchEvent::ProjectileRemoved { id });
        }
    }

    fn emit_hud(&mut self) {
        self.emit(MatchEvent::ScoreChanged {
            score: self.state.score,
        });
        self.emit(MatchEvent::TimeChanged {
            time_remaining: self.state.time_remaining,
        });
        self.emit(MatchEvent::LevelChanged {
            level: self.state.level,
        });
        self.emit(MatchEvent::AccuracyChanged {
            accuracy: self.state.accuracy(),
        });
        self.emit(MatchEvent::TargetMoved {
            position: self.target.position,
            size: self.target.size,
        });
    }
}
