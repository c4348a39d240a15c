//! Match simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Time comes in only through `Match::update` / `Match::advance`
//! - Stable iteration order (projectiles by creation id, tasks by due time)
//! - No rendering or platform dependencies

pub mod clock;
pub mod commands;
pub mod events;
pub mod progression;
pub mod projectile;
pub mod scoring;
pub mod session;
pub mod state;
pub mod target;
pub mod tick;

pub use clock::{FrameClock, Scheduler, TaskId};
pub use commands::Command;
pub use events::{MatchEvent, MatchObserver};
pub use projectile::Projectile;
pub use scoring::{ShotOutcome, Tier};
pub use session::Match;
pub use state::{MatchPhase, MatchSnapshot, MatchState};
pub use target::{Direction, TargetState};
