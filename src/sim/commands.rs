//! Player commands sent from the frontend to the simulation.
//!
//! Commands issued in a phase that does not accept them are silently ignored.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Begin a match from the start screen or after game over.
    Start,
    /// Pause if active, resume if paused.
    PauseToggle,
    /// Leave the pause screen.
    Resume,
    /// Throw away the current match and start a fresh one.
    Restart,
    /// Return to the start screen.
    Reset,
    /// Fire a projectile at the target's current position.
    Shoot,
}
