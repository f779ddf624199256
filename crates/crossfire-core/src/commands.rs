//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::controls::ControlState;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the held-control state. Stays in effect until replaced.
    SetControls { controls: ControlState },

    // --- Phase control ---
    /// Start a new game from the menu or the game-over screen.
    StartGame,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Pause when playing, resume when paused.
    TogglePause,
    /// Abandon the current game and return to the menu.
    ReturnToMenu,
}
