//! Runtime configuration for a simulation run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crossfire_core::enums::{AimPolicy, FirePolicy, MovementPolicy};

/// Errors produced while loading a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid simulation config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for starting a new simulation.
///
/// Missing fields fall back to their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    /// How the player ship responds to direction keys.
    pub movement: MovementPolicy,
    /// How aliens aim their shots.
    pub alien_aim: AimPolicy,
    /// Rate limiting applied to player shots.
    pub fire: FirePolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            movement: MovementPolicy::default(),
            alien_aim: AimPolicy::default(),
            fire: FirePolicy::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
