//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, HitTarget};

/// Discrete feedback events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The player fired a bullet.
    ShotFired { direction: Direction },
    /// An alien fired at the player.
    AlienFired { alien_id: u32 },
    /// Something was hit.
    EntityHit { target: HitTarget },
    /// The player picked up a crystal.
    CrystalCollected { value: u32 },
    /// The player picked up an ammo pack.
    AmmoCollected { amount: u32 },
    /// Score crossed an extra-life threshold.
    ExtraLife { lives: u32 },
    /// The wave was cleared; `level` is the level just completed.
    LevelComplete { level: u32 },
    /// The last life was lost.
    GameOver { score: u32, level: u32 },
}
