//! Game state snapshot: the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;
use crate::events::GameEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    pub health: u32,
    pub max_health: u32,
    pub ammo: u32,
    pub player: PlayerView,
    pub aliens: Vec<AlienView>,
    pub bullets: Vec<ProjectileView>,
    pub alien_bullets: Vec<ProjectileView>,
    pub crystals: Vec<CrystalView>,
    pub ammo_packs: Vec<AmmoPackView>,
    pub invulnerable: bool,
    pub hit_effect_active: bool,
    /// Events emitted since the previous snapshot.
    pub events: Vec<GameEvent>,
}

/// Player ship position for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub target: Position,
}

/// An alien on the playfield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlienView {
    pub id: u32,
    pub position: Position,
    pub target: Position,
}

/// A bullet in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub position: Position,
    pub velocity: Velocity,
}

/// A crystal waiting to be collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrystalView {
    pub id: u32,
    pub position: Position,
    pub value: u32,
}

/// An ammo pack waiting to be collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoPackView {
    pub id: u32,
    pub position: Position,
}
