//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Marks the entity controlled by the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Street intersection an entity is easing toward.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MoveTarget {
    pub position: Position,
}

/// Alien bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    pub id: u32,
    /// Tick of the last target re-aim.
    pub last_move_tick: u64,
    /// Tick of the last shot fired.
    pub last_shot_tick: u64,
}

/// Shared projectile data. Paired with a `PlayerBullet` or `AlienBullet` marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
}

/// Marks a projectile fired by the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerBullet;

/// Marks a projectile fired by an alien.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AlienBullet;

/// Score pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crystal {
    pub id: u32,
    pub value: u32,
}

/// Ammo replenishment pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoPack {
    pub id: u32,
}
