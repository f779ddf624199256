//! Cleanup system: removes projectiles that have left the grid.

use hecs::{Entity, World};

use crossfire_core::components::Projectile;
use crossfire_core::grid::Grid;
use crossfire_core::types::Position;

/// Despawn every projectile outside `[0, extent]` on either axis.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, grid: &Grid, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_projectile, pos)) in world.query_mut::<(&Projectile, &Position)>() {
        if !grid.contains(pos) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
