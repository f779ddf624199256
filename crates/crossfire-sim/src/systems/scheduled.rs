//! Applies delayed effects that have come due this tick.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use crossfire_core::grid::Grid;

use crate::schedule::{EventSchedule, ScheduledKind};
use crate::world_setup;

/// Pop every live scheduled entry due at or before `current_tick` and apply it.
pub fn run(
    world: &mut World,
    grid: &Grid,
    rng: &mut ChaCha8Rng,
    schedule: &mut EventSchedule,
    next_entity_id: &mut u32,
    current_tick: u64,
) {
    for kind in schedule.take_due(current_tick) {
        match kind {
            ScheduledKind::SpawnCrystal => {
                if world_setup::spawn_crystal(world, rng, grid, next_entity_id).is_none() {
                    tracing::trace!("crystal spawn skipped, field full");
                }
            }
            ScheduledKind::SpawnAmmoPack => {
                world_setup::spawn_ammo_pack(world, rng, grid, next_entity_id);
            }
            ScheduledKind::RecenterPlayer => {
                world_setup::recenter_player(world, grid);
            }
        }
    }
}
