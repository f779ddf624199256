//! Pickup spawn arming: decides when crystals and ammo packs get scheduled.

use hecs::World;

use crossfire_core::components::{AmmoPack, Crystal};
use crossfire_core::constants::*;

use crate::schedule::{EventSchedule, ScheduledKind};
use crate::session::SessionState;
use crate::world_setup;

/// Re-arm pickups after collisions. `crystals_collected` is the number of
/// crystals picked up this tick.
pub fn run(
    world: &World,
    session: &SessionState,
    schedule: &mut EventSchedule,
    crystals_collected: u32,
    current_tick: u64,
) {
    if crystals_collected > 0 {
        arm_crystals(world, schedule, current_tick);
    }
    arm_ammo_pack(world, session, schedule, current_tick);
}

/// Replace any pending crystal spawns with one spawn per missing crystal,
/// at the standard delays counted from `from_tick`.
pub fn arm_crystals(world: &World, schedule: &mut EventSchedule, from_tick: u64) {
    schedule.cancel(ScheduledKind::SpawnCrystal);
    let present = world_setup::count::<Crystal>(world);
    for delay_ms in CRYSTAL_SPAWN_DELAYS_MS.iter().skip(present) {
        schedule.schedule(from_tick + ms_to_ticks(*delay_ms), ScheduledKind::SpawnCrystal);
    }
}

/// Schedule an ammo pack while ammo is low, or withdraw it once ammo recovers.
pub fn arm_ammo_pack(
    world: &World,
    session: &SessionState,
    schedule: &mut EventSchedule,
    current_tick: u64,
) {
    let pending = schedule.is_pending(ScheduledKind::SpawnAmmoPack);

    if session.ammo > LOW_AMMO_THRESHOLD {
        if pending {
            schedule.cancel(ScheduledKind::SpawnAmmoPack);
        }
        return;
    }

    if !pending && world_setup::count::<AmmoPack>(world) == 0 {
        schedule.schedule(
            current_tick + ms_to_ticks(AMMO_PACK_DELAY_MS),
            ScheduledKind::SpawnAmmoPack,
        );
    }
}
