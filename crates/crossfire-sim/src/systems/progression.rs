//! Level progression and extra lives.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use crossfire_core::components::*;
use crossfire_core::constants::*;
use crossfire_core::events::GameEvent;
use crossfire_core::grid::Grid;

use crate::schedule::EventSchedule;
use crate::session::SessionState;
use crate::systems::spawner;
use crate::world_setup;

/// Award extra lives and advance the level once the wave is cleared.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    grid: &Grid,
    rng: &mut ChaCha8Rng,
    session: &mut SessionState,
    schedule: &mut EventSchedule,
    next_entity_id: &mut u32,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) {
    award_extra_life(session, events);

    if world_setup::count::<Alien>(world) == 0 {
        events.push(GameEvent::LevelComplete {
            level: session.level,
        });
        session.level += 1;
        tracing::info!(level = session.level, score = session.score, "level complete");
        start_level(world, grid, rng, session, schedule, next_entity_id, current_tick);
    }
}

/// Grant one life when the score passes the next threshold.
pub fn award_extra_life(session: &mut SessionState, events: &mut Vec<GameEvent>) {
    let next = session.extra_life_checkpoint.saturating_add(EXTRA_LIFE_SCORE);
    if session.score >= next {
        session.lives += 1;
        session.extra_life_checkpoint = (session.score / EXTRA_LIFE_SCORE) * EXTRA_LIFE_SCORE;
        events.push(GameEvent::ExtraLife {
            lives: session.lives,
        });
        tracing::debug!(lives = session.lives, score = session.score, "extra life");
    }
}

/// Reset the playfield for `session.level`: clear transient entities,
/// recenter the player, grant the start grace, spawn the wave and arm the
/// crystal schedule. Anything scheduled for the previous level is dropped.
pub fn start_level(
    world: &mut World,
    grid: &Grid,
    rng: &mut ChaCha8Rng,
    session: &mut SessionState,
    schedule: &mut EventSchedule,
    next_entity_id: &mut u32,
    current_tick: u64,
) {
    world_setup::despawn_all::<Projectile>(world);
    world_setup::despawn_all::<Crystal>(world);
    world_setup::despawn_all::<AmmoPack>(world);
    world_setup::despawn_all::<Alien>(world);
    world_setup::recenter_player(world, grid);

    session
        .invulnerability
        .grant(current_tick, ms_to_ticks(LEVEL_START_GRACE_MS));
    schedule.invalidate();

    let spawned = world_setup::spawn_alien_wave(
        world,
        rng,
        grid,
        next_entity_id,
        session.level,
        current_tick,
    );
    spawner::arm_crystals(world, schedule, current_tick);
    tracing::debug!(level = session.level, aliens = spawned, "level started");
}
