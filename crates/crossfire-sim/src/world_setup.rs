//! Entity spawn factories and lookups for the simulation world.
//!
//! Creates the player ship, alien waves, projectiles and pickups with
//! appropriate component bundles.

use hecs::{Component, Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crossfire_core::components::*;
use crossfire_core::constants::*;
use crossfire_core::grid::Grid;
use crossfire_core::types::{Position, Velocity};

/// Spawn the player's ship at the grid center.
pub fn spawn_player(world: &mut World, grid: &Grid) -> Entity {
    let center = grid.center();
    world.spawn((PlayerShip, center, MoveTarget { position: center }))
}

/// Current player position, if a ship exists.
pub fn player_position(world: &World) -> Option<Position> {
    world
        .query::<(&PlayerShip, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
}

/// Move the player ship back to the grid center and clear its movement target.
pub fn recenter_player(world: &mut World, grid: &Grid) {
    let center = grid.center();
    for (_entity, (_ship, pos, target)) in
        world.query_mut::<(&PlayerShip, &mut Position, &mut MoveTarget)>()
    {
        *pos = center;
        target.position = center;
    }
}

/// Number of aliens in the wave for `level`.
pub fn wave_size(level: u32) -> u32 {
    level.saturating_add(1).min(ALIEN_WAVE_CAP)
}

/// Spawn the wave for `level` on random grid edges. Returns the count spawned.
pub fn spawn_alien_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    grid: &Grid,
    next_id: &mut u32,
    level: u32,
    current_tick: u64,
) -> u32 {
    let count = wave_size(level);
    for _ in 0..count {
        let position = random_edge_position(rng, grid);
        spawn_alien(world, next_id, position, current_tick);
    }
    count
}

/// Spawn one alien parked at `position`.
pub fn spawn_alien(
    world: &mut World,
    next_id: &mut u32,
    position: Position,
    current_tick: u64,
) -> Entity {
    let id = allocate_id(next_id);
    world.spawn((
        Alien {
            id,
            last_move_tick: current_tick,
            last_shot_tick: current_tick,
        },
        position,
        MoveTarget { position },
    ))
}

/// Random intersection on one of the four outer streets.
fn random_edge_position(rng: &mut ChaCha8Rng, grid: &Grid) -> Position {
    let last = grid.last_index();
    let along = rng.gen_range(0..=last);
    match rng.gen_range(0..4) {
        0 => grid.intersection(along, 0),    // top
        1 => grid.intersection(last, along), // right
        2 => grid.intersection(along, last), // bottom
        _ => grid.intersection(0, along),    // left
    }
}

/// Random intersection anywhere on the grid.
pub fn random_intersection(rng: &mut ChaCha8Rng, grid: &Grid) -> Position {
    let last = grid.last_index();
    let x = rng.gen_range(0..=last);
    let y = rng.gen_range(0..=last);
    grid.intersection(x, y)
}

/// Spawn a player bullet.
pub fn spawn_player_bullet(
    world: &mut World,
    next_id: &mut u32,
    position: Position,
    velocity: Velocity,
) -> Entity {
    let id = allocate_id(next_id);
    world.spawn((
        PlayerBullet,
        Projectile { id },
        position,
        velocity,
    ))
}

/// Spawn an alien bullet.
pub fn spawn_alien_bullet(
    world: &mut World,
    next_id: &mut u32,
    position: Position,
    velocity: Velocity,
) -> Entity {
    let id = allocate_id(next_id);
    world.spawn((
        AlienBullet,
        Projectile { id },
        position,
        velocity,
    ))
}

/// Spawn a crystal at a random free intersection.
///
/// Returns `None` when the field already holds the maximum number of crystals.
/// If no free intersection turns up within the attempt budget, the last
/// attempted position is used even if it overlaps.
pub fn spawn_crystal(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    grid: &Grid,
    next_id: &mut u32,
) -> Option<Entity> {
    let occupied: Vec<Position> = world
        .query::<(&Crystal, &Position)>()
        .iter()
        .map(|(_, (_, pos))| *pos)
        .collect();

    if occupied.len() >= MAX_CRYSTALS {
        return None;
    }

    let mut position = random_intersection(rng, grid);
    let mut attempts = 1;
    while attempts < CRYSTAL_PLACEMENT_ATTEMPTS && occupied.contains(&position) {
        position = random_intersection(rng, grid);
        attempts += 1;
    }

    let id = allocate_id(next_id);
    let value = CRYSTAL_VALUES[occupied.len()];
    Some(world.spawn((Crystal { id, value }, position)))
}

/// Spawn an ammo pack at a random intersection.
pub fn spawn_ammo_pack(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    grid: &Grid,
    next_id: &mut u32,
) -> Entity {
    let position = random_intersection(rng, grid);
    let id = allocate_id(next_id);
    world.spawn((AmmoPack { id }, position))
}

/// Remove every entity carrying component `C`.
pub fn despawn_all<C: Component>(world: &mut World) {
    let entities: Vec<Entity> = world.query::<&C>().iter().map(|(e, _)| e).collect();
    for entity in entities {
        let _ = world.despawn(entity);
    }
}

/// Count entities carrying component `C`.
pub fn count<C: Component>(world: &World) -> usize {
    world.query::<&C>().iter().count()
}

fn allocate_id(next_id: &mut u32) -> u32 {
    let id = *next_id;
    *next_id = next_id.wrapping_add(1);
    id
}
