//! Fire control: player shots gated by ammo and fire policy, alien return fire.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crossfire_core::components::{Alien, PlayerBullet};
use crossfire_core::constants::*;
use crossfire_core::controls::ControlState;
use crossfire_core::enums::{AimPolicy, Direction, FirePolicy};
use crossfire_core::events::GameEvent;
use crossfire_core::grid::Grid;
use crossfire_core::types::{Position, Velocity};

use crate::session::SessionState;
use crate::world_setup;

/// Fire a player bullet if a fire key is held and the shot is allowed.
/// Rejected shots leave ammo and the world untouched.
#[allow(clippy::too_many_arguments)]
pub fn run_player(
    world: &mut World,
    grid: &Grid,
    session: &mut SessionState,
    controls: &ControlState,
    policy: FirePolicy,
    next_entity_id: &mut u32,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) {
    let Some(direction) = controls.fire() else {
        return;
    };
    if session.ammo == 0 {
        return;
    }
    let Some(player) = world_setup::player_position(world) else {
        return;
    };
    let origin = grid.snap(&player);

    let allowed = match policy {
        FirePolicy::Cooldown => {
            let cooldown = ms_to_ticks(PLAYER_FIRE_COOLDOWN_MS);
            session
                .last_player_shot
                .map_or(true, |last| current_tick.saturating_sub(last) >= cooldown)
        }
        FirePolicy::StreetCap => {
            bullets_on_street(world, &origin, direction) < MAX_BULLETS_PER_STREET
        }
    };
    if !allowed {
        return;
    }

    let (ux, uy) = direction.unit();
    let velocity = Velocity::new(ux * PLAYER_BULLET_SPEED, uy * PLAYER_BULLET_SPEED);
    world_setup::spawn_player_bullet(world, next_entity_id, origin, velocity);

    session.ammo -= 1;
    session.last_player_shot = Some(current_tick);
    events.push(GameEvent::ShotFired { direction });
}

/// Live player bullets travelling along the same street and axis as a shot
/// from `origin` in `direction`.
fn bullets_on_street(world: &World, origin: &Position, direction: Direction) -> usize {
    world
        .query::<(&PlayerBullet, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (_, pos, vel))| {
            if direction.is_vertical() {
                vel.x == 0.0 && vel.y != 0.0 && (pos.x - origin.x).abs() <= INTERSECTION_TOLERANCE
            } else {
                vel.y == 0.0 && vel.x != 0.0 && (pos.y - origin.y).abs() <= INTERSECTION_TOLERANCE
            }
        })
        .count()
}

/// Let eligible aliens fire at the player. Aliens are visited in ascending
/// id order so random draws stay reproducible.
#[allow(clippy::too_many_arguments)]
pub fn run_aliens(
    world: &mut World,
    grid: &Grid,
    rng: &mut ChaCha8Rng,
    aim: AimPolicy,
    level: u32,
    next_entity_id: &mut u32,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) {
    if level < ALIEN_FIRE_MIN_LEVEL {
        return;
    }
    let Some(player) = world_setup::player_position(world) else {
        return;
    };
    let interval = ms_to_ticks(ALIEN_FIRE_INTERVAL_MS);

    let mut shooters: Vec<(u32, Entity, Position)> = world
        .query::<(&Alien, &Position)>()
        .iter()
        .filter(|(_, (alien, pos))| {
            current_tick.saturating_sub(alien.last_shot_tick) >= interval
                && grid.is_intersection(pos, INTERSECTION_TOLERANCE)
        })
        .map(|(entity, (alien, pos))| (alien.id, entity, *pos))
        .collect();
    shooters.sort_by_key(|(id, _, _)| *id);

    for (alien_id, entity, pos) in shooters {
        if !rng.gen_bool(ALIEN_FIRE_PROBABILITY) {
            continue;
        }
        let origin = grid.snap(&pos);
        let velocity = aim_at(aim, &origin, &player);
        world_setup::spawn_alien_bullet(world, next_entity_id, origin, velocity);

        if let Ok(mut alien) = world.get::<&mut Alien>(entity) {
            alien.last_shot_tick = current_tick;
        }
        events.push(GameEvent::AlienFired { alien_id });
    }
}

/// Bullet velocity for a shot from `from` at `target`.
pub fn aim_at(aim: AimPolicy, from: &Position, target: &Position) -> Velocity {
    let delta = DVec2::new(target.x - from.x, target.y - from.y);
    if aim == AimPolicy::Direct {
        if let Some(dir) = delta.try_normalize() {
            let v = dir * ALIEN_BULLET_SPEED;
            return Velocity::new(v.x, v.y);
        }
    }

    let direction = if delta.y.abs() >= delta.x.abs() {
        if delta.y < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    } else if delta.x < 0.0 {
        Direction::Left
    } else {
        Direction::Right
    };
    let (ux, uy) = direction.unit();
    Velocity::new(ux * ALIEN_BULLET_SPEED, uy * ALIEN_BULLET_SPEED)
}
