//! Collision resolution: player bullets against aliens, aliens and alien
//! bullets against the player, and pickups.
//!
//! Runs once per tick against the entity sets captured when resolution
//! starts. Entities are visited in ascending id order.

use hecs::{Entity, World};

use crossfire_core::components::*;
use crossfire_core::constants::*;
use crossfire_core::enums::HitTarget;
use crossfire_core::events::GameEvent;
use crossfire_core::grid::Grid;
use crossfire_core::types::Position;

use crate::schedule::{EventSchedule, ScheduledKind};
use crate::session::SessionState;
use crate::systems::alien_ai;
use crate::world_setup;

/// What happened during collision resolution that later systems react to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub crystals_collected: u32,
    /// The hit consumed the player's last life.
    pub game_over: bool,
}

/// Run collision resolution for one tick.
pub fn run(
    world: &mut World,
    grid: &Grid,
    session: &mut SessionState,
    schedule: &mut EventSchedule,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    // Step 1: Player bullets against aliens
    let survivors = resolve_bullet_hits(world, session, events);

    // Step 2: Aliens and alien bullets against the player
    if !session.is_invulnerable(current_tick) {
        if let Some(player) = world_setup::player_position(world) {
            resolve_player_hit(
                world,
                grid,
                &player,
                &survivors,
                session,
                schedule,
                events,
                &mut outcome,
                current_tick,
            );
        }
    }

    // Step 3: Pickups (collected even while invulnerable)
    if let Some(player) = world_setup::player_position(world) {
        resolve_pickups(world, &player, session, events, &mut outcome);
    }

    outcome
}

/// Each alien takes the first unconsumed bullet in range. Returns the
/// positions of aliens still alive.
fn resolve_bullet_hits(
    world: &mut World,
    session: &mut SessionState,
    events: &mut Vec<GameEvent>,
) -> Vec<Position> {
    let aliens = sorted_by_id(
        world
            .query::<(&Alien, &Position)>()
            .iter()
            .map(|(e, (alien, pos))| (alien.id, e, *pos))
            .collect(),
    );
    let bullets = sorted_by_id(
        world
            .query::<(&PlayerBullet, &Projectile, &Position)>()
            .iter()
            .map(|(e, (_, projectile, pos))| (projectile.id, e, *pos))
            .collect(),
    );

    let mut consumed = vec![false; bullets.len()];
    let mut survivors = Vec::with_capacity(aliens.len());
    let mut dead: Vec<Entity> = Vec::new();

    for (alien_id, alien_entity, alien_pos) in aliens {
        let hit = bullets
            .iter()
            .enumerate()
            .find(|(i, (_, _, pos))| !consumed[*i] && pos.within_box(&alien_pos, BULLET_ALIEN_HIT_RANGE));

        match hit {
            Some((i, (_, bullet_entity, _))) => {
                consumed[i] = true;
                dead.push(*bullet_entity);
                dead.push(alien_entity);
                session.score = session
                    .score
                    .saturating_add(ALIEN_SCORE_PER_LEVEL.saturating_mul(session.level));
                events.push(GameEvent::EntityHit {
                    target: HitTarget::Alien { alien_id },
                });
                tracing::trace!(alien_id, "alien destroyed");
            }
            None => survivors.push(alien_pos),
        }
    }

    for entity in dead {
        let _ = world.despawn(entity);
    }
    survivors
}

#[allow(clippy::too_many_arguments)]
fn resolve_player_hit(
    world: &mut World,
    grid: &Grid,
    player: &Position,
    aliens: &[Position],
    session: &mut SessionState,
    schedule: &mut EventSchedule,
    events: &mut Vec<GameEvent>,
    outcome: &mut CollisionOutcome,
    current_tick: u64,
) {
    let body_hit = aliens
        .iter()
        .any(|pos| pos.within_box(player, ALIEN_BODY_HIT_RANGE));
    let bullet_hit = !body_hit
        && world
            .query::<(&AlienBullet, &Position)>()
            .iter()
            .any(|(_, (_, pos))| pos.within_box(player, ALIEN_BULLET_PLAYER_HIT_RANGE));
    if !body_hit && !bullet_hit {
        return;
    }

    let life_lost = if body_hit {
        true
    } else {
        session.health = session.health.saturating_sub(1);
        session.health == 0
    };

    world_setup::despawn_all::<AlienBullet>(world);
    session.hit_effect_until = current_tick + ms_to_ticks(HIT_EFFECT_MS);
    events.push(GameEvent::EntityHit {
        target: HitTarget::Player { life_lost },
    });

    if !life_lost {
        session
            .invulnerability
            .grant(current_tick, ms_to_ticks(HEALTH_HIT_GRACE_MS));
        tracing::debug!(health = session.health, "player damaged");
        return;
    }

    session.lives = session.lives.saturating_sub(1);
    session.health = MAX_HEALTH;
    tracing::debug!(lives = session.lives, body_hit, "player lost a life");

    if session.lives == 0 {
        outcome.game_over = true;
        return;
    }

    session
        .invulnerability
        .grant(current_tick, ms_to_ticks(LIFE_LOST_GRACE_MS));
    alien_ai::push_outward(world, grid);
    schedule.schedule(
        current_tick + ms_to_ticks(RECENTER_DELAY_MS),
        ScheduledKind::RecenterPlayer,
    );
}

fn resolve_pickups(
    world: &mut World,
    player: &Position,
    session: &mut SessionState,
    events: &mut Vec<GameEvent>,
    outcome: &mut CollisionOutcome,
) {
    let mut crystals: Vec<(u32, Entity, u32)> = world
        .query::<(&Crystal, &Position)>()
        .iter()
        .filter(|(_, (_, pos))| pos.within_box(player, PICKUP_RANGE))
        .map(|(e, (crystal, _))| (crystal.id, e, crystal.value))
        .collect();
    crystals.sort_by_key(|(id, _, _)| *id);

    for (_, entity, value) in crystals {
        let _ = world.despawn(entity);
        session.score = session.score.saturating_add(value);
        outcome.crystals_collected += 1;
        events.push(GameEvent::CrystalCollected { value });
    }

    let packs: Vec<Entity> = world
        .query::<(&AmmoPack, &Position)>()
        .iter()
        .filter(|(_, (_, pos))| pos.within_box(player, PICKUP_RANGE))
        .map(|(e, _)| e)
        .collect();

    for entity in packs {
        let _ = world.despawn(entity);
        session.ammo = session.ammo.saturating_add(AMMO_PACK_AMOUNT);
        events.push(GameEvent::AmmoCollected {
            amount: AMMO_PACK_AMOUNT,
        });
    }
}

fn sorted_by_id(mut items: Vec<(u32, Entity, Position)>) -> Vec<(u32, Entity, Position)> {
    items.sort_by_key(|(id, _, _)| *id);
    items
}
