//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use crossfire_core::components::*;
use crossfire_core::constants::MAX_HEALTH;
use crossfire_core::enums::GamePhase;
use crossfire_core::events::GameEvent;
use crossfire_core::state::*;
use crossfire_core::types::{Position, SimTime, Velocity};

use crate::session::SessionState;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    session: &SessionState,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        level: session.level,
        score: session.score,
        lives: session.lives,
        health: session.health,
        max_health: MAX_HEALTH,
        ammo: session.ammo,
        player: build_player(world),
        aliens: build_aliens(world),
        bullets: build_projectiles::<PlayerBullet>(world),
        alien_bullets: build_projectiles::<AlienBullet>(world),
        crystals: build_crystals(world),
        ammo_packs: build_ammo_packs(world),
        invulnerable: session.is_invulnerable(time.tick),
        hit_effect_active: session.hit_effect_active(time.tick),
        events,
    }
}

fn build_player(world: &World) -> PlayerView {
    world
        .query::<(&PlayerShip, &Position, &MoveTarget)>()
        .iter()
        .next()
        .map(|(_, (_, pos, target))| PlayerView {
            position: *pos,
            target: target.position,
        })
        .unwrap_or_default()
}

fn build_aliens(world: &World) -> Vec<AlienView> {
    let mut aliens: Vec<AlienView> = world
        .query::<(&Alien, &Position, &MoveTarget)>()
        .iter()
        .map(|(_, (alien, pos, target))| AlienView {
            id: alien.id,
            position: *pos,
            target: target.position,
        })
        .collect();
    aliens.sort_by_key(|a| a.id);
    aliens
}

/// Projectiles carrying marker `M`, sorted by id.
fn build_projectiles<M: hecs::Component>(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&M, &Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(_, (_, projectile, pos, vel))| ProjectileView {
            id: projectile.id,
            position: *pos,
            velocity: *vel,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_crystals(world: &World) -> Vec<CrystalView> {
    let mut crystals: Vec<CrystalView> = world
        .query::<(&Crystal, &Position)>()
        .iter()
        .map(|(_, (crystal, pos))| CrystalView {
            id: crystal.id,
            position: *pos,
            value: crystal.value,
        })
        .collect();
    crystals.sort_by_key(|c| c.id);
    crystals
}

fn build_ammo_packs(world: &World) -> Vec<AmmoPackView> {
    let mut packs: Vec<AmmoPackView> = world
        .query::<(&AmmoPack, &Position)>()
        .iter()
        .map(|(_, (pack, pos))| AmmoPackView {
            id: pack.id,
            position: *pos,
        })
        .collect();
    packs.sort_by_key(|p| p.id);
    packs
}
