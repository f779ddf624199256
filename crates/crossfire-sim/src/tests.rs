//! Tests for the simulation engine: phases, movement, combat, pickups and progression.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crossfire_core::commands::PlayerCommand;
use crossfire_core::components::{Alien, AmmoPack, Crystal};
use crossfire_core::constants::*;
use crossfire_core::controls::ControlState;
use crossfire_core::enums::*;
use crossfire_core::events::GameEvent;
use crossfire_core::grid::Grid;
use crossfire_core::state::GameStateSnapshot;
use crossfire_core::types::{Position, Velocity};

use crate::config::SimConfig;
use crate::engine::SimulationEngine;
use crate::session::Invulnerability;
use crate::world_setup;

// ---- Helpers ----

fn started(config: SimConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick();
    engine
}

fn hold(engine: &mut SimulationEngine, controls: ControlState) -> GameStateSnapshot {
    engine.queue_command(PlayerCommand::SetControls { controls });
    engine.tick()
}

/// Replace the wave with a single alien parked in the bottom-left corner,
/// far from the player and off the center streets.
fn quiet_field(engine: &mut SimulationEngine) {
    let corner = engine.grid().intersection(0, GRID_BLOCKS);
    engine.clear_aliens();
    engine.spawn_test_alien(corner);
}

fn random_controls(rng: &mut ChaCha8Rng) -> ControlState {
    ControlState {
        up: rng.gen_bool(0.3),
        down: rng.gen_bool(0.3),
        left: rng.gen_bool(0.3),
        right: rng.gen_bool(0.3),
        fire_up: rng.gen_bool(0.2),
        fire_down: rng.gen_bool(0.2),
        fire_left: rng.gen_bool(0.2),
        fire_right: rng.gen_bool(0.2),
        pause_toggle: false,
    }
}

fn player_hits(snapshot: &GameStateSnapshot) -> Vec<bool> {
    snapshot
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::EntityHit {
                target: HitTarget::Player { life_lost },
            } => Some(*life_lost),
            _ => None,
        })
        .collect()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);
    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    let mut input_rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..600 {
        let controls = random_controls(&mut input_rng);
        let snap_a = hold(&mut engine_a, controls);
        let snap_b = hold(&mut engine_b, controls);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    let mut diverged = false;
    for _ in 0..200 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Invariants under random play ----

#[test]
fn test_invariants_hold_under_random_input() {
    let policies = [
        (MovementPolicy::Discrete, AimPolicy::Cardinal, FirePolicy::Cooldown),
        (MovementPolicy::Continuous, AimPolicy::Direct, FirePolicy::StreetCap),
    ];
    let grid = Grid::standard();
    let low = grid.first_street() - 1e-9;
    let high = grid.last_street() + 1e-9;

    for (seed, (movement, alien_aim, fire)) in policies.into_iter().enumerate() {
        let mut engine = started(SimConfig {
            seed: seed as u64,
            movement,
            alien_aim,
            fire,
        });
        // Start deep enough for aliens to shoot back.
        engine.session_mut().level = ALIEN_FIRE_MIN_LEVEL;

        let mut input_rng = ChaCha8Rng::seed_from_u64(99 + seed as u64);
        for _ in 0..3000 {
            if engine.phase() == GamePhase::GameOver {
                engine.queue_command(PlayerCommand::StartGame);
            }
            let snap = hold(&mut engine, random_controls(&mut input_rng));

            assert!(snap.health <= snap.max_health);
            if snap.phase == GamePhase::Playing {
                assert!(snap.health > 0, "health 0 must convert into a lost life");
            }
            for alien in &snap.aliens {
                assert!((low..=high).contains(&alien.position.x), "{alien:?}");
                assert!((low..=high).contains(&alien.position.y), "{alien:?}");
            }
            for bullet in snap.bullets.iter().chain(&snap.alien_bullets) {
                assert!(grid.contains(&bullet.position), "{bullet:?}");
            }
            assert!(snap.crystals.len() <= MAX_CRYSTALS);
            assert!(snap.ammo_packs.len() <= 1);
        }
    }
}

// ---- Phases ----

#[test]
fn test_starts_in_menu_and_does_not_tick() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for _ in 0..5 {
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Menu);
    }
    assert_eq!(engine.time().tick, 0);
    assert_eq!(engine.world().len(), 0);
}

#[test]
fn test_start_game_initial_state() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.level, 1);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.lives, INITIAL_LIVES);
    assert_eq!(snap.health, MAX_HEALTH);
    assert_eq!(snap.ammo, INITIAL_AMMO);
    assert_eq!(snap.aliens.len(), 2);
    assert_eq!(snap.player.position, Grid::standard().center());
    assert!(snap.invulnerable, "level start grants a grace period");
    assert_eq!(engine.time().tick, 1);
}

#[test]
fn test_start_game_ignored_while_playing() {
    let mut engine = started(SimConfig::default());
    engine.session_mut().score = 500;
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();
    assert_eq!(snap.score, 500);
    assert_eq!(engine.time().tick, 2);
}

#[test]
fn test_pause_stops_simulation() {
    let mut engine = started(SimConfig::default());
    for _ in 0..9 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10);
    let before = engine.tick();

    engine.queue_command(PlayerCommand::Pause);
    for _ in 0..10 {
        let snap = hold(&mut engine, ControlState::moving(Direction::Up));
        assert_eq!(snap.phase, GamePhase::Paused);
        assert_eq!(snap.player.position, before.player.position);
    }
    assert_eq!(engine.time().tick, 11, "Time should not advance while paused");

    engine.queue_command(PlayerCommand::Resume);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 21);
    assert_eq!(engine.phase(), GamePhase::Playing);
}

#[test]
fn test_pause_toggle_control_uses_rising_edge() {
    let mut engine = started(SimConfig::default());
    let toggle = ControlState {
        pause_toggle: true,
        ..Default::default()
    };

    hold(&mut engine, toggle);
    assert_eq!(engine.phase(), GamePhase::Paused);

    // Still held: no second toggle.
    hold(&mut engine, toggle);
    assert_eq!(engine.phase(), GamePhase::Paused);

    hold(&mut engine, ControlState::default());
    hold(&mut engine, toggle);
    assert_eq!(engine.phase(), GamePhase::Playing);
}

#[test]
fn test_return_to_menu_clears_world() {
    let mut engine = started(SimConfig::default());
    engine.queue_command(PlayerCommand::ReturnToMenu);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Playing, "not allowed while playing");

    engine.queue_command(PlayerCommand::Pause);
    engine.queue_command(PlayerCommand::ReturnToMenu);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Menu);
    assert!(snap.aliens.is_empty());
    assert_eq!(engine.world().len(), 0);
    assert!(engine.schedule().is_empty());
}

// ---- Player movement ----

#[test]
fn test_discrete_movement_steps_one_street() {
    let mut engine = started(SimConfig::default());
    let grid = engine.grid().clone();

    let snap = hold(&mut engine, ControlState::moving(Direction::Right));
    assert_eq!(snap.player.target, grid.intersection(4, 3));
    assert!(snap.player.position.x > 250.0 && snap.player.position.x < 330.0);

    // Holding the key does not move the target until the ship arrives.
    let snap = hold(&mut engine, ControlState::moving(Direction::Right));
    assert_eq!(snap.player.target, grid.intersection(4, 3));

    let mut snap = snap;
    for _ in 0..100 {
        snap = hold(&mut engine, ControlState::default());
    }
    assert!(snap.player.position.near(&grid.intersection(4, 3), TARGET_EPSILON));
}

#[test]
fn test_discrete_movement_wraps_at_edge() {
    let mut engine = started(SimConfig::default());
    let grid = engine.grid().clone();
    engine.set_player_position(grid.intersection(GRID_BLOCKS, 3));

    let snap = hold(&mut engine, ControlState::moving(Direction::Right));
    assert_eq!(snap.player.target, grid.intersection(0, 3));
    assert_eq!(snap.player.position.x, grid.first_street());
}

#[test]
fn test_continuous_movement_wraps_and_snaps() {
    let mut engine = started(SimConfig {
        movement: MovementPolicy::Continuous,
        ..Default::default()
    });
    engine.set_player_position(Position::new(253.0, 10.0));

    let mut snap = hold(&mut engine, ControlState::moving(Direction::Up));
    assert_eq!(snap.player.position, Position::new(250.0, 6.0));
    for _ in 0..2 {
        snap = hold(&mut engine, ControlState::moving(Direction::Up));
    }
    assert_eq!(snap.player.position, Position::new(250.0, 578.0));
}

// ---- Player fire ----

#[test]
fn test_fire_spawns_bullet_and_spends_ammo() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);

    let snap = hold(&mut engine, ControlState::firing(Direction::Up));
    assert_eq!(snap.ammo, INITIAL_AMMO - 1);
    assert_eq!(snap.bullets.len(), 1);
    assert_eq!(snap.bullets[0].position, Grid::standard().center());
    assert_eq!(snap.bullets[0].velocity, Velocity::new(0.0, -PLAYER_BULLET_SPEED));
    assert!(snap.events.contains(&GameEvent::ShotFired {
        direction: Direction::Up
    }));
}

#[test]
fn test_zero_ammo_never_fires() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);
    engine.session_mut().ammo = 0;

    for _ in 0..10 {
        let snap = hold(&mut engine, ControlState::firing(Direction::Left));
        assert!(snap.bullets.is_empty());
        assert_eq!(snap.ammo, 0);
    }
}

#[test]
fn test_cooldown_limits_fire_rate() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);

    let mut snap = engine.tick();
    for _ in 0..5 {
        snap = hold(&mut engine, ControlState::firing(Direction::Up));
    }
    assert_eq!(snap.bullets.len(), 2);
    assert_eq!(snap.ammo, INITIAL_AMMO - 2);
}

#[test]
fn test_street_cap_limits_live_bullets() {
    let mut engine = started(SimConfig {
        fire: FirePolicy::StreetCap,
        ..Default::default()
    });
    quiet_field(&mut engine);

    let mut snap = engine.tick();
    for _ in 0..3 {
        snap = hold(&mut engine, ControlState::firing(Direction::Up));
    }
    assert_eq!(snap.bullets.len(), MAX_BULLETS_PER_STREET);
    assert_eq!(snap.ammo, INITIAL_AMMO - MAX_BULLETS_PER_STREET as u32);

    // A different axis on the same spot is a different lane.
    let snap = hold(&mut engine, ControlState::firing(Direction::Left));
    assert_eq!(snap.bullets.len(), MAX_BULLETS_PER_STREET + 1);
}

// ---- Combat ----

#[test]
fn test_one_bullet_destroys_one_alien() {
    let mut engine = started(SimConfig::default());
    let grid = engine.grid().clone();
    engine.clear_aliens();
    let above = grid.intersection(3, 1);
    engine.spawn_test_alien(above);
    engine.spawn_test_alien(above);

    hold(&mut engine, ControlState::firing(Direction::Up));
    let mut snap = hold(&mut engine, ControlState::default());
    for _ in 0..40 {
        if snap.aliens.len() < 2 {
            break;
        }
        snap = engine.tick();
    }

    assert_eq!(snap.aliens.len(), 1, "one bullet, one alien");
    assert!(snap.bullets.is_empty(), "bullet is consumed by the hit");
    assert_eq!(snap.score, ALIEN_SCORE_PER_LEVEL);
    assert_eq!(snap.level, 1);
}

#[test]
fn test_two_bullets_on_one_alien_consume_only_one() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);
    let target = engine.grid().intersection(6, 1);
    let alien_id = engine.spawn_test_alien(target);
    let first = engine.spawn_test_player_bullet(target, Velocity::new(0.0, 0.0));
    let second = engine.spawn_test_player_bullet(target, Velocity::new(0.0, 0.0));
    assert!(first < second);

    let snap = engine.tick();

    let alien_hits: Vec<u32> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::EntityHit {
                target: HitTarget::Alien { alien_id },
            } => Some(*alien_id),
            _ => None,
        })
        .collect();
    assert_eq!(alien_hits, vec![alien_id]);
    assert_eq!(snap.aliens.len(), 1, "only the corner alien remains");
    assert_eq!(snap.bullets.len(), 1, "second bullet survives the hit");
    assert_eq!(snap.bullets[0].id, second);
    assert_eq!(snap.bullets[0].position, target);
    assert_eq!(snap.score, ALIEN_SCORE_PER_LEVEL);
}

#[test]
fn test_level_advances_when_wave_cleared() {
    let mut engine = started(SimConfig::default());
    let grid = engine.grid().clone();
    engine.clear_aliens();
    engine.spawn_test_alien(grid.intersection(3, 1));

    hold(&mut engine, ControlState::firing(Direction::Up));
    let mut previous = hold(&mut engine, ControlState::default());
    let mut completed = None;
    for _ in 0..40 {
        let snap = engine.tick();
        if snap.events.contains(&GameEvent::LevelComplete { level: 1 }) {
            completed = Some(snap);
            break;
        }
        assert_eq!(snap.level, 1);
        previous = snap;
    }

    let snap = completed.expect("level should complete");
    assert_eq!(previous.aliens.len(), 1);
    assert_eq!(snap.level, 2);
    assert_eq!(snap.aliens.len(), world_setup::wave_size(2) as usize);
    assert_eq!(snap.score, ALIEN_SCORE_PER_LEVEL);
    assert_eq!(snap.player.position, grid.center());
    assert!(snap.bullets.is_empty() && snap.crystals.is_empty());
    assert!(snap.invulnerable);
}

#[test]
fn test_wave_sizes() {
    assert_eq!(world_setup::wave_size(1), 2);
    assert_eq!(world_setup::wave_size(5), 6);
    assert_eq!(world_setup::wave_size(19), 20);
    assert_eq!(world_setup::wave_size(25), ALIEN_WAVE_CAP);
}

#[test]
fn test_health_hit_then_life_lost() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);
    let spot = engine.grid().intersection(1, 1);
    engine.set_player_position(spot);
    engine.session_mut().invulnerability = Invulnerability::Vulnerable;
    engine.session_mut().health = 1;
    let lives = engine.session().lives;

    engine.spawn_test_alien_bullet(spot, Velocity::default());
    let hit_tick = engine.time().tick;
    let snap = engine.tick();

    assert_eq!(player_hits(&snap), vec![true]);
    assert_eq!(snap.lives, lives - 1);
    assert_eq!(snap.health, MAX_HEALTH);
    assert!(snap.alien_bullets.is_empty());
    assert!(snap.invulnerable);
    assert!(snap.hit_effect_active);
    assert_eq!(
        engine.session().invulnerability,
        Invulnerability::Invulnerable {
            until_tick: hit_tick + ms_to_ticks(LIFE_LOST_GRACE_MS)
        }
    );

    // Recentering happens after a short delay.
    let snap = engine.tick();
    assert_eq!(snap.player.position, spot);
    let snap = engine.tick();
    assert_eq!(snap.player.position, Grid::standard().center());
}

#[test]
fn test_health_only_hit_grants_short_grace() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);
    let spot = engine.grid().intersection(1, 1);
    engine.set_player_position(spot);
    engine.session_mut().invulnerability = Invulnerability::Vulnerable;

    engine.spawn_test_alien_bullet(spot, Velocity::default());
    let hit_tick = engine.time().tick;
    let snap = engine.tick();

    assert_eq!(player_hits(&snap), vec![false]);
    assert_eq!(snap.health, MAX_HEALTH - 1);
    assert_eq!(snap.lives, INITIAL_LIVES);
    assert_eq!(
        engine.session().invulnerability,
        Invulnerability::Invulnerable {
            until_tick: hit_tick + ms_to_ticks(HEALTH_HIT_GRACE_MS)
        }
    );

    // A second bullet during the grace window does nothing.
    engine.spawn_test_alien_bullet(spot, Velocity::default());
    let snap = engine.tick();
    assert!(player_hits(&snap).is_empty());
    assert_eq!(snap.health, MAX_HEALTH - 1);
}

#[test]
fn test_body_hit_takes_precedence_over_bullet() {
    let mut engine = started(SimConfig::default());
    let spot = engine.grid().intersection(1, 1);
    engine.clear_aliens();
    engine.set_player_position(spot);
    engine.spawn_test_alien(spot);
    engine.spawn_test_alien_bullet(spot, Velocity::default());
    engine.session_mut().invulnerability = Invulnerability::Vulnerable;

    let snap = engine.tick();
    assert_eq!(player_hits(&snap), vec![true], "exactly one damaging hit");
    assert_eq!(snap.lives, INITIAL_LIVES - 1);
    assert_eq!(snap.health, MAX_HEALTH);

    // The alien is pushed away from the center.
    let grid = Grid::standard();
    assert_eq!(snap.aliens[0].target, grid.intersection(0, 0));
}

#[test]
fn test_game_over_on_last_life() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);
    let spot = engine.grid().intersection(5, 5);
    engine.set_player_position(spot);
    engine.session_mut().invulnerability = Invulnerability::Vulnerable;
    engine.session_mut().lives = 1;
    engine.session_mut().health = 1;
    engine.session_mut().score = 1234;

    engine.spawn_test_alien_bullet(spot, Velocity::default());
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.lives, 0);
    assert!(snap.events.contains(&GameEvent::GameOver {
        score: 1234,
        level: 1
    }));
    assert!(engine.schedule().is_empty());

    let frozen = engine.time().tick;
    for _ in 0..5 {
        let snap = engine.tick();
        assert_eq!(snap.score, 1234);
    }
    assert_eq!(engine.time().tick, frozen);

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.lives, INITIAL_LIVES);
    assert_eq!(snap.score, 0);
}

// ---- Pickups and scheduling ----

#[test]
fn test_crystals_spawn_on_schedule() {
    let mut engine = started(SimConfig::default());
    let first_due = ms_to_ticks(CRYSTAL_SPAWN_DELAYS_MS[0]);

    while engine.time().tick < first_due {
        let snap = engine.tick();
        assert!(snap.crystals.is_empty());
    }
    let snap = engine.tick();
    assert_eq!(snap.crystals.len(), 1);
    assert_eq!(snap.crystals[0].value, CRYSTAL_VALUES[0]);
}

#[test]
fn test_crystal_pickup_scores_and_rearms() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);
    let first_due = ms_to_ticks(CRYSTAL_SPAWN_DELAYS_MS[0]);
    let mut snap = engine.tick();
    while snap.crystals.is_empty() && engine.time().tick <= first_due {
        snap = engine.tick();
    }
    let crystal = snap.crystals[0].clone();
    let score = snap.score;

    engine.set_player_position(crystal.position);
    let pickup_tick = engine.time().tick;
    let snap = engine.tick();
    assert!(snap.events.contains(&GameEvent::CrystalCollected {
        value: crystal.value
    }));
    assert_eq!(snap.score, score + crystal.value);
    assert!(snap.crystals.is_empty());
    assert_eq!(world_setup::count::<Crystal>(engine.world()), 0);

    // Missing crystals are re-armed relative to the pickup.
    let next_due = pickup_tick + ms_to_ticks(CRYSTAL_SPAWN_DELAYS_MS[0]);
    while engine.time().tick < next_due {
        assert!(engine.tick().crystals.is_empty());
    }
    assert_eq!(engine.tick().crystals.len(), 1);
}

#[test]
fn test_ammo_pack_arrives_after_delay() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);
    engine.session_mut().ammo = LOW_AMMO_THRESHOLD + 1;

    let low_tick = engine.time().tick;
    let snap = hold(&mut engine, ControlState::firing(Direction::Right));
    assert_eq!(snap.ammo, LOW_AMMO_THRESHOLD);

    let due = low_tick + ms_to_ticks(AMMO_PACK_DELAY_MS);
    let mut snap = hold(&mut engine, ControlState::default());
    while engine.time().tick < due {
        assert!(snap.ammo_packs.is_empty());
        snap = engine.tick();
    }
    assert!(snap.ammo_packs.is_empty(), "not before the delay");
    let snap = engine.tick();
    assert_eq!(snap.ammo_packs.len(), 1);

    // Only one pack at a time.
    for _ in 0..60 {
        let snap = engine.tick();
        assert!(snap.ammo_packs.len() <= 1);
    }
    assert!(world_setup::count::<AmmoPack>(engine.world()) <= 1);
}

#[test]
fn test_ammo_pack_pickup_restores_ammo() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);
    engine.session_mut().ammo = 0;

    let mut snap = engine.tick();
    for _ in 0..60 {
        if !snap.ammo_packs.is_empty() {
            break;
        }
        snap = engine.tick();
    }
    let pack = snap.ammo_packs[0].clone();
    engine.set_player_position(pack.position);
    let snap = engine.tick();
    assert_eq!(snap.ammo, AMMO_PACK_AMOUNT);
    assert!(snap.events.contains(&GameEvent::AmmoCollected {
        amount: AMMO_PACK_AMOUNT
    }));
    assert!(!engine
        .schedule()
        .is_pending(crate::schedule::ScheduledKind::SpawnAmmoPack));
}

#[test]
fn test_stale_events_dropped_after_level_change() {
    let mut engine = started(SimConfig::default());
    let first_due = ms_to_ticks(CRYSTAL_SPAWN_DELAYS_MS[0]);

    // Clearing the wave starts level 2 at tick 1, re-arming crystals from there.
    engine.clear_aliens();
    let restart_tick = engine.time().tick;
    let snap = engine.tick();
    assert_eq!(snap.level, 2);

    // The level 1 crystal would have appeared during tick `first_due`.
    while engine.time().tick < restart_tick + first_due {
        let snap = engine.tick();
        assert!(snap.crystals.is_empty(), "level 1 crystal leaked into level 2");
    }
    assert_eq!(engine.tick().crystals.len(), 1);
}

// ---- Progression ----

#[test]
fn test_extra_life_at_threshold() {
    let mut engine = started(SimConfig::default());
    quiet_field(&mut engine);

    engine.session_mut().score = EXTRA_LIFE_SCORE;
    let snap = engine.tick();
    assert_eq!(snap.lives, INITIAL_LIVES + 1);
    assert!(snap.events.contains(&GameEvent::ExtraLife {
        lives: INITIAL_LIVES + 1
    }));

    engine.session_mut().score = 2 * EXTRA_LIFE_SCORE - 1;
    assert_eq!(engine.tick().lives, INITIAL_LIVES + 1);

    engine.session_mut().score = 2 * EXTRA_LIFE_SCORE;
    assert_eq!(engine.tick().lives, INITIAL_LIVES + 2);
}

#[test]
fn test_alien_count_never_exceeds_cap() {
    let mut engine = started(SimConfig::default());
    engine.session_mut().level = 30;
    engine.clear_aliens();
    let snap = engine.tick();
    assert_eq!(snap.level, 31);
    assert_eq!(snap.aliens.len(), ALIEN_WAVE_CAP as usize);
    assert_eq!(world_setup::count::<Alien>(engine.world()), ALIEN_WAVE_CAP as usize);
}
