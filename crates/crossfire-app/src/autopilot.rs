//! Scripted pilot: turns a snapshot into held controls.
//!
//! Fires along any street shared with an alien, runs from aliens that get
//! close, and otherwise heads for ammo (when low) or the nearest crystal.

use crossfire_core::constants::{BLOCK_SIZE, BULLET_ALIEN_HIT_RANGE, LOW_AMMO_THRESHOLD, STREET_WIDTH};
use crossfire_core::controls::ControlState;
use crossfire_core::enums::Direction;
use crossfire_core::state::GameStateSnapshot;
use crossfire_core::types::Position;

/// Aliens closer than this (Manhattan distance) trigger evasion.
const DANGER_DISTANCE: f64 = 2.0 * (BLOCK_SIZE + STREET_WIDTH);

#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Controls to hold for the next tick.
    pub fn next_controls(&self, snapshot: &GameStateSnapshot) -> ControlState {
        let player = snapshot.player.position;
        let mut controls = ControlState::default();

        if snapshot.ammo > 0 {
            if let Some(direction) = firing_lane(snapshot, &player) {
                controls = ControlState::firing(direction);
            }
        }

        if let Some(direction) = self.heading(snapshot, &player) {
            let moving = ControlState::moving(direction);
            controls.up = moving.up;
            controls.down = moving.down;
            controls.left = moving.left;
            controls.right = moving.right;
        }

        controls
    }

    fn heading(&self, snapshot: &GameStateSnapshot, player: &Position) -> Option<Direction> {
        let threat = snapshot
            .aliens
            .iter()
            .map(|a| a.position)
            .min_by(|a, b| manhattan(player, a).total_cmp(&manhattan(player, b)));

        if let Some(alien) = threat {
            if manhattan(player, &alien) < DANGER_DISTANCE {
                return toward(alien.x - player.x, alien.y - player.y).map(opposite);
            }
        }

        let ammo_goal = if snapshot.ammo <= LOW_AMMO_THRESHOLD {
            snapshot.ammo_packs.first().map(|p| p.position)
        } else {
            None
        };
        let goal = ammo_goal.or_else(|| {
            snapshot
                .crystals
                .iter()
                .map(|c| c.position)
                .min_by(|a, b| manhattan(player, a).total_cmp(&manhattan(player, b)))
        })?;

        toward(goal.x - player.x, goal.y - player.y)
    }
}

/// Direction of the nearest alien sharing a street with the player.
fn firing_lane(snapshot: &GameStateSnapshot, player: &Position) -> Option<Direction> {
    snapshot
        .aliens
        .iter()
        .filter_map(|alien| {
            let dx = alien.position.x - player.x;
            let dy = alien.position.y - player.y;
            if dx.abs() < BULLET_ALIEN_HIT_RANGE {
                toward(0.0, dy).map(|dir| (dy.abs(), dir))
            } else if dy.abs() < BULLET_ALIEN_HIT_RANGE {
                toward(dx, 0.0).map(|dir| (dx.abs(), dir))
            } else {
                None
            }
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, dir)| dir)
}

/// Cardinal direction along the axis of larger displacement.
fn toward(dx: f64, dy: f64) -> Option<Direction> {
    if dx == 0.0 && dy == 0.0 {
        None
    } else if dy.abs() >= dx.abs() {
        Some(if dy < 0.0 { Direction::Up } else { Direction::Down })
    } else {
        Some(if dx < 0.0 { Direction::Left } else { Direction::Right })
    }
}

fn opposite(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
    }
}

fn manhattan(a: &Position, b: &Position) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
