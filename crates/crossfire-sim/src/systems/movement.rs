//! Kinematic systems: player ship movement and projectile integration.

use hecs::World;

use crossfire_core::components::{MoveTarget, PlayerShip, Projectile};
use crossfire_core::constants::{PLAYER_CONTINUOUS_SPEED, PLAYER_EASE_FRACTION, TARGET_EPSILON};
use crossfire_core::controls::ControlState;
use crossfire_core::enums::{Direction, MovementPolicy};
use crossfire_core::grid::Grid;
use crossfire_core::types::{Position, Velocity};

/// Move the player ship according to the held direction and movement policy.
pub fn move_player(
    world: &mut World,
    grid: &Grid,
    controls: &ControlState,
    policy: MovementPolicy,
) {
    let direction = controls.movement();
    for (_entity, (_ship, pos, target)) in
        world.query_mut::<(&PlayerShip, &mut Position, &mut MoveTarget)>()
    {
        match policy {
            MovementPolicy::Discrete => step_discrete(grid, direction, pos, target),
            MovementPolicy::Continuous => step_continuous(grid, direction, pos, target),
        }
    }
}

/// Accept a new target only once the ship has arrived at the current one,
/// then ease a fixed fraction toward it.
fn step_discrete(
    grid: &Grid,
    direction: Option<Direction>,
    pos: &mut Position,
    target: &mut MoveTarget,
) {
    if let Some(direction) = direction {
        if pos.near(&target.position, TARGET_EPSILON) {
            let (next, wrapped) = next_street(grid, &target.position, direction);
            target.position = next;
            // A wrapped step lands the ship on the far street.
            if wrapped {
                if direction.is_vertical() {
                    pos.y = next.y;
                } else {
                    pos.x = next.x;
                }
            }
        }
    }
    *pos = pos.ease_toward(&target.position, PLAYER_EASE_FRACTION);
}

/// Intersection one street over in `direction`, wrapping at the grid edges.
/// The flag is set when the step wrapped.
fn next_street(grid: &Grid, from: &Position, direction: Direction) -> (Position, bool) {
    let last = grid.last_index();
    let x_idx = grid.street_index(from.x);
    let y_idx = grid.street_index(from.y);

    let forward = |idx: usize| if idx < last { (idx + 1, false) } else { (0, true) };
    let backward = |idx: usize| if idx > 0 { (idx - 1, false) } else { (last, true) };

    match direction {
        Direction::Up => {
            let (y, wrapped) = backward(y_idx);
            (grid.intersection(x_idx, y), wrapped)
        }
        Direction::Down => {
            let (y, wrapped) = forward(y_idx);
            (grid.intersection(x_idx, y), wrapped)
        }
        Direction::Left => {
            let (x, wrapped) = backward(x_idx);
            (grid.intersection(x, y_idx), wrapped)
        }
        Direction::Right => {
            let (x, wrapped) = forward(x_idx);
            (grid.intersection(x, y_idx), wrapped)
        }
    }
}

/// Fixed speed along the held direction with the cross axis held on a street.
fn step_continuous(
    grid: &Grid,
    direction: Option<Direction>,
    pos: &mut Position,
    target: &mut MoveTarget,
) {
    if let Some(direction) = direction {
        let (ux, uy) = direction.unit();
        let extent = grid.extent();
        if direction.is_vertical() {
            pos.x = grid.snap_to_nearest_street(pos.x);
            pos.y = (pos.y + uy * PLAYER_CONTINUOUS_SPEED).rem_euclid(extent);
        } else {
            pos.y = grid.snap_to_nearest_street(pos.y);
            pos.x = (pos.x + ux * PLAYER_CONTINUOUS_SPEED).rem_euclid(extent);
        }
    }
    target.position = *pos;
}

/// Advance every projectile by its velocity: position += velocity.
pub fn advance_projectiles(world: &mut World) {
    for (_entity, (_projectile, pos, vel)) in
        world.query_mut::<(&Projectile, &mut Position, &Velocity)>()
    {
        *pos = pos.advanced(vel);
    }
}
