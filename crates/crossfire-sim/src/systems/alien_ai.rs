//! Alien AI: street-by-street pursuit of the player.
//!
//! Each alien eases toward its current target intersection. Once it has
//! arrived and the re-aim interval has passed, it picks the adjacent
//! intersection that closes the larger of the two gaps to the player.

use hecs::World;

use crossfire_core::components::{Alien, MoveTarget};
use crossfire_core::constants::*;
use crossfire_core::grid::Grid;
use crossfire_core::types::Position;

/// Per-tick easing fraction for aliens at `level`.
pub fn alien_speed(level: u32) -> f64 {
    let level_bonus = level.saturating_sub(1) as f64 * ALIEN_LEVEL_SPEED_FACTOR;
    ALIEN_BASE_SPEED * (1.0 + level_bonus)
}

/// Run alien re-aiming and movement for one tick.
pub fn run(world: &mut World, grid: &Grid, player: Position, level: u32, current_tick: u64) {
    let reaim_ticks = ms_to_ticks(ALIEN_REAIM_INTERVAL_MS);
    let fraction = alien_speed(level);

    for (_entity, (alien, pos, target)) in
        world.query_mut::<(&mut Alien, &mut Position, &mut MoveTarget)>()
    {
        let arrived = pos.near(&target.position, TARGET_EPSILON);
        let interval_elapsed = current_tick.saturating_sub(alien.last_move_tick) >= reaim_ticks;
        if arrived && interval_elapsed {
            target.position = step_toward(grid, &target.position, &player);
            alien.last_move_tick = current_tick;
        }
        *pos = pos.ease_toward(&target.position, fraction);
    }
}

/// Adjacent intersection one street closer to `player` along the axis with
/// the larger displacement. Ties go to the vertical axis.
fn step_toward(grid: &Grid, from: &Position, player: &Position) -> Position {
    let mut x_idx = grid.street_index(from.x);
    let mut y_idx = grid.street_index(from.y);
    let dx = player.x - from.x;
    let dy = player.y - from.y;

    if dy.abs() >= dx.abs() {
        y_idx = step_index(y_idx, dy, grid.last_index());
    } else {
        x_idx = step_index(x_idx, dx, grid.last_index());
    }
    grid.intersection(x_idx, y_idx)
}

fn step_index(idx: usize, delta: f64, last: usize) -> usize {
    if delta > 0.0 {
        (idx + 1).min(last)
    } else if delta < 0.0 {
        idx.saturating_sub(1)
    } else {
        idx
    }
}

/// Push every alien's target `ALIEN_PUSH_STREETS` streets away from the grid
/// center on each axis, clamped to the edges. An axis sitting on the center
/// street is left alone unless both are, in which case the alien goes up.
pub fn push_outward(world: &mut World, grid: &Grid) {
    let center = grid.center_index();
    let last = grid.last_index();
    let away = |idx: usize| {
        if idx < center {
            idx.saturating_sub(ALIEN_PUSH_STREETS)
        } else if idx > center {
            (idx + ALIEN_PUSH_STREETS).min(last)
        } else {
            idx
        }
    };

    for (_entity, (_alien, target)) in world.query_mut::<(&Alien, &mut MoveTarget)>() {
        let x_idx = grid.street_index(target.position.x);
        let y_idx = grid.street_index(target.position.y);
        let (new_x, mut new_y) = (away(x_idx), away(y_idx));
        if x_idx == center && y_idx == center {
            new_y = center.saturating_sub(ALIEN_PUSH_STREETS);
        }
        target.position = grid.intersection(new_x, new_y);
    }
}
