//! Held-button state fed into the engine by the input collaborator.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// Snapshot of which controls are currently held.
///
/// Refreshed between ticks; the engine reads it once per tick. When more
/// than one direction is held the first of up, down, left, right wins.
/// Controls missing from serialized input count as released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire_up: bool,
    pub fire_down: bool,
    pub fire_left: bool,
    pub fire_right: bool,
    /// Toggles pause on the rising edge.
    pub pause_toggle: bool,
}

impl ControlState {
    /// Movement direction honored this tick, if any.
    pub fn movement(&self) -> Option<Direction> {
        pick(self.up, self.down, self.left, self.right)
    }

    /// Fire direction honored this tick, if any.
    pub fn fire(&self) -> Option<Direction> {
        pick(self.fire_up, self.fire_down, self.fire_left, self.fire_right)
    }

    /// Convenience constructor holding a single movement direction.
    pub fn moving(direction: Direction) -> Self {
        let mut controls = Self::default();
        match direction {
            Direction::Up => controls.up = true,
            Direction::Down => controls.down = true,
            Direction::Left => controls.left = true,
            Direction::Right => controls.right = true,
        }
        controls
    }

    /// Convenience constructor holding a single fire direction.
    pub fn firing(direction: Direction) -> Self {
        let mut controls = Self::default();
        match direction {
            Direction::Up => controls.fire_up = true,
            Direction::Down => controls.fire_down = true,
            Direction::Left => controls.fire_left = true,
            Direction::Right => controls.fire_right = true,
        }
        controls
    }
}

fn pick(up: bool, down: bool, left: bool, right: bool) -> Option<Direction> {
    if up {
        Some(Direction::Up)
    } else if down {
        Some(Direction::Down)
    } else if left {
        Some(Direction::Left)
    } else if right {
        Some(Direction::Right)
    } else {
        None
    }
}
