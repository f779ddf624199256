//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::DT;

/// 2D position in grid space (pixels).
/// x grows to the right, y grows downward (screen convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in grid units per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Axis-aligned overlap test: true when both |dx| and |dy| are
    /// strictly below `half_extent`.
    pub fn within_box(&self, other: &Position, half_extent: f64) -> bool {
        (self.x - other.x).abs() < half_extent && (self.y - other.y).abs() < half_extent
    }

    /// True when both axes are within `epsilon` of `other` (inclusive).
    pub fn near(&self, other: &Position, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    /// Move a fixed fraction of the remaining distance toward `target`.
    pub fn ease_toward(&self, target: &Position, fraction: f64) -> Position {
        Position {
            x: self.x + (target.x - self.x) * fraction,
            y: self.y + (target.y - self.y) * fraction,
        }
    }

    /// Advance by one tick of `velocity`.
    pub fn advanced(&self, velocity: &Velocity) -> Position {
        Position {
            x: self.x + velocity.x,
            y: self.y + velocity.y,
        }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
