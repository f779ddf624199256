//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// One of the four cardinal directions along the street grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for this direction (screen convention: up is -y).
    pub fn unit(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    /// Whether this direction moves along the vertical axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// How held direction keys move the player ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPolicy {
    /// Step one street at a time, easing toward the next intersection.
    #[default]
    Discrete,
    /// Fixed speed per tick with the cross axis snapped to a street; wraps at the edges.
    Continuous,
}

/// How aliens aim their shots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AimPolicy {
    /// Along the axis with the larger displacement to the player.
    #[default]
    Cardinal,
    /// Straight at the player's current position.
    Direct,
}

/// Rate limiting applied to player shots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirePolicy {
    /// Minimum interval between any two shots.
    #[default]
    Cooldown,
    /// At most a fixed number of live bullets per street and axis.
    StreetCap,
}

/// What a hit landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum HitTarget {
    /// An alien destroyed by a player bullet.
    Alien { alien_id: u32 },
    /// The player took damage. `life_lost` is set when a whole life was consumed.
    Player { life_lost: bool },
}
