//! Session scalars: score, lives, health, ammo, level and timers.
//!
//! Owned by `SimulationEngine`, NOT stored as ECS components. Systems
//! receive `&mut SessionState` in a fixed order each tick.

use crossfire_core::constants::*;

/// Player damage immunity window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Invulnerability {
    #[default]
    Vulnerable,
    /// Immune to damage while the current tick is below `until_tick`.
    Invulnerable { until_tick: u64 },
}

impl Invulnerability {
    pub fn is_active(&self, tick: u64) -> bool {
        match self {
            Invulnerability::Vulnerable => false,
            Invulnerability::Invulnerable { until_tick } => tick < *until_tick,
        }
    }

    /// Start (or extend) a window of `duration_ticks`. Never shortens an active window.
    pub fn grant(&mut self, tick: u64, duration_ticks: u64) {
        let until = tick + duration_ticks;
        *self = match *self {
            Invulnerability::Invulnerable { until_tick } if until_tick > until => {
                Invulnerability::Invulnerable { until_tick }
            }
            _ => Invulnerability::Invulnerable { until_tick: until },
        };
    }

    /// Drop back to `Vulnerable` once the window has passed.
    pub fn expire(&mut self, tick: u64) {
        if !self.is_active(tick) {
            *self = Invulnerability::Vulnerable;
        }
    }
}

/// Running player/game counters.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub health: u32,
    pub ammo: u32,
    /// Highest extra-life threshold already credited.
    pub extra_life_checkpoint: u32,
    pub invulnerability: Invulnerability,
    /// Hit flash stays on while the current tick is below this.
    pub hit_effect_until: u64,
    /// Tick of the last successful player shot.
    pub last_player_shot: Option<u64>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lives: INITIAL_LIVES,
            health: MAX_HEALTH,
            ammo: INITIAL_AMMO,
            extra_life_checkpoint: 0,
            invulnerability: Invulnerability::default(),
            hit_effect_until: 0,
            last_player_shot: None,
        }
    }
}

impl SessionState {
    pub fn is_invulnerable(&self, tick: u64) -> bool {
        self.invulnerability.is_active(tick)
    }

    pub fn hit_effect_active(&self, tick: u64) -> bool {
        tick < self.hit_effect_until
    }
}
