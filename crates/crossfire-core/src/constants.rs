//! Simulation constants and tuning parameters.
//!
//! All durations are expressed in milliseconds and converted to ticks with
//! [`ms_to_ticks`]. Distances are grid pixels.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 20;

/// Milliseconds per tick.
pub const TICK_PERIOD_MS: u64 = 1000 / TICK_RATE as u64;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Convert a millisecond duration into a whole number of ticks.
pub const fn ms_to_ticks(ms: u64) -> u64 {
    ms / TICK_PERIOD_MS
}

// --- Grid layout ---

/// Number of city blocks along each axis.
pub const GRID_BLOCKS: usize = 7;

/// Edge length of a city block.
pub const BLOCK_SIZE: f64 = 60.0;

/// Width of a street between blocks.
pub const STREET_WIDTH: f64 = 20.0;

/// Number of streets along each axis.
pub const STREET_COUNT: usize = GRID_BLOCKS + 1;

/// Size of the playfield bounding box on both axes.
pub const GRID_EXTENT: f64 = GRID_BLOCKS as f64 * (BLOCK_SIZE + STREET_WIDTH) + STREET_WIDTH;

/// Street index used as the player's home position on both axes.
pub const CENTER_STREET_INDEX: usize = GRID_BLOCKS / 2;

/// Distance at which an entity counts as having arrived at its target.
pub const TARGET_EPSILON: f64 = 2.0;

/// Distance from a street coordinate that still counts as "on" the street.
pub const INTERSECTION_TOLERANCE: f64 = 2.0;

// --- Player ---

pub const INITIAL_LIVES: u32 = 3;

/// Health points per life.
pub const MAX_HEALTH: u32 = 3;

pub const INITIAL_AMMO: u32 = 50;

/// Fraction of the remaining distance covered per tick (discrete movement).
pub const PLAYER_EASE_FRACTION: f64 = 0.15;

/// Pixels per tick (continuous movement).
pub const PLAYER_CONTINUOUS_SPEED: f64 = 4.0;

/// Player bullet speed (pixels per tick).
pub const PLAYER_BULLET_SPEED: f64 = 5.0;

/// Minimum time between player shots (cooldown fire policy).
pub const PLAYER_FIRE_COOLDOWN_MS: u64 = 200;

/// Maximum live player bullets per street and axis (street-cap fire policy).
pub const MAX_BULLETS_PER_STREET: usize = 2;

// --- Aliens ---

/// Aliens in a wave: min(1 + level, ALIEN_WAVE_CAP).
pub const ALIEN_WAVE_CAP: u32 = 20;

/// Base easing fraction per tick at level 1.
pub const ALIEN_BASE_SPEED: f64 = 0.03;

/// Relative speed increase per level above 1.
pub const ALIEN_LEVEL_SPEED_FACTOR: f64 = 0.02;

/// Minimum time between alien target re-aims.
pub const ALIEN_REAIM_INTERVAL_MS: u64 = 500;

/// First level at which aliens shoot back.
pub const ALIEN_FIRE_MIN_LEVEL: u32 = 3;

/// Minimum time between shots for a single alien.
pub const ALIEN_FIRE_INTERVAL_MS: u64 = 1500;

/// Per-tick probability that an eligible alien fires.
pub const ALIEN_FIRE_PROBABILITY: f64 = 0.25;

/// Alien bullet speed (pixels per tick).
pub const ALIEN_BULLET_SPEED: f64 = 4.0;

/// Streets an alien target is pushed away from the center when the player loses a life.
pub const ALIEN_PUSH_STREETS: usize = 2;

/// Score for destroying an alien, multiplied by the current level.
pub const ALIEN_SCORE_PER_LEVEL: u32 = 100;

// --- Collision half-extents ---

pub const BULLET_ALIEN_HIT_RANGE: f64 = 20.0;
pub const ALIEN_BULLET_PLAYER_HIT_RANGE: f64 = 15.0;
pub const ALIEN_BODY_HIT_RANGE: f64 = 20.0;
pub const PICKUP_RANGE: f64 = 20.0;

// --- Invulnerability and hit feedback ---

/// Grace period at the start of every level.
pub const LEVEL_START_GRACE_MS: u64 = 2000;

/// Invulnerability after a hit that only costs health.
pub const HEALTH_HIT_GRACE_MS: u64 = 500;

/// Invulnerability after a hit that costs a life.
pub const LIFE_LOST_GRACE_MS: u64 = 1000;

/// Delay before the player is moved back to the grid center after losing a life.
pub const RECENTER_DELAY_MS: u64 = 100;

/// How long the hit flash stays active.
pub const HIT_EFFECT_MS: u64 = 300;

// --- Pickups ---

/// Crystal values, indexed by the number of crystals already on the field.
pub const CRYSTAL_VALUES: [u32; 4] = [100, 200, 400, 800];

/// Maximum crystals on the field at once.
pub const MAX_CRYSTALS: usize = CRYSTAL_VALUES.len();

/// Delay of each crystal spawn relative to the moment the schedule is armed.
pub const CRYSTAL_SPAWN_DELAYS_MS: [u64; MAX_CRYSTALS] = [3000, 6000, 9000, 12000];

/// Attempts to find a free intersection before accepting an overlap.
pub const CRYSTAL_PLACEMENT_ATTEMPTS: u32 = 50;

/// Ammo at or below this value triggers an ammo pack spawn.
pub const LOW_AMMO_THRESHOLD: u32 = 10;

/// Delay between the low-ammo condition and the pack appearing.
pub const AMMO_PACK_DELAY_MS: u64 = 2000;

/// Ammo restored by one pack.
pub const AMMO_PACK_AMOUNT: u32 = 30;

// --- Progression ---

/// Score interval between extra lives.
pub const EXTRA_LIFE_SCORE: u32 = 25_000;
