//! Slide Shooter - an arcade mini-scene for presentation slides
//!
//! Core modules:
//! - `sim`: Gameplay logic (entity lifecycle, spawning, collisions, scoring, input mapping)
//! - `settings`: Injected session configuration
//! - `platform`: Host wiring (headless world, browser facade)

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::SessionConfig;
pub use sim::{GameSession, SessionSnapshot};

/// Game configuration constants (reference scenario)
pub mod consts {
    /// Number of pooled projectiles
    pub const POOL_CAPACITY: usize = 5;
    /// Maximum concurrent enemies on the playfield
    pub const MAX_TARGETS: usize = 4;
    /// Spawn check cadence in milliseconds
    pub const SPAWN_PERIOD_MS: f32 = 1000.0;
    /// Probability that a spawn check below capacity spawns an enemy
    pub const SPAWN_PROBABILITY: f32 = 0.75;
    /// Enemies enter at this row
    pub const SPAWN_Y: f32 = 100.0;
    /// Spawn column is drawn from [0, width * fraction)
    pub const SPAWN_WIDTH_FRACTION: f32 = 0.8;

    /// Projectile upward speed (pixels/s)
    pub const PROJECTILE_SPEED: f32 = 300.0;
    /// Projectiles retire once their center is at or above this row
    /// (sprite half-height past the top edge)
    pub const PROJECTILE_RETIRE_Y: f32 = -32.0;
    /// Enemy downward speed (pixels/s)
    pub const ENEMY_SPEED: f32 = 150.0;

    /// Accelerometer reading is divided by this to get ship velocity
    pub const ACCEL_DIVISOR: f32 = 2.0;

    /// Score awarded per projectile hit
    pub const HIT_SCORE: u32 = 1;
    /// Bugs charged when an enemy leaves the bottom of the playfield
    pub const ESCAPE_PENALTY: u32 = 1;
    /// Bugs charged when an enemy reaches the ship
    pub const SHIP_PENALTY: u32 = 5;

    /// Sprite scale factors
    pub const SHIP_SCALE: f32 = 4.0;
    pub const PROJECTILE_SCALE: f32 = 4.0;
    pub const ENEMY_SCALE: f32 = 2.0;

    /// Ship starts this far above the bottom edge, horizontally centered
    pub const SHIP_START_INSET: f32 = 200.0;
    /// Score label anchor (x, inset from bottom)
    pub const SCORE_LABEL_X: f32 = 20.0;
    pub const SCORE_LABEL_INSET: f32 = 120.0;
}
