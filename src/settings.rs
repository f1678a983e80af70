//! Session configuration
//!
//! Injected by the host when a session is constructed. `Default` is the
//! reference scenario; hosts may pass a JSON object with any subset of
//! fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunables for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    // === Entities ===
    /// Number of pooled projectiles
    pub pool_capacity: usize,
    /// Maximum concurrent enemies
    pub max_targets: usize,

    // === Spawning ===
    /// Spawn check cadence (ms)
    pub spawn_period_ms: f32,
    /// Bernoulli probability per check
    pub spawn_probability: f32,
    /// Row enemies enter at
    pub spawn_y: f32,
    /// Fraction of playfield width spawn columns are drawn from
    pub spawn_width_fraction: f32,

    // === Motion ===
    pub projectile_speed: f32,
    pub projectile_retire_y: f32,
    pub enemy_speed: f32,
    pub accel_divisor: f32,

    // === Scoring ===
    pub escape_penalty: u32,
    pub ship_penalty: u32,

    // === Layout ===
    pub ship_scale: f32,
    pub projectile_scale: f32,
    pub enemy_scale: f32,
    pub ship_start_inset: f32,
    pub score_label_x: f32,
    pub score_label_inset: f32,

    /// RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pool_capacity: POOL_CAPACITY,
            max_targets: MAX_TARGETS,

            spawn_period_ms: SPAWN_PERIOD_MS,
            spawn_probability: SPAWN_PROBABILITY,
            spawn_y: SPAWN_Y,
            spawn_width_fraction: SPAWN_WIDTH_FRACTION,

            projectile_speed: PROJECTILE_SPEED,
            projectile_retire_y: PROJECTILE_RETIRE_Y,
            enemy_speed: ENEMY_SPEED,
            accel_divisor: ACCEL_DIVISOR,

            escape_penalty: ESCAPE_PENALTY,
            ship_penalty: SHIP_PENALTY,

            ship_scale: SHIP_SCALE,
            projectile_scale: PROJECTILE_SCALE,
            enemy_scale: ENEMY_SCALE,
            ship_start_inset: SHIP_START_INSET,
            score_label_x: SCORE_LABEL_X,
            score_label_inset: SCORE_LABEL_INSET,

            seed: None,
        }
    }
}

impl SessionConfig {
    /// Create the reference configuration with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse a host-supplied JSON object; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded session config (pool={}, max_targets={})",
            config.pool_capacity,
            config.max_targets
        );
        Ok(config.validated())
    }

    /// Clamp values into ranges the session can run with
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        self.pool_capacity = self.pool_capacity.max(1);
        self.spawn_probability = if self.spawn_probability.is_finite() {
            self.spawn_probability.clamp(0.0, 1.0)
        } else {
            defaults.spawn_probability
        };
        self.spawn_width_fraction = if self.spawn_width_fraction.is_finite() {
            self.spawn_width_fraction.clamp(0.0, 1.0)
        } else {
            defaults.spawn_width_fraction
        };
        if !(self.spawn_period_ms.is_finite() && self.spawn_period_ms > 0.0) {
            self.spawn_period_ms = defaults.spawn_period_ms;
        }
        if !self.accel_divisor.is_finite() || self.accel_divisor == 0.0 {
            self.accel_divisor = defaults.accel_divisor;
        }
        self
    }

    /// Seed to use for this session
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
