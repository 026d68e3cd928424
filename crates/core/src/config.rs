//! Tunables for the game-logic core.
//!
//! Every timing, speed and dimension the state machine uses lives here so a
//! driver can load them from a file instead of recompiling. Values are checked
//! once by [`GameConfig::validate`]; a bad configuration is a construction-time
//! error and never reaches the update loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    BASE_SPEED, CHAIN_DELAY_MS, FIELD_HEIGHT, FIELD_WIDTH, GAUGE_DROP_MS, GAUGE_MULTIPLIER,
    GAUGE_RISE_MS, GRAVITY_ANIM_MS, GRAVITY_DELAY_MS, LOCK_DELAY_MS, MAX_GAUGE_BONUS, MINO_LEN,
    MIN_MATCH_LEN, PER_MINUTE_BONUS, PREVIEW_DEPTH, SOFT_DROP_BONUS, SPAWN_DELAY_MS,
    VANISHING_HEIGHT,
};

/// Reasons a [`GameConfig`] cannot back a game.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("field must be at least {min} columns wide, got {got}")]
    FieldTooNarrow { min: usize, got: usize },
    #[error("field must be at least {min} rows tall, got {got}")]
    FieldTooShort { min: usize, got: usize },
    #[error("vanishing zone must hold a spawning piece ({min} rows), got {got}")]
    VanishingZoneTooShort { min: usize, got: usize },
    #[error("preview queue depth must be at least 1")]
    EmptyPreview,
    #[error("minimum match length must be at least 2, got {0}")]
    MatchLengthTooShort(usize),
    #[error("`{name}` must be a finite, non-negative number, got {value}")]
    InvalidValue { name: &'static str, value: f64 },
}

/// Complete set of game tunables.
///
/// Missing fields fall back to the defaults in [`crate::types`] when
/// deserializing, so a config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: usize,
    pub field_height: usize,
    pub vanishing_height: usize,
    pub preview_depth: usize,
    pub min_match_len: usize,

    /// Blocks per second with an empty gauge at time zero.
    pub base_speed: f64,
    pub soft_drop_bonus: f64,
    pub max_gauge_bonus: f64,
    pub per_minute_bonus: f64,

    pub spawn_delay_ms: f64,
    pub lock_delay_ms: f64,
    pub chain_delay_ms: f64,
    pub gravity_delay_ms: f64,
    pub gravity_anim_ms: f64,
    pub gauge_rise_ms: f64,
    pub gauge_drop_ms: f64,

    /// Gauge gain per matched cell per combo step.
    pub gauge_multiplier: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH as usize,
            field_height: FIELD_HEIGHT as usize,
            vanishing_height: VANISHING_HEIGHT as usize,
            preview_depth: PREVIEW_DEPTH,
            min_match_len: MIN_MATCH_LEN,
            base_speed: BASE_SPEED,
            soft_drop_bonus: SOFT_DROP_BONUS,
            max_gauge_bonus: MAX_GAUGE_BONUS,
            per_minute_bonus: PER_MINUTE_BONUS,
            spawn_delay_ms: SPAWN_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            chain_delay_ms: CHAIN_DELAY_MS,
            gravity_delay_ms: GRAVITY_DELAY_MS,
            gravity_anim_ms: GRAVITY_ANIM_MS,
            gauge_rise_ms: GAUGE_RISE_MS,
            gauge_drop_ms: GAUGE_DROP_MS,
            gauge_multiplier: GAUGE_MULTIPLIER,
        }
    }
}

impl GameConfig {
    /// Check that the configuration can back a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width < 1 {
            return Err(ConfigError::FieldTooNarrow {
                min: 1,
                got: self.field_width,
            });
        }
        if self.field_height < MINO_LEN {
            return Err(ConfigError::FieldTooShort {
                min: MINO_LEN,
                got: self.field_height,
            });
        }
        // A piece spawns with its bottom cell on row 0; the two cells above it
        // must have storage.
        if self.vanishing_height < MINO_LEN - 1 {
            return Err(ConfigError::VanishingZoneTooShort {
                min: MINO_LEN - 1,
                got: self.vanishing_height,
            });
        }
        if self.preview_depth == 0 {
            return Err(ConfigError::EmptyPreview);
        }
        if self.min_match_len < 2 {
            return Err(ConfigError::MatchLengthTooShort(self.min_match_len));
        }

        let values = [
            ("base_speed", self.base_speed),
            ("soft_drop_bonus", self.soft_drop_bonus),
            ("max_gauge_bonus", self.max_gauge_bonus),
            ("per_minute_bonus", self.per_minute_bonus),
            ("spawn_delay_ms", self.spawn_delay_ms),
            ("lock_delay_ms", self.lock_delay_ms),
            ("chain_delay_ms", self.chain_delay_ms),
            ("gravity_delay_ms", self.gravity_delay_ms),
            ("gravity_anim_ms", self.gravity_anim_ms),
            ("gauge_rise_ms", self.gauge_rise_ms),
            ("gauge_drop_ms", self.gauge_drop_ms),
            ("gauge_multiplier", self.gauge_multiplier),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }

        Ok(())
    }

    /// Column a new piece spawns in.
    pub fn spawn_column(&self) -> i32 {
        (self.field_width / 2) as i32
    }
}
