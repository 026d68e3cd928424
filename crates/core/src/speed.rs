//! Fall speed model
//!
//! Speed is additive in blocks per second:
//!
//! | Term | Value |
//! |------|-------|
//! | base | `base_speed` |
//! | gauge | `gauge / 100 * max_gauge_bonus` |
//! | time | `minutes elapsed * per_minute_bonus` |
//! | soft drop | `soft_drop_bonus` while held, else 0 |
//!
//! The interval is the reciprocal in milliseconds per row.

use crate::config::GameConfig;
use crate::types::GAUGE_MAX;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Instantaneous fall speed in blocks per second.
pub fn fall_speed(config: &GameConfig, gauge: f64, elapsed_ms: f64, soft_drop: bool) -> f64 {
    let gauge_bonus = gauge / GAUGE_MAX * config.max_gauge_bonus;
    let time_bonus = elapsed_ms / MS_PER_MINUTE * config.per_minute_bonus;
    let drop_bonus = if soft_drop { config.soft_drop_bonus } else { 0.0 };
    config.base_speed + gauge_bonus + time_bonus + drop_bonus
}

/// Milliseconds per row for a given speed; infinite when the piece cannot fall.
pub fn fall_interval_ms(speed: f64) -> f64 {
    if speed > 0.0 {
        1000.0 / speed
    } else {
        f64::INFINITY
    }
}
