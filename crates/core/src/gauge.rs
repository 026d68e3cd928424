//! Combo gauge: a logical meter plus the queue of tweens that display it.
//!
//! The logical value lives in `[0, 100)` and only rises; reaching 100 wraps it
//! back toward zero keeping the remainder. The visual value never snaps: a
//! wrap is queued as "rise to 100, drop to 0, rise to the remainder".

use std::collections::VecDeque;

use crate::anim::Tween;
use crate::types::GAUGE_MAX;

#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    value: f64,
    visual: f64,
    segments: VecDeque<Tween>,
    rise_ms: f64,
    drop_ms: f64,
}

impl Gauge {
    pub fn new(rise_ms: f64, drop_ms: f64) -> Self {
        Self {
            value: 0.0,
            visual: 0.0,
            segments: VecDeque::new(),
            rise_ms,
            drop_ms,
        }
    }

    /// Logical value in `[0, 100)`.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Displayed value in `[0, 100]`.
    pub fn visual_value(&self) -> f64 {
        self.visual
    }

    pub fn is_animating(&self) -> bool {
        !self.segments.is_empty()
    }

    /// End points of the queued segments, oldest first.
    pub fn pending_segments(&self) -> Vec<(f64, f64)> {
        self.segments.iter().map(|s| (s.from, s.to)).collect()
    }

    /// Raise the gauge by `amount`, wrapping at 100.
    ///
    /// Returns how many times the gauge wrapped.
    pub fn add(&mut self, amount: f64) -> u32 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0;
        }

        let mut cursor = self.value;
        let mut target = self.value + amount;
        let mut wraps = 0;

        while target >= GAUGE_MAX {
            self.segments
                .push_back(Tween::new(cursor, GAUGE_MAX, self.rise_ms));
            self.segments.push_back(Tween::new(GAUGE_MAX, 0.0, self.drop_ms));
            target -= GAUGE_MAX;
            cursor = 0.0;
            wraps += 1;
        }
        if target > cursor {
            self.segments
                .push_back(Tween::new(cursor, target, self.rise_ms));
        }

        self.value = target;
        wraps
    }

    /// Advance the display by `dt_ms`, spilling leftover time into later segments.
    pub fn advance(&mut self, dt_ms: f64) {
        let mut dt = dt_ms;
        while let Some(segment) = self.segments.front_mut() {
            let leftover = segment.advance(dt);
            self.visual = segment.value();
            if !segment.is_complete() {
                return;
            }
            self.segments.pop_front();
            dt = leftover;
        }
        self.visual = self.value;
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
        self.visual = 0.0;
        self.segments.clear();
    }
}
