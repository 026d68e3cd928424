//! Short-lived animators polled once per frame.
//!
//! Both animators are plain values: they hold progress, advance by elapsed
//! milliseconds and report completion. Nothing here touches the field; the
//! state machine decides what to do once an animation finishes.

use keyframe::functions::EaseOut;
use keyframe::EasingFunction;

use crate::field::Block;

/// Bounce-out easing: overshoots into the floor and settles with decaying hops.
#[derive(Debug, Clone, Copy, Default)]
pub struct BounceOut;

impl EasingFunction for BounceOut {
    fn y(&self, x: f64) -> f64 {
        const N1: f64 = 7.5625;
        const D1: f64 = 2.75;

        if x < 1.0 / D1 {
            N1 * x * x
        } else if x < 2.0 / D1 {
            let x = x - 1.5 / D1;
            N1 * x * x + 0.75
        } else if x < 2.5 / D1 {
            let x = x - 2.25 / D1;
            N1 * x * x + 0.9375
        } else {
            let x = x - 2.625 / D1;
            N1 * x * x + 0.984375
        }
    }
}

/// Normalized progress in `[0, 1]`; zero-length animations are complete at once.
fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        1.0
    } else {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    }
}

/// A block detached from the field while it falls to its resting row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatingBlock {
    pub block: Block,
    pub x: i32,
    pub start_y: i32,
    pub end_y: i32,
    elapsed_ms: f64,
    duration_ms: f64,
    visual_y: f32,
}

impl AnimatingBlock {
    pub fn new(block: Block, x: i32, start_y: i32, end_y: i32, duration_ms: f64) -> Self {
        Self {
            block,
            x,
            start_y,
            end_y,
            elapsed_ms: 0.0,
            duration_ms,
            visual_y: start_y as f32,
        }
    }

    /// Advance by `dt_ms`; returns true once the block has landed.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms;
        let t = progress(self.elapsed_ms, self.duration_ms);
        if t >= 1.0 {
            self.visual_y = self.end_y as f32;
            return true;
        }

        let eased = BounceOut.y(t);
        let span = (self.end_y - self.start_y) as f64;
        self.visual_y = (self.start_y as f64 + span * eased) as f32;
        false
    }

    pub fn visual_y(&self) -> f32 {
        self.visual_y
    }

    pub fn progress(&self) -> f64 {
        progress(self.elapsed_ms, self.duration_ms)
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// One eased move of a scalar from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    elapsed_ms: f64,
    duration_ms: f64,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0.0,
            duration_ms,
        }
    }

    /// Advance by `dt_ms` and return the milliseconds left over past the end.
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        self.elapsed_ms += dt_ms;
        if self.duration_ms <= 0.0 {
            return self.elapsed_ms;
        }
        (self.elapsed_ms - self.duration_ms).max(0.0)
    }

    pub fn value(&self) -> f64 {
        let t = progress(self.elapsed_ms, self.duration_ms);
        if t >= 1.0 {
            return self.to;
        }
        if t <= 0.0 {
            return self.from;
        }
        self.from + (self.to - self.from) * EaseOut.y(t)
    }

    pub fn is_complete(&self) -> bool {
        progress(self.elapsed_ms, self.duration_ms) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockType;

    #[test]
    fn bounce_out_endpoints() {
        assert!((BounceOut.y(0.0)).abs() < 1e-9);
        assert!((BounceOut.y(1.0) - 1.0).abs() < 1e-9);
        for i in 0..=100 {
            let y = BounceOut.y(i as f64 / 100.0);
            assert!((0.0..=1.0 + 1e-9).contains(&y), "y({}) = {}", i, y);
        }
    }

    #[test]
    fn animating_block_lands_at_end_row() {
        let mut anim = AnimatingBlock::new(Block::new(BlockType::Red), 2, 3, 7, 500.0);
        assert_eq!(anim.visual_y(), 3.0);

        assert!(!anim.advance(250.0));
        assert!(anim.visual_y() > 3.0 && anim.visual_y() <= 7.0);
        assert!(!anim.is_complete());

        assert!(anim.advance(250.0));
        assert_eq!(anim.visual_y(), 7.0);
        assert!(anim.is_complete());
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut anim = AnimatingBlock::new(Block::new(BlockType::Red), 0, 0, 1, 0.0);
        assert!(anim.advance(0.0));
    }

    #[test]
    fn tween_reports_overflow() {
        let mut tween = Tween::new(0.0, 100.0, 200.0);
        assert_eq!(tween.advance(150.0), 0.0);
        assert!(tween.value() > 0.0 && tween.value() < 100.0);
        assert_eq!(tween.advance(100.0), 50.0);
        assert_eq!(tween.value(), 100.0);
        assert!(tween.is_complete());
    }
}
