#![forbid(unsafe_code)]

//! Settle motion: the dragged item returning to a neutral pose.
//!
//! When a drag ends, the item is still lifted (scaled up) and displaced from
//! where it will rest: over the resolved zone on a drop, or back over its
//! origin on a cancel. [`SettleMotion`] drives three springs (x offset, y
//! offset, scale) toward the neutral pose `{ offset: (0, 0), scale: 1 }`.
//!
//! # Invariants
//!
//! 1. The motion completes once every spring is at rest, or once
//!    `max_duration` has elapsed, whichever comes first. Completion is
//!    therefore guaranteed in bounded time regardless of spring parameters.
//! 2. A completed motion reports exactly the neutral pose.
//! 3. `is_complete()` never flips back to `false` without `reset()`.

use std::time::Duration;

use super::{Animation, Spring};
use crate::geometry::Point;
use crate::sampler::Velocity;

/// Visual pose of the dragged item relative to its resting place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Displacement from the resting rectangle.
    pub offset: Point,
    /// Scale factor (1.0 = at rest).
    pub scale: f64,
}

impl Pose {
    /// The resting pose.
    pub const NEUTRAL: Self = Self {
        offset: Point::ORIGIN,
        scale: 1.0,
    };
}

impl Default for Pose {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Spring parameters and time cap for settle motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleConfig {
    pub stiffness: f64,
    pub damping: f64,
    /// Hard cap on motion duration.
    pub max_duration: Duration,
    /// Scale applied to the item while it is lifted.
    pub lift_scale: f64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
            max_duration: Duration::from_millis(350),
            lift_scale: 1.05,
        }
    }
}

/// Spring-driven tween from a lifted, displaced pose to [`Pose::NEUTRAL`].
#[derive(Debug, Clone)]
pub struct SettleMotion {
    x: Spring,
    y: Spring,
    scale: Spring,
    elapsed: Duration,
    max_duration: Duration,
    complete: bool,
}

impl SettleMotion {
    /// Start settling from `offset` (item position minus resting position).
    #[must_use]
    pub fn new(offset: Point, config: &SettleConfig) -> Self {
        let spring = |from: f64, to: f64| {
            Spring::new(from, to)
                .with_stiffness(config.stiffness)
                .with_damping(config.damping)
        };
        let offset = if offset.is_finite() {
            offset
        } else {
            Point::ORIGIN
        };
        let lift = if config.lift_scale.is_finite() {
            config.lift_scale
        } else {
            1.0
        };
        let mut motion = Self {
            x: spring(offset.x, 0.0),
            y: spring(offset.y, 0.0),
            scale: spring(lift, 1.0),
            elapsed: Duration::ZERO,
            max_duration: config.max_duration,
            complete: false,
        };
        motion.complete = motion.springs_at_rest() || motion.max_duration.is_zero();
        if motion.complete {
            motion.finish();
        }
        motion
    }

    /// Carry release velocity into the offset springs (builder pattern).
    #[must_use]
    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        if !self.complete {
            self.x.impulse(velocity.vx);
            self.y.impulse(velocity.vy);
        }
        self
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        Pose {
            offset: Point::new(self.x.position(), self.y.position()),
            scale: self.scale.position(),
        }
    }

    /// Time advanced so far.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Jump to the neutral pose and complete.
    pub fn finish(&mut self) {
        self.x.finish();
        self.y.finish();
        self.scale.finish();
        self.complete = true;
    }

    fn springs_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest() && self.scale.is_at_rest()
    }
}

impl Animation for SettleMotion {
    fn tick(&mut self, dt: Duration) {
        if self.complete {
            return;
        }
        // Integration work is bounded by the time cap, not by the frame gap.
        let step = dt.min(self.max_duration.saturating_sub(self.elapsed));
        self.elapsed = self.elapsed.saturating_add(dt);
        self.x.tick(step);
        self.y.tick(step);
        self.scale.tick(step);
        if self.springs_at_rest() || self.elapsed >= self.max_duration {
            self.finish();
        }
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    /// Elapsed fraction of the time cap (1.0 once complete).
    fn value(&self) -> f32 {
        if self.complete || self.max_duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.max_duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.scale.reset();
        self.elapsed = Duration::ZERO;
        self.complete = self.springs_at_rest() || self.max_duration.is_zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    #[test]
    fn settles_to_neutral() {
        let mut motion = SettleMotion::new(Point::new(-40.0, 12.0), &SettleConfig::default());
        assert!(!motion.is_complete());
        assert_eq!(motion.pose().scale, 1.05);
        for _ in 0..100 {
            motion.tick(MS_16);
        }
        assert!(motion.is_complete());
        assert_eq!(motion.pose(), Pose::NEUTRAL);
    }

    #[test]
    fn time_cap_forces_completion() {
        let config = SettleConfig {
            stiffness: 0.1,
            damping: 0.0,
            max_duration: Duration::from_millis(100),
            lift_scale: 1.05,
        };
        let mut motion = SettleMotion::new(Point::new(500.0, 0.0), &config);
        motion.tick(Duration::from_millis(60));
        assert!(!motion.is_complete());
        motion.tick(Duration::from_millis(60));
        assert!(motion.is_complete());
        assert_eq!(motion.pose(), Pose::NEUTRAL);
    }

    #[test]
    fn huge_frame_gap_completes_in_one_tick() {
        let mut motion = SettleMotion::new(Point::new(-40.0, 12.0), &SettleConfig::default());
        let started = std::time::Instant::now();
        motion.tick(Duration::from_secs(24 * 3600));
        assert!(motion.is_complete());
        assert_eq!(motion.pose(), Pose::NEUTRAL);
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn already_neutral_completes_immediately() {
        let config = SettleConfig {
            lift_scale: 1.0,
            ..SettleConfig::default()
        };
        let motion = SettleMotion::new(Point::ORIGIN, &config);
        assert!(motion.is_complete());
        assert_eq!(motion.value(), 1.0);
    }

    #[test]
    fn non_finite_offset_is_neutralized() {
        let motion = SettleMotion::new(Point::new(f64::NAN, 0.0), &SettleConfig::default());
        assert_eq!(motion.pose().offset, Point::ORIGIN);
    }

    #[test]
    fn release_velocity_moves_offset() {
        let still = SettleMotion::new(Point::new(-20.0, 0.0), &SettleConfig::default());
        let thrown = still.clone().with_velocity(Velocity::new(400.0, 0.0));
        let (mut a, mut b) = (still, thrown);
        a.tick(MS_16);
        b.tick(MS_16);
        assert!(b.pose().offset.x > a.pose().offset.x);
    }
}
