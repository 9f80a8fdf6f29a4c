#![forbid(unsafe_code)]

//! Damped spring for a single scalar channel of the drop pose.
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! Integration is semi-implicit Euler with steps capped at 4ms, so a long
//! frame (a stalled tab, a debugger pause) subdivides instead of exploding.
//!
//! # Invariants
//!
//! 1. Stiffness is at least 0.1; damping is non-negative.
//! 2. A spring at rest stays at rest until [`Spring::impulse`] or
//!    [`Animation::reset`] wakes it.
//! 3. Coming to rest snaps the position exactly onto the target.

use std::time::Duration;

use super::Animation;

const MAX_STEP_SECS: f64 = 0.004;
const DEFAULT_REST_THRESHOLD: f64 = 0.01;
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.05;
const MIN_STIFFNESS: f64 = 0.1;

/// A damped harmonic oscillator moving one value toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    ///
    /// Defaults: stiffness 300, damping 30 (slightly underdamped).
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        let at_rest = (initial - target).abs() < DEFAULT_REST_THRESHOLD;
        Self {
            position: if at_rest { target } else { initial },
            velocity: 0.0,
            target,
            initial,
            stiffness: 300.0,
            damping: 30.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest,
        }
    }

    /// Set stiffness (builder pattern). Clamped to a minimum of 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = if k.is_finite() { k.max(MIN_STIFFNESS) } else { MIN_STIFFNESS };
        self
    }

    /// Set damping (builder pattern). Clamped to a minimum of 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = if c.is_finite() { c.max(0.0) } else { 0.0 };
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Add to velocity, carrying release momentum into the motion. Wakes the spring.
    pub fn impulse(&mut self, velocity_delta: f64) {
        if velocity_delta.is_finite() && velocity_delta != 0.0 {
            self.velocity += velocity_delta;
            self.at_rest = false;
        }
    }

    /// Jump straight to the target and stop.
    pub fn finish(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.finish();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Fraction of the initial distance already covered, clamped to [0, 1].
    fn value(&self) -> f32 {
        let span = self.target - self.initial;
        if span.abs() < f64::EPSILON {
            return 1.0;
        }
        (((self.position - self.initial) / span) as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = (self.initial - self.target).abs() < self.rest_threshold;
    }
}
