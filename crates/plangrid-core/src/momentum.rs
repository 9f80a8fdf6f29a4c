#![forbid(unsafe_code)]

//! Momentum projection: resolving "thrown" drops.
//!
//! Given the release position and the sampler's last velocity estimate, the
//! projector extrapolates where the item would travel if it kept moving for a
//! short time:
//!
//!   projected = release + clamp(velocity, ±max_axis_velocity) × factor
//!
//! The default factor (0.05) keeps a deliberate slow placement within a few
//! pixels of the release point while letting a fast flick reach the adjacent
//! zone. The per-axis clamp (±1000 units/s) bounds the displacement on any
//! axis to `max_axis_velocity × factor`, so a single spiky pointer event
//! cannot fling the item across the grid.

use crate::geometry::Point;
use crate::sampler::Velocity;

/// Default scaling from velocity (units/s) to displacement (units).
pub const DEFAULT_MOMENTUM_FACTOR: f64 = 0.05;

/// Default per-axis velocity clamp in units/s.
pub const DEFAULT_MAX_AXIS_VELOCITY: f64 = 1000.0;

/// Extrapolates a release point along the last observed velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumProjector {
    factor: f64,
    max_axis_velocity: f64,
}

impl Default for MomentumProjector {
    fn default() -> Self {
        Self {
            factor: DEFAULT_MOMENTUM_FACTOR,
            max_axis_velocity: DEFAULT_MAX_AXIS_VELOCITY,
        }
    }
}

impl MomentumProjector {
    /// Create a projector with the default clamp and the given factor.
    ///
    /// A negative or non-finite factor falls back to the default.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        Self::default().with_factor(factor)
    }

    /// Set the momentum factor (builder pattern).
    #[must_use]
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = if factor.is_finite() && factor >= 0.0 {
            factor
        } else {
            DEFAULT_MOMENTUM_FACTOR
        };
        self
    }

    /// Set the per-axis velocity clamp (builder pattern).
    ///
    /// A negative or non-finite clamp falls back to the default.
    #[must_use]
    pub fn with_max_axis_velocity(mut self, max: f64) -> Self {
        self.max_axis_velocity = if max.is_finite() && max >= 0.0 {
            max
        } else {
            DEFAULT_MAX_AXIS_VELOCITY
        };
        self
    }

    /// Momentum factor.
    #[inline]
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Per-axis velocity clamp.
    #[inline]
    #[must_use]
    pub fn max_axis_velocity(&self) -> f64 {
        self.max_axis_velocity
    }

    /// Largest displacement the projector can add on a single axis.
    #[must_use]
    pub fn max_displacement(&self) -> f64 {
        self.max_axis_velocity * self.factor
    }

    /// The displacement added to the release point for `velocity`.
    #[must_use]
    pub fn displacement(&self, velocity: Velocity) -> Point {
        let v = velocity.clamp_axes(self.max_axis_velocity);
        Point::new(v.vx * self.factor, v.vy * self.factor)
    }

    /// Project `last_point` forward along `velocity`.
    #[must_use]
    pub fn project(&self, last_point: Point, velocity: Velocity) -> Point {
        last_point + self.displacement(velocity)
    }
}

/// Project with the default clamp and an explicit factor.
#[must_use]
pub fn project(last_point: Point, velocity: Velocity, momentum_factor: f64) -> Point {
    MomentumProjector::new(momentum_factor).project(last_point, velocity)
}
