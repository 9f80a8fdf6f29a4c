#![forbid(unsafe_code)]

//! Pointer sampling and instantaneous velocity.
//!
//! [`PointerSampler`] keeps the two most recent timestamped pointer positions
//! of a drag and derives velocity from their delta alone. There is no
//! smoothing window: the last delta is the estimate, which keeps a flick
//! responsive at the end of a gesture.
//!
//! # Invariants
//!
//! 1. The returned velocity is always finite.
//! 2. Fewer than two samples yields [`Velocity::ZERO`].
//! 3. A sample whose timestamp does not advance (`dt <= 0`) yields
//!    [`Velocity::ZERO`] for that step.
//! 4. `dt` is floored at the configured epsilon before dividing.
//!
//! # Failure Modes
//!
//! - Non-finite coordinates or timestamp: the sample is dropped, the stored
//!   samples are left untouched, and the velocity estimate becomes zero.
//! - Duplicate or out-of-order timestamps: the sample is stored (the position
//!   is still the freshest known) but the velocity step is zero.

use crate::geometry::Point;

#[cfg(feature = "tracing")]
use crate::logging::trace;
#[cfg(not(feature = "tracing"))]
use crate::trace;

/// Default lower bound on the sample interval, in milliseconds.
pub const DEFAULT_MIN_DT_MS: f64 = 1.0;

/// A timestamped pointer position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub point: Point,
    pub timestamp_ms: f64,
}

impl PointerSample {
    /// Create a new sample.
    #[must_use]
    pub const fn new(point: Point, timestamp_ms: f64) -> Self {
        Self {
            point,
            timestamp_ms,
        }
    }

    fn is_finite(&self) -> bool {
        self.point.is_finite() && self.timestamp_ms.is_finite()
    }
}

/// Velocity in units per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    /// No motion.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new velocity.
    #[must_use]
    pub const fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }

    /// Clamp each axis independently to `[-max, max]`.
    ///
    /// Non-finite components collapse to zero. A NaN bound clamps to zero.
    #[must_use]
    pub fn clamp_axes(self, max: f64) -> Self {
        let max = if max.is_nan() { 0.0 } else { max.abs() };
        let clamp = |v: f64| if v.is_finite() { v.clamp(-max, max) } else { 0.0 };
        Self::new(clamp(self.vx), clamp(self.vy))
    }
}

/// Two-sample pointer sampler for a single drag session.
#[derive(Debug, Clone)]
pub struct PointerSampler {
    previous: Option<PointerSample>,
    current: Option<PointerSample>,
    velocity: Velocity,
    min_dt_ms: f64,
    recorded: usize,
}

impl Default for PointerSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerSampler {
    /// Create an empty sampler with the default epsilon.
    #[must_use]
    pub fn new() -> Self {
        Self::with_min_dt_ms(DEFAULT_MIN_DT_MS)
    }

    /// Create an empty sampler with a custom `dt` floor (milliseconds).
    ///
    /// Non-finite or non-positive floors fall back to the default.
    #[must_use]
    pub fn with_min_dt_ms(min_dt_ms: f64) -> Self {
        let min_dt_ms = if min_dt_ms.is_finite() && min_dt_ms > 0.0 {
            min_dt_ms
        } else {
            DEFAULT_MIN_DT_MS
        };
        Self {
            previous: None,
            current: None,
            velocity: Velocity::ZERO,
            min_dt_ms,
            recorded: 0,
        }
    }

    /// Clear all samples and record `point` as the first sample.
    pub fn seed(&mut self, point: Point, timestamp_ms: f64) {
        self.reset();
        self.record(point, timestamp_ms);
    }

    /// Append a sample, returning the instantaneous velocity estimate.
    pub fn record(&mut self, point: Point, timestamp_ms: f64) -> Velocity {
        let sample = PointerSample::new(point, timestamp_ms);
        if !sample.is_finite() {
            trace!(
                x = point.x,
                y = point.y,
                timestamp_ms,
                "dropping non-finite pointer sample"
            );
            self.velocity = Velocity::ZERO;
            return self.velocity;
        }

        self.previous = self.current.replace(sample);
        self.recorded = self.recorded.saturating_add(1);
        self.velocity = match self.previous {
            Some(prev) => Self::estimate(prev, sample, self.min_dt_ms),
            None => Velocity::ZERO,
        };
        self.velocity
    }

    fn estimate(prev: PointerSample, cur: PointerSample, min_dt_ms: f64) -> Velocity {
        let dt_ms = cur.timestamp_ms - prev.timestamp_ms;
        if dt_ms.is_nan() || dt_ms <= 0.0 {
            return Velocity::ZERO;
        }
        let dt_secs = dt_ms.max(min_dt_ms) / 1000.0;
        let v = Velocity::new(
            (cur.point.x - prev.point.x) / dt_secs,
            (cur.point.y - prev.point.y) / dt_secs,
        );
        if v.vx.is_finite() && v.vy.is_finite() {
            v
        } else {
            Velocity::ZERO
        }
    }

    /// The last velocity estimate.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// The most recent accepted position.
    #[inline]
    #[must_use]
    pub fn last_point(&self) -> Option<Point> {
        self.current.map(|s| s.point)
    }

    /// Number of samples held (0, 1, or 2).
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.previous.is_some()) + usize::from(self.current.is_some())
    }

    /// Whether no sample has been accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Total accepted samples since the last reset.
    #[must_use]
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Drop all samples and zero the estimate.
    pub fn reset(&mut self) {
        self.previous = None;
        self.current = None;
        self.velocity = Velocity::ZERO;
        self.recorded = 0;
    }
}
