#![forbid(unsafe_code)]

//! Time-based motion for drop feedback.
//!
//! Animations are advanced explicitly with [`Animation::tick`]; nothing here
//! owns a clock or a thread. The session controller ticks the motion of each
//! finishing drag and treats [`Animation::is_complete`] as the signal to run
//! that session's continuation.

pub mod settle;
pub mod spring;

use std::time::Duration;

pub use settle::{Pose, SettleConfig, SettleMotion};
pub use spring::Spring;

/// A value that evolves over time toward completion.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has finished.
    fn is_complete(&self) -> bool;

    /// Normalized progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}
