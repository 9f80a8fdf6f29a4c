#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and motion primitives.
//!
//! # Role in plangrid
//! `plangrid-core` is the input layer of the placement engine. It owns the
//! coordinate types shared by every other crate, the pointer sampler that
//! turns a stream of timestamped positions into a velocity estimate, the
//! momentum projector that extrapolates a "thrown" release point, and the
//! spring-driven settle motion that plays once a drop is resolved.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Point`] and [`geometry::Rect`] in floating-point
//!   page/viewport units.
//! - **PointerEvent**: canonical pointer input (down, move, up, cancel) with
//!   the scroll offset needed for page → viewport conversion.
//! - **PointerSampler**: two-sample instantaneous velocity, NaN-free.
//! - **MomentumProjector**: clamped velocity extrapolation.
//! - **Animation**: springs and the [`animation::SettleMotion`] pose tween.
//!
//! # How it fits in the system
//! `plangrid-zones` stores zone rectangles using [`geometry::Rect`] and
//! answers nearest-zone queries for a [`geometry::Point`]. `plangrid-session`
//! drives the sampler, projector, and settle motion from its drag state
//! machine.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod momentum;
pub mod sampler;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
