#![forbid(unsafe_code)]

//! Canonical pointer input for drag gestures.
//!
//! Rendering layers translate their native input (mouse, touch, pen) into
//! [`PointerEvent`] values. Every event carries the page-space position, a
//! millisecond timestamp from a monotonic clock, and the scroll offset that
//! was current when the event fired.

use crate::geometry::Point;

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer pressed over a draggable item.
    Down,
    /// Pointer moved while captured.
    Move,
    /// Pointer released.
    Up,
    /// Pointer capture was lost (device disconnect, system gesture, focus
    /// loss). The gesture ends without a drop.
    Cancel,
}

/// A single pointer event in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Position in page space (includes the scroll offset).
    pub point: Point,
    /// Monotonic timestamp in milliseconds.
    pub timestamp_ms: f64,
    /// Scroll offset at the time of the event.
    pub scroll: Point,
}

impl PointerEvent {
    /// Create an event with zero scroll offset.
    #[must_use]
    pub const fn new(kind: PointerEventKind, point: Point, timestamp_ms: f64) -> Self {
        Self {
            kind,
            point,
            timestamp_ms,
            scroll: Point::ORIGIN,
        }
    }

    /// Pointer-down shorthand.
    #[must_use]
    pub const fn down(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), timestamp_ms)
    }

    /// Pointer-move shorthand.
    #[must_use]
    pub const fn moved(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), timestamp_ms)
    }

    /// Pointer-up shorthand.
    #[must_use]
    pub const fn up(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), timestamp_ms)
    }

    /// Attach the scroll offset current at the time of the event (builder pattern).
    #[must_use]
    pub const fn with_scroll(mut self, scroll: Point) -> Self {
        self.scroll = scroll;
        self
    }

    /// The event position converted to viewport space.
    #[inline]
    #[must_use]
    pub fn viewport_point(&self) -> Point {
        self.point.to_viewport(self.scroll)
    }
}
