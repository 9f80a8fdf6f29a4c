#![forbid(unsafe_code)]

//! Drag lifecycle notifications.
//!
//! Every controller call returns the [`DragEvent`]s it produced, in order.
//! They drive visual feedback only (lift, highlight, cursor, settle). Whether
//! data moved is known solely from [`PlanStore::commit_move`] calls; the
//! `committed` count on [`DragEvent::Settled`] mirrors them for diagnostics.
//!
//! [`PlanStore::commit_move`]: crate::store::PlanStore::commit_move
//!
//! # Invariants
//! 1. Per session: `DragStart` → zero or more `Highlight` → `DragEnd` →
//!    (`Resolved` → `Settled`) or (`CancelStarted` → `Cancelled`).
//! 2. `Settled` and `Cancelled` are emitted at most once per session.

use plangrid_core::geometry::Point;
use plangrid_zones::ZoneKey;

use crate::controller::SessionId;
use crate::model::EntryId;

/// Why a session ended without a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The projected point resolved to no zone.
    NoTarget,
    /// Pointer capture was lost mid-drag.
    CaptureLost,
    /// The host cancelled the drag (e.g. Escape).
    UserCancelled,
}

impl CancelReason {
    /// Stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoTarget => "no_target",
            Self::CaptureLost => "capture_lost",
            Self::UserCancelled => "user_cancelled",
        }
    }
}

/// A drag lifecycle notification.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    /// The item was lifted.
    DragStart {
        session: SessionId,
        entry: EntryId,
        origin: ZoneKey,
    },
    /// The zone under the raw pointer changed (`None` clears the highlight).
    Highlight {
        session: SessionId,
        zone: Option<ZoneKey>,
    },
    /// The pointer was released or lost.
    DragEnd { session: SessionId, entry: EntryId },
    /// A target was resolved; the settle motion has started.
    Resolved {
        session: SessionId,
        entry: EntryId,
        target: ZoneKey,
        /// Projected point in viewport coordinates.
        projected: Point,
        /// Target equals the entry's origin zone.
        noop: bool,
    },
    /// No target; the revert motion has started.
    CancelStarted {
        session: SessionId,
        entry: EntryId,
        reason: CancelReason,
    },
    /// Settle finished and the commit continuation ran.
    Settled {
        session: SessionId,
        entry: EntryId,
        target: ZoneKey,
        /// Number of move intents issued (0 for a no-op).
        committed: usize,
    },
    /// Revert finished; the session is gone.
    Cancelled {
        session: SessionId,
        entry: EntryId,
        reason: CancelReason,
    },
}

impl DragEvent {
    /// The session this event belongs to.
    #[must_use]
    pub fn session(&self) -> SessionId {
        match self {
            Self::DragStart { session, .. }
            | Self::Highlight { session, .. }
            | Self::DragEnd { session, .. }
            | Self::Resolved { session, .. }
            | Self::CancelStarted { session, .. }
            | Self::Settled { session, .. }
            | Self::Cancelled { session, .. } => *session,
        }
    }

    /// Whether this event tears a session down.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled { .. } | Self::Cancelled { .. })
    }
}
