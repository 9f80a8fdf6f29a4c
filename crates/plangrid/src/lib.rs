#![forbid(unsafe_code)]

//! plangrid public facade crate.
//!
//! Re-exports the stable surface of the engine crates and offers a prelude
//! for hosts wiring a planner grid:
//!
//! ```rust,ignore
//! use plangrid::prelude::*;
//!
//! let mut zones = ZoneRegistry::new();
//! zones.register(ViewVariant::Desktop, ZoneKey::new(day, MealSlot::Lunch), cell_rect);
//! let mut drag = DragController::default();
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use plangrid_core::animation::{Pose, SettleConfig};
pub use plangrid_core::event::{PointerEvent, PointerEventKind};
pub use plangrid_core::geometry::{Point, Rect};
pub use plangrid_core::momentum::MomentumProjector;
pub use plangrid_core::sampler::{PointerSampler, Velocity};

// --- Zone re-exports -------------------------------------------------------

pub use plangrid_zones::{
    DropZone, MealSlot, ParseMealSlotError, ViewVariant, ZoneHit, ZoneKey, ZoneRegistry,
    find_containing, find_nearest,
};

// --- Session re-exports ----------------------------------------------------

pub use plangrid_session::{
    CancelReason, ConfigError, DisplayItem, DisplayKey, DragConfig, DragController, DragEvent,
    DragSnapshot, EntryId, FoodRef, MemoryStore, MoveIntent, MoveSet, OwnerRef, PlanEntry,
    PlanItem, PlanStore, RecipeRef, SessionError, SessionId, SessionState, SettlePolicy,
    display_items, resolve_move_set,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for plangrid hosts.
#[derive(Debug)]
pub enum Error {
    /// A drag could not start.
    Session(SessionError),
    /// Configuration failed to load or validate.
    Config(ConfigError),
    /// A meal slot name did not parse.
    Slot(ParseMealSlotError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Slot(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Slot(err) => Some(err),
        }
    }
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ParseMealSlotError> for Error {
    fn from(err: ParseMealSlotError) -> Self {
        Self::Slot(err)
    }
}

/// Standard result type for plangrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Initialize JSON structured logging (see `plangrid_core::logging`).
#[cfg(feature = "tracing-json")]
pub use plangrid_core::logging::init_json_logging;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DragConfig, DragController, DragEvent, EntryId, Error, MealSlot, MemoryStore, MoveIntent,
        PlanEntry, PlanStore, Point, PointerEvent, Rect, Result, SessionId, SessionState,
        ViewVariant, ZoneKey, ZoneRegistry,
    };

    pub use crate::{core, session, zones};
}

pub use plangrid_core as core;
pub use plangrid_session as session;
pub use plangrid_zones as zones;
