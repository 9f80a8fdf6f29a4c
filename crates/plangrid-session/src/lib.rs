#![forbid(unsafe_code)]

//! Drag sessions and recipe-group moves.
//!
//! # Role in plangrid
//! `plangrid-session` is the orchestration layer. [`DragController`] runs the
//! per-gesture state machine on top of the pointer sampler and momentum
//! projector from `plangrid-core` and the zone registry from
//! `plangrid-zones`. When a drop settles it expands the dragged entry into
//! its [`MoveSet`] and hands one [`MoveIntent`] per member to the
//! [`PlanStore`].
//!
//! # Quick start
//!
//! ```rust,ignore
//! let mut drag = DragController::new(DragConfig::default());
//! drag.begin_drag(&entry, item_rect, &PointerEvent::down(120.0, 200.0, t0))?;
//! drag.handle(&PointerEvent::moved(140.0, 205.0, t0 + 100.0), &zones);
//! drag.handle(&PointerEvent::up(300.0, 210.0, t0 + 116.0), &zones);
//! // every animation frame:
//! for event in drag.tick(frame_dt, &mut store) { /* drive visuals */ }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod group;
pub mod model;
pub mod store;

pub use config::{ConfigError, DragConfig, SettlePolicy};
pub use controller::{DragController, DragSnapshot, SessionId, SessionState};
pub use error::SessionError;
pub use event::{CancelReason, DragEvent};
pub use group::{DisplayItem, DisplayKey, MoveSet, commit, display_items, resolve_move_set};
pub use model::{EntryId, FoodRef, MoveIntent, OwnerRef, PlanEntry, PlanItem, RecipeRef};
pub use store::{MemoryStore, PlanStore};
