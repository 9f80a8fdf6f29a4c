#![forbid(unsafe_code)]

//! Drop zones: identity, registry, and nearest-zone hit testing.
//!
//! The rendering layer registers every candidate drop surface under its
//! [`ViewVariant`] and [`ZoneKey`] together with its live viewport rectangle.
//! The drag controller then asks [`find_nearest`] which zone a (projected)
//! point resolves to, scoped to the active variant.

pub mod key;
pub mod registry;

pub use hit_test::{ZoneHit, find_containing, find_nearest};
pub use key::{MealSlot, ParseMealSlotError, ViewVariant, ZoneKey};
pub use registry::{DropZone, ZoneRegistry};
