#![forbid(unsafe_code)]

//! Zone identity: meal slots, view variants, and `(date, slot)` keys.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// A meal slot within a planner day.
///
/// The set is closed. Declaration order matches the usual display order, but
/// the engine never relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack1,
    Snack2,
    TryBite,
}

impl MealSlot {
    /// Every slot, in display order.
    pub const ALL: [MealSlot; 6] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack1,
        MealSlot::Snack2,
        MealSlot::TryBite,
    ];

    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack1 => "snack-1",
            Self::Snack2 => "snack-2",
            Self::TryBite => "try-bite",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to parse a [`MealSlot`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMealSlotError {
    pub input: String,
}

impl fmt::Display for ParseMealSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown meal slot: {:?}", self.input)
    }
}

impl std::error::Error for ParseMealSlotError {}

impl FromStr for MealSlot {
    type Err = ParseMealSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseMealSlotError {
                input: s.to_string(),
            })
    }
}

/// One of the two mutually exclusive planner layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewVariant {
    /// Multi-day matrix.
    #[default]
    Desktop,
    /// Single-day view.
    Mobile,
}

impl ViewVariant {
    /// The other variant.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Desktop => Self::Mobile,
            Self::Mobile => Self::Desktop,
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for ViewVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `(date, slot)` identity of a drop zone within one view variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneKey {
    pub date: NaiveDate,
    pub slot: MealSlot,
}

impl ZoneKey {
    /// Create a new key.
    #[must_use]
    pub const fn new(date: NaiveDate, slot: MealSlot) -> Self {
        Self { date, slot }
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.date.format("%Y-%m-%d"), self.slot)
    }
}
