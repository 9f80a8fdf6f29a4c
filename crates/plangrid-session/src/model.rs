#![forbid(unsafe_code)]

//! Plan entries as the engine sees them.
//!
//! A [`PlanEntry`] is owned by the persistence layer. The engine reads its
//! zone (`date`, `slot`) and recipe reference, and never mutates it: moves are
//! expressed as [`MoveIntent`]s.

use std::fmt;

use chrono::NaiveDate;
use plangrid_zones::{MealSlot, ZoneKey};

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

id_newtype!(
    /// Identifier of a plan entry record.
    EntryId
);
id_newtype!(
    /// Identifier of a recipe in the catalog.
    RecipeRef
);
id_newtype!(
    /// Identifier of a food in the catalog.
    FoodRef
);
id_newtype!(
    /// Identifier of the person (household member) an entry belongs to.
    OwnerRef
);

/// What an entry places: a single food, or one record of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanItem {
    Food(FoodRef),
    Recipe(RecipeRef),
}

/// A placed record on the planner grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub item: PlanItem,
    pub owner: OwnerRef,
}

impl PlanEntry {
    /// Create a food entry.
    #[must_use]
    pub fn food(
        id: impl Into<EntryId>,
        date: NaiveDate,
        slot: MealSlot,
        food: u64,
        owner: u64,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            slot,
            item: PlanItem::Food(FoodRef(food)),
            owner: OwnerRef(owner),
        }
    }

    /// Create a recipe record entry.
    #[must_use]
    pub fn recipe(
        id: impl Into<EntryId>,
        date: NaiveDate,
        slot: MealSlot,
        recipe: u64,
        owner: u64,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            slot,
            item: PlanItem::Recipe(RecipeRef(recipe)),
            owner: OwnerRef(owner),
        }
    }

    /// The zone this entry currently occupies.
    #[inline]
    #[must_use]
    pub fn zone(&self) -> ZoneKey {
        ZoneKey::new(self.date, self.slot)
    }

    /// The recipe this entry belongs to, if any.
    #[inline]
    #[must_use]
    pub fn recipe_ref(&self) -> Option<RecipeRef> {
        match self.item {
            PlanItem::Recipe(recipe) => Some(recipe),
            PlanItem::Food(_) => None,
        }
    }
}

/// A request to move one entry to a new zone.
///
/// This is the only data-meaningful output of a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveIntent {
    pub entry: EntryId,
    pub target: ZoneKey,
}

impl MoveIntent {
    /// Target date.
    #[inline]
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.target.date
    }

    /// Target slot.
    #[inline]
    #[must_use]
    pub fn slot(&self) -> MealSlot {
        self.target.slot
    }
}

impl fmt::Display for MoveIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry {} -> {}", self.entry, self.target)
    }
}
