#![forbid(unsafe_code)]

//! Recipe groups: which records move together, and which render together.
//!
//! A recipe placed on the grid is stored as several records (one per
//! ingredient line, per owner). Two groupings are derived from the same key
//! family:
//!
//! - **Move group** `(recipe, date, slot)`: every record of the recipe in the
//!   zone of the dragged entry. All of them receive the identical target.
//! - **Display group** `(recipe, owner)` within one zone: collapses the
//!   records one owner sees into a single rendered item keyed
//!   `"{recipe}-{owner}"`.
//!
//! A display group is a refinement of the move group (it adds `owner` and is
//! always computed inside one zone), so dragging any rendered item moves every
//! record hidden behind it.

use std::fmt;

use ahash::{AHashMap, AHashSet};
use plangrid_zones::ZoneKey;

use crate::model::{EntryId, MoveIntent, OwnerRef, PlanEntry, RecipeRef};
use crate::store::PlanStore;

/// The records that must receive the same move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSet {
    origin: ZoneKey,
    recipe: Option<RecipeRef>,
    members: Vec<PlanEntry>,
}

impl MoveSet {
    /// The zone every member currently occupies.
    #[must_use]
    pub fn origin(&self) -> ZoneKey {
        self.origin
    }

    /// The recipe shared by the members, if this is a recipe group.
    #[must_use]
    pub fn recipe(&self) -> Option<RecipeRef> {
        self.recipe
    }

    /// Members in snapshot order.
    #[must_use]
    pub fn members(&self) -> &[PlanEntry] {
        &self.members
    }

    /// Member ids in snapshot order.
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.members.iter().map(|e| e.id)
    }

    /// Whether `id` is a member.
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        self.members.iter().any(|e| e.id == id)
    }

    /// Number of members (never zero).
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: the dragged entry is always a member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The intents a commit to `target` would issue, one per member.
    pub fn intents(&self, target: ZoneKey) -> impl Iterator<Item = MoveIntent> + '_ {
        self.ids().map(move |entry| MoveIntent { entry, target })
    }
}

/// Expand `dragged` into every record that must move with it.
///
/// With a recipe reference this is every entry of `all` sharing
/// `(recipe, date, slot)` with `dragged`; otherwise the singleton. `dragged`
/// is always included, even when the snapshot no longer lists it, and no id
/// appears twice.
#[must_use]
pub fn resolve_move_set(dragged: &PlanEntry, all: &[PlanEntry]) -> MoveSet {
    let origin = dragged.zone();
    let recipe = dragged.recipe_ref();

    let members = match recipe {
        None => vec![dragged.clone()],
        Some(recipe) => {
            let mut seen = AHashSet::with_capacity(all.len().min(16));
            let mut members: Vec<PlanEntry> = all
                .iter()
                .filter(|e| e.recipe_ref() == Some(recipe) && e.zone() == origin)
                .filter(|e| seen.insert(e.id))
                .cloned()
                .collect();
            if !seen.contains(&dragged.id) {
                members.push(dragged.clone());
            }
            members
        }
    };

    MoveSet {
        origin,
        recipe,
        members,
    }
}

/// Offer every member of `set` the identical `target` in one logical commit.
///
/// Returns the number of intents issued. There is no rollback: a rejected
/// intent is the store's to report.
pub fn commit<S: PlanStore + ?Sized>(set: &MoveSet, target: ZoneKey, store: &mut S) -> usize {
    let mut issued = 0;
    for intent in set.intents(target) {
        store.commit_move(intent);
        issued += 1;
    }
    issued
}

/// Render identity of a grid item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayKey {
    /// All records of one recipe for one owner in a zone.
    Recipe { recipe: RecipeRef, owner: OwnerRef },
    /// A standalone food entry.
    Entry(EntryId),
}

impl DisplayKey {
    /// Display key of an entry.
    #[must_use]
    pub fn of(entry: &PlanEntry) -> Self {
        match entry.recipe_ref() {
            Some(recipe) => Self::Recipe {
                recipe,
                owner: entry.owner,
            },
            None => Self::Entry(entry.id),
        }
    }
}

impl fmt::Display for DisplayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recipe { recipe, owner } => write!(f, "{recipe}-{owner}"),
            Self::Entry(id) => write!(f, "entry-{id}"),
        }
    }
}

/// One rendered item: a lead entry plus the records collapsed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub key: DisplayKey,
    /// First record of the group in snapshot order; this is what gets dragged.
    pub lead: PlanEntry,
    /// Every record behind the item, lead first.
    pub members: Vec<EntryId>,
}

/// Collapse the entries of `zone` into rendered items, in first-seen order.
#[must_use]
pub fn display_items(entries: &[PlanEntry], zone: ZoneKey) -> Vec<DisplayItem> {
    let mut items: Vec<DisplayItem> = Vec::new();
    let mut index: AHashMap<DisplayKey, usize> = AHashMap::new();

    for entry in entries.iter().filter(|e| e.zone() == zone) {
        let key = DisplayKey::of(entry);
        match index.get(&key) {
            Some(&i) => items[i].members.push(entry.id),
            None => {
                index.insert(key, items.len());
                items.push(DisplayItem {
                    key,
                    lead: entry.clone(),
                    members: vec![entry.id],
                });
            }
        }
    }

    items
}
