#![forbid(unsafe_code)]

//! The persistence boundary.
//!
//! [`PlanStore`] is implemented by the data layer. The engine reads a fresh
//! snapshot of entries every time it resolves a move and hands over committed
//! [`MoveIntent`]s. Delivery is fire-and-forget: acceptance, retries, and
//! failure reporting belong to the implementor.

use crate::model::{EntryId, MoveIntent, PlanEntry};

/// Source of plan entries and sink for move intents.
pub trait PlanStore {
    /// Current entries for the visible range.
    fn entries(&self) -> &[PlanEntry];

    /// Apply (or enqueue) a move.
    fn commit_move(&mut self, intent: MoveIntent);

    /// Look up an entry in the current snapshot.
    fn entry(&self, id: EntryId) -> Option<&PlanEntry> {
        self.entries().iter().find(|e| e.id == id)
    }
}

/// In-memory store that applies moves immediately and records them.
///
/// Useful for previews, demos, and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<PlanEntry>,
    committed: Vec<MoveIntent>,
}

impl MemoryStore {
    /// Create a store holding `entries`.
    #[must_use]
    pub fn new(entries: Vec<PlanEntry>) -> Self {
        Self {
            entries,
            committed: Vec::new(),
        }
    }

    /// Every intent received so far, in arrival order.
    #[must_use]
    pub fn committed(&self) -> &[MoveIntent] {
        &self.committed
    }

    /// Drain the received intents.
    pub fn take_committed(&mut self) -> Vec<MoveIntent> {
        std::mem::take(&mut self.committed)
    }

    /// Replace the snapshot (e.g. after an external refresh).
    pub fn set_entries(&mut self, entries: Vec<PlanEntry>) {
        self.entries = entries;
    }

    /// Remove an entry from the snapshot.
    pub fn remove(&mut self, id: EntryId) -> Option<PlanEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }
}

impl PlanStore for MemoryStore {
    fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    fn commit_move(&mut self, intent: MoveIntent) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == intent.entry) {
            entry.date = intent.target.date;
            entry.slot = intent.target.slot;
        }
        self.committed.push(intent);
    }
}
