#![forbid(unsafe_code)]

//! Spatial zone registry.
//!
//! [`ZoneRegistry`] is a keyed arena of candidate drop zones, one map per
//! [`ViewVariant`], each keyed by [`ZoneKey`]. The rendering layer owns the
//! registry and refreshes it continuously (on layout, scroll, responsive
//! re-flow); the hit tester reads it live at query time.
//!
//! # Invariants
//!
//! 1. Each `(variant, key)` pair maps to at most one rectangle.
//! 2. Iteration order within a variant is first-registration order.
//!    Refreshing an existing key updates its rectangle in place; removing a
//!    key keeps the relative order of the rest.
//! 3. Exactly one variant is active at a time.
//! 4. Degenerate rectangles (zero/negative extent, non-finite) are stored as
//!    given. They are invisible to hit testing, not rejected.
//!
//! # Failure Modes
//!
//! - Unregistering a key that is not present is a no-op returning `None`.
//! - Zones disappearing mid-drag simply stop being candidates.

use indexmap::IndexMap;
use plangrid_core::geometry::Rect;
use plangrid_core::trace;

use crate::key::{ViewVariant, ZoneKey};

/// A registered drop zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub variant: ViewVariant,
    pub key: ZoneKey,
    /// Rectangle in viewport coordinates.
    pub rect: Rect,
}

/// Live mapping from `(variant, date, slot)` to zone geometry.
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    desktop: IndexMap<ZoneKey, Rect>,
    mobile: IndexMap<ZoneKey, Rect>,
    active: ViewVariant,
    generation: u64,
}

impl ZoneRegistry {
    /// Create an empty registry with [`ViewVariant::Desktop`] active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given variant active.
    #[must_use]
    pub fn with_active(active: ViewVariant) -> Self {
        Self {
            active,
            ..Self::default()
        }
    }

    fn zones(&self, variant: ViewVariant) -> &IndexMap<ZoneKey, Rect> {
        match variant {
            ViewVariant::Desktop => &self.desktop,
            ViewVariant::Mobile => &self.mobile,
        }
    }

    fn zones_mut(&mut self, variant: ViewVariant) -> &mut IndexMap<ZoneKey, Rect> {
        match variant {
            ViewVariant::Desktop => &mut self.desktop,
            ViewVariant::Mobile => &mut self.mobile,
        }
    }

    /// Insert or refresh a zone's geometry.
    ///
    /// Returns the previous rectangle if the zone was already registered.
    pub fn register(&mut self, variant: ViewVariant, key: ZoneKey, rect: Rect) -> Option<Rect> {
        self.generation = self.generation.wrapping_add(1);
        let previous = self.zones_mut(variant).insert(key, rect);
        trace!(
            variant = variant.as_str(),
            zone = %key,
            refreshed = previous.is_some(),
            "zone registered"
        );
        previous
    }

    /// Remove a zone, returning its last rectangle.
    pub fn unregister(&mut self, variant: ViewVariant, key: &ZoneKey) -> Option<Rect> {
        let removed = self.zones_mut(variant).shift_remove(key);
        if removed.is_some() {
            self.generation = self.generation.wrapping_add(1);
            trace!(variant = variant.as_str(), zone = %key, "zone unregistered");
        }
        removed
    }

    /// Remove every zone of a variant.
    pub fn clear_variant(&mut self, variant: ViewVariant) {
        let zones = self.zones_mut(variant);
        if !zones.is_empty() {
            zones.clear();
            self.generation = self.generation.wrapping_add(1);
        }
    }

    /// Geometry of a registered zone.
    #[must_use]
    pub fn get(&self, variant: ViewVariant, key: &ZoneKey) -> Option<Rect> {
        self.zones(variant).get(key).copied()
    }

    /// Whether a zone is registered (regardless of its area).
    #[must_use]
    pub fn contains(&self, variant: ViewVariant, key: &ZoneKey) -> bool {
        self.zones(variant).contains_key(key)
    }

    /// Number of zones registered for a variant, including degenerate ones.
    #[must_use]
    pub fn len(&self, variant: ViewVariant) -> usize {
        self.zones(variant).len()
    }

    /// Whether a variant has no registered zones at all.
    #[must_use]
    pub fn is_empty(&self, variant: ViewVariant) -> bool {
        self.zones(variant).is_empty()
    }

    /// Zones of a variant in registration order.
    pub fn iter(&self, variant: ViewVariant) -> impl Iterator<Item = DropZone> + '_ {
        self.zones(variant).iter().map(move |(key, rect)| DropZone {
            variant,
            key: *key,
            rect: *rect,
        })
    }

    /// Zones of a variant that can currently be hit (non-degenerate).
    pub fn hittable(&self, variant: ViewVariant) -> impl Iterator<Item = DropZone> + '_ {
        self.iter(variant).filter(|zone| !zone.rect.is_empty())
    }

    /// The currently active (visible, interactive) variant.
    #[inline]
    #[must_use]
    pub fn active(&self) -> ViewVariant {
        self.active
    }

    /// Switch the active variant (e.g. on a responsive breakpoint).
    pub fn set_active(&mut self, variant: ViewVariant) {
        if self.active != variant {
            self.active = variant;
            self.generation = self.generation.wrapping_add(1);
            trace!(variant = variant.as_str(), "active view variant changed");
        }
    }

    /// Monotonic mutation counter, bumped on every change.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
