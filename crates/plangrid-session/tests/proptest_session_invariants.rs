//! Property-based invariant tests for the drag controller.
//!
//! 1. Every session emits at most one terminal event.
//! 2. Intents are only issued by `Settled` sessions, and their count matches.
//! 3. Every intent targets a zone registered for the active variant.
//! 4. All intents of one commit share the same target.
//! 5. A drop onto the entry's current zone issues nothing.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use plangrid_core::event::{PointerEvent, PointerEventKind};
use plangrid_core::geometry::{Point, Rect};
use plangrid_session::{
    DragController, DragEvent, MemoryStore, PlanEntry, PlanStore, SessionId,
};
use plangrid_zones::{MealSlot, ViewVariant, ZoneKey, ZoneRegistry};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .and_then(|d| d.checked_add_days(Days::new(offset)))
        .unwrap()
}

/// 4 days x 3 slots, 150x80 cells on desktop; a single column on mobile.
fn grid() -> ZoneRegistry {
    let mut zones = ZoneRegistry::new();
    let slots = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];
    for d in 0..4u64 {
        for (row, slot) in slots.iter().enumerate() {
            let key = ZoneKey::new(day(d), *slot);
            zones.register(
                ViewVariant::Desktop,
                key,
                Rect::new(d as f64 * 150.0, row as f64 * 80.0, 150.0, 80.0),
            );
            zones.register(
                ViewVariant::Mobile,
                key,
                Rect::new(0.0, (d as usize * 3 + row) as f64 * 60.0, 320.0, 60.0),
            );
        }
    }
    zones
}

fn plan() -> Vec<PlanEntry> {
    vec![
        PlanEntry::recipe(1, day(0), MealSlot::Lunch, 50, 1),
        PlanEntry::recipe(2, day(0), MealSlot::Lunch, 50, 2),
        PlanEntry::recipe(3, day(1), MealSlot::Lunch, 50, 1),
        PlanEntry::food(4, day(2), MealSlot::Dinner, 700, 1),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Begin { entry: usize, x: f64, y: f64 },
    Move { x: f64, y: f64, dt: f64 },
    Up { x: f64, y: f64, dt: f64 },
    Lost,
    Tick { ms: u64 },
    SettleLast,
    CancelLast,
    SwitchView,
}

fn coord() -> impl Strategy<Value = f64> {
    prop_oneof![
        10 => -100.0f64..700.0,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => (0usize..4, 0.0f64..600.0, 0.0f64..240.0)
            .prop_map(|(entry, x, y)| Op::Begin { entry, x, y }),
        4 => (coord(), coord(), -5.0f64..50.0).prop_map(|(x, y, dt)| Op::Move { x, y, dt }),
        2 => (coord(), coord(), 0.0f64..50.0).prop_map(|(x, y, dt)| Op::Up { x, y, dt }),
        1 => Just(Op::Lost),
        3 => (0u64..200).prop_map(|ms| Op::Tick { ms }),
        1 => Just(Op::SettleLast),
        1 => Just(Op::CancelLast),
        1 => Just(Op::SwitchView),
    ]
}

proptest! {
    #[test]
    fn drag_invariants_hold(ops in proptest::collection::vec(op(), 1..80)) {
        let mut zones = grid();
        let mut store = MemoryStore::new(plan());
        let mut ctl = DragController::default();
        let mut now = 0.0;
        let mut last: Option<SessionId> = None;
        let mut events = Vec::new();
        let mut origins: HashMap<SessionId, ZoneKey> = HashMap::new();

        for op in ops {
            let before = store.committed().len();
            let step = match op {
                Op::Begin { entry, x, y } => {
                    let entry = store.entries()[entry].clone();
                    let rect = Rect::new(x - 20.0, y - 10.0, 60.0, 30.0);
                    match ctl.begin_drag(&entry, rect, &PointerEvent::down(x, y, now)) {
                        Ok(out) => {
                            last = Some(out[0].session());
                            origins.insert(out[0].session(), entry.zone());
                            out
                        }
                        Err(_) => Vec::new(),
                    }
                }
                Op::Move { x, y, dt } => {
                    now += dt;
                    ctl.handle(&PointerEvent::moved(x, y, now), &zones)
                }
                Op::Up { x, y, dt } => {
                    now += dt;
                    ctl.handle(&PointerEvent::up(x, y, now), &zones)
                }
                Op::Lost => ctl.handle(
                    &PointerEvent::new(PointerEventKind::Cancel, Point::ORIGIN, now),
                    &zones,
                ),
                Op::Tick { ms } => ctl.tick(Duration::from_millis(ms), &mut store),
                Op::SettleLast => last.map(|id| ctl.settle(id, &mut store)).unwrap_or_default(),
                Op::CancelLast => last.map(|id| ctl.cancel(id)).unwrap_or_default(),
                Op::SwitchView => {
                    zones.set_active(zones.active().other());
                    Vec::new()
                }
            };

            // Intents appear only alongside a Settled event, and match its count.
            let issued = &store.committed()[before..];
            let settled: usize = step
                .iter()
                .map(|e| match e {
                    DragEvent::Settled { committed, .. } => *committed,
                    _ => 0,
                })
                .sum();
            prop_assert_eq!(issued.len(), settled);

            let mut cursor = 0;
            for e in &step {
                if let DragEvent::Resolved { target, .. } = e {
                    prop_assert!(zones.contains(zones.active(), target));
                }
                if let DragEvent::Settled { target, committed, .. } = e {
                    let batch = &issued[cursor..cursor + committed];
                    prop_assert!(batch.iter().all(|i| i.target == *target));
                    cursor += committed;
                }
            }
            events.extend(step);
        }

        // Drain whatever is still in flight.
        ctl.tick(Duration::from_secs(5), &mut store);

        let mut terminal: HashMap<SessionId, usize> = HashMap::new();
        for e in &events {
            if e.is_terminal() {
                *terminal.entry(e.session()).or_default() += 1;
            }
            if let DragEvent::Resolved { session, target, noop, .. } = e {
                prop_assert_eq!(*noop, origins.get(session) == Some(target));
            }
        }
        prop_assert!(terminal.values().all(|&n| n == 1), "{terminal:?}");
    }
}
