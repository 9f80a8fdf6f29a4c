#![no_main]

use std::time::Duration;

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use plangrid_core::event::{PointerEvent, PointerEventKind};
use plangrid_core::geometry::{Point, Rect};
use plangrid_session::{DragController, DragEvent, MemoryStore, PlanEntry, PlanStore, SessionId};
use plangrid_zones::{MealSlot, ViewVariant, ZoneKey, ZoneRegistry};

#[derive(arbitrary::Arbitrary, Debug)]
enum Op {
    Begin { entry: u8, x: f64, y: f64, t: f64 },
    Pointer { kind: u8, x: f64, y: f64, t: f64 },
    Tick { ms: u16 },
    Settle { session: u8 },
    Cancel { session: u8 },
    ToggleView,
}

fuzz_target!(|ops: Vec<Op>| {
    let Some(day) = NaiveDate::from_ymd_opt(2024, 6, 3) else {
        return;
    };
    let mut zones = ZoneRegistry::new();
    for (i, slot) in MealSlot::ALL.iter().enumerate() {
        let key = ZoneKey::new(day, *slot);
        zones.register(ViewVariant::Desktop, key, Rect::new(i as f64 * 100.0, 0.0, 100.0, 100.0));
        zones.register(ViewVariant::Mobile, key, Rect::new(0.0, i as f64 * 50.0, 300.0, 50.0));
    }
    let entries: Vec<PlanEntry> = (0..4u64)
        .map(|i| PlanEntry::recipe(i, day, MealSlot::Lunch, 1 + i % 2, i))
        .collect();
    let mut store = MemoryStore::new(entries);
    let mut ctl = DragController::default();
    let mut events: Vec<DragEvent> = Vec::new();

    for op in ops.into_iter().take(256) {
        let before = store.committed().len();
        let step = match op {
            Op::Begin { entry, x, y, t } => {
                let entry = store.entries()[usize::from(entry) % 4].clone();
                ctl.begin_drag(&entry, Rect::new(x, y, 40.0, 20.0), &PointerEvent::down(x, y, t))
                    .unwrap_or_default()
            }
            Op::Pointer { kind, x, y, t } => {
                let kind = match kind % 4 {
                    0 => PointerEventKind::Down,
                    1 => PointerEventKind::Move,
                    2 => PointerEventKind::Up,
                    _ => PointerEventKind::Cancel,
                };
                ctl.handle(&PointerEvent::new(kind, Point::new(x, y), t), &zones)
            }
            Op::Tick { ms } => ctl.tick(Duration::from_millis(u64::from(ms)), &mut store),
            Op::Settle { session } => ctl.settle(SessionId(u64::from(session)), &mut store),
            Op::Cancel { session } => ctl.cancel(SessionId(u64::from(session))),
            Op::ToggleView => {
                zones.set_active(zones.active().other());
                Vec::new()
            }
        };
        let settled: usize = step
            .iter()
            .map(|e| match e {
                DragEvent::Settled { committed, .. } => *committed,
                _ => 0,
            })
            .sum();
        assert_eq!(store.committed().len() - before, settled);
        events.extend(step);
    }

    ctl.tick(Duration::from_secs(5), &mut store);
    assert!(ctl.active_session().is_some() || ctl.is_idle());

    let mut terminal: Vec<SessionId> = events
        .iter()
        .filter(|e| e.is_terminal())
        .map(DragEvent::session)
        .collect();
    let total = terminal.len();
    terminal.sort_unstable();
    terminal.dedup();
    assert_eq!(terminal.len(), total, "a session terminated twice");
});
