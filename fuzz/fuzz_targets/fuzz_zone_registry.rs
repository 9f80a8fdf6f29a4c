#![no_main]

use chrono::{Days, NaiveDate};
use libfuzzer_sys::fuzz_target;
use plangrid_core::geometry::{Point, Rect};
use plangrid_zones::{MealSlot, ViewVariant, ZoneKey, ZoneRegistry, find_nearest};

#[derive(arbitrary::Arbitrary, Debug)]
enum Op {
    Register {
        mobile: bool,
        day: u8,
        slot: u8,
        rect: (f64, f64, f64, f64),
    },
    Unregister {
        mobile: bool,
        day: u8,
        slot: u8,
    },
    Clear {
        mobile: bool,
    },
    Query {
        mobile: bool,
        x: f64,
        y: f64,
    },
}

fn variant(mobile: bool) -> ViewVariant {
    if mobile {
        ViewVariant::Mobile
    } else {
        ViewVariant::Desktop
    }
}

fn key(day: u8, slot: u8) -> Option<ZoneKey> {
    let date = NaiveDate::from_ymd_opt(2024, 6, 3)?
        .checked_add_days(Days::new(u64::from(day % 14)))?;
    Some(ZoneKey::new(date, MealSlot::ALL[usize::from(slot) % MealSlot::ALL.len()]))
}

fuzz_target!(|ops: Vec<Op>| {
    let mut registry = ZoneRegistry::new();

    for op in ops.into_iter().take(512) {
        match op {
            Op::Register { mobile, day, slot, rect: (x, y, w, h) } => {
                let Some(key) = key(day, slot) else { continue };
                registry.register(variant(mobile), key, Rect::new(x, y, w, h));
                assert!(registry.contains(variant(mobile), &key));
            }
            Op::Unregister { mobile, day, slot } => {
                let Some(key) = key(day, slot) else { continue };
                registry.unregister(variant(mobile), &key);
                assert!(!registry.contains(variant(mobile), &key));
            }
            Op::Clear { mobile } => {
                registry.clear_variant(variant(mobile));
                assert!(registry.is_empty(variant(mobile)));
            }
            Op::Query { mobile, x, y } => {
                let v = variant(mobile);
                let point = Point::new(x, y);
                let Some(hit) = find_nearest(&registry, v, point) else {
                    continue;
                };
                // Registered for the queried variant, and never degenerate.
                assert!(registry.contains(v, &hit.key));
                assert!(!hit.rect.is_empty());
                assert!(point.is_finite());
                // No strictly closer hittable zone exists.
                let best = hit.rect.center().distance_squared(point);
                for zone in registry.hittable(v) {
                    let d2 = zone.rect.center().distance_squared(point);
                    assert!(!(d2 < best), "{:?} closer than {:?}", zone.key, hit.key);
                }
            }
        }
    }
});
