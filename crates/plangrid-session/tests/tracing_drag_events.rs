#![forbid(unsafe_code)]

//! Structured log output of the drag controller.
//!
//! Verify the resolve span, its fields, and the resolution and commit events
//! nested under the `plangrid.session` target.
//!
//! Run:
//!   cargo test -p plangrid-session --test tracing_drag_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use plangrid_core::event::PointerEvent;
use plangrid_core::geometry::Rect;
use plangrid_session::{DragController, MemoryStore, PlanEntry};
use plangrid_zones::{MealSlot, ViewVariant, ZoneKey, ZoneRegistry};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Capture layer
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    message: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

#[derive(Clone, Default)]
struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Capture {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn event(&self, message: &str) -> CapturedEvent {
        self.events()
            .into_iter()
            .find(|e| e.message == message)
            .unwrap_or_else(|| panic!("no {message:?} event in {:#?}", self.events()))
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let message = visitor
            .0
            .iter()
            .find(|(k, _)| k == "message")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span| span.name().to_string());
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message,
            fields: visitor.0.into_iter().collect(),
            parent_span_name,
        });
    }
}

fn with_capture<F: FnOnce()>(f: F) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

// ============================================================================
// Fixtures
// ============================================================================

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

fn lunch(day: u32) -> ZoneKey {
    ZoneKey::new(june(day), MealSlot::Lunch)
}

fn two_lunch_cells() -> ZoneRegistry {
    let mut zones = ZoneRegistry::new();
    zones.register(ViewVariant::Desktop, lunch(3), Rect::new(0.0, 150.0, 200.0, 100.0));
    zones.register(ViewVariant::Desktop, lunch(4), Rect::new(200.0, 150.0, 200.0, 100.0));
    zones
}

fn throw_recipe(zones: &ZoneRegistry) -> MemoryStore {
    let e1 = PlanEntry::recipe(1, june(3), MealSlot::Lunch, 50, 1);
    let e2 = PlanEntry::recipe(2, june(3), MealSlot::Lunch, 50, 2);
    let mut store = MemoryStore::new(vec![e1.clone(), e2]);
    let mut ctl = DragController::default();
    ctl.begin_drag(&e1, Rect::new(100.0, 180.0, 60.0, 40.0), &PointerEvent::down(120.0, 200.0, 0.0))
        .unwrap();
    ctl.handle(&PointerEvent::moved(140.0, 205.0, 100.0), zones);
    ctl.handle(&PointerEvent::up(300.0, 210.0, 116.0), zones);
    ctl.tick(Duration::from_secs(1), &mut store);
    store
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn resolve_runs_inside_its_span() {
    let zones = two_lunch_cells();
    let capture = with_capture(|| {
        throw_recipe(&zones);
    });

    let span = capture
        .spans()
        .into_iter()
        .find(|s| s.name == "drag.resolve")
        .expect("drag.resolve span");
    assert_eq!(span.fields.get("session").map(String::as_str), Some("1"));
    assert_eq!(span.fields.get("entry").map(String::as_str), Some("1"));

    let resolved = capture.event("drag resolved");
    assert_eq!(resolved.level, tracing::Level::DEBUG);
    assert_eq!(resolved.target, "plangrid.session");
    assert_eq!(resolved.parent_span_name.as_deref(), Some("drag.resolve"));
    assert_eq!(resolved.fields["zone"], "2024-06-04/lunch");
    assert_eq!(resolved.fields["projected_x"], "310");
    assert_eq!(resolved.fields["projected_y"], "212.5");
    assert_eq!(resolved.fields["variant"], "desktop");
    assert_eq!(resolved.fields["noop"], "false");
}

#[test]
fn commit_logs_group_size() {
    let zones = two_lunch_cells();
    let capture = with_capture(|| {
        let store = throw_recipe(&zones);
        assert_eq!(store.committed().len(), 2);
    });

    let committed = capture.event("move committed");
    assert_eq!(committed.target, "plangrid.session");
    assert_eq!(committed.fields["group_size"], "2");
    assert_eq!(committed.fields["recipe"], "50");
    assert!(committed.parent_span_name.is_none());
}

#[test]
fn missing_target_logs_cancellation() {
    let capture = with_capture(|| {
        let empty = ZoneRegistry::new();
        let store = throw_recipe(&empty);
        assert!(store.committed().is_empty());
    });

    let unresolved = capture.event("no drop zone for projected point");
    assert_eq!(unresolved.parent_span_name.as_deref(), Some("drag.resolve"));
    let cancelling = capture.event("drag cancelling");
    assert_eq!(cancelling.fields["reason"], "no_target");
    assert!(capture.events().iter().all(|e| e.message != "move committed"));
}

#[test]
fn transitions_are_traced() {
    let zones = two_lunch_cells();
    let capture = with_capture(|| {
        throw_recipe(&zones);
    });

    let transitions: Vec<(String, String)> = capture
        .events()
        .into_iter()
        .filter(|e| e.message == "session transition")
        .map(|e| (e.fields["from"].clone(), e.fields["to"].clone()))
        .collect();
    let expected = [
        ("dragging", "resolving"),
        ("resolving", "settling"),
        ("settling", "idle"),
    ];
    assert_eq!(transitions.len(), expected.len(), "{transitions:?}");
    for ((from, to), (want_from, want_to)) in transitions.iter().zip(expected) {
        assert_eq!((from.as_str(), to.as_str()), (want_from, want_to));
    }
}
