#![forbid(unsafe_code)]

//! Drag session controller: the state machine behind one drag gesture.
//!
//! [`DragController`] turns pointer input into drop resolution and, after the
//! settle motion finishes, into move intents.
//!
//! # State Machine
//!
//! ```text
//!         begin_drag            end_drag
//! Idle ──────────────▶ Dragging ─────────▶ Resolving ──┬─▶ Settling ───┐
//!                        │                             └─▶ Cancelling ─┤
//!                        │ capture_lost / cancel            ▲          │ tick / settle / cancel
//!                        └──────────────────────────────────┘          ▼
//!                                                                     Idle
//! ```
//!
//! - **Dragging**: every pointer move is sampled; a live hit test on the raw
//!   pointer drives the highlight. The highlight never feeds the commit.
//! - **Resolving**: the release point is projected along the last velocity
//!   and hit-tested against the active view variant only.
//! - **Settling**: the item springs toward its neutral pose; the commit is a
//!   continuation that runs once the motion completes (or on
//!   [`DragController::settle`]).
//! - **Cancelling**: the item springs back over its origin; nothing commits.
//!
//! # Invariants
//!
//! 1. At most one session is `Dragging` at a time.
//! 2. An entry cannot start a new drag while its previous session is still
//!    settling or cancelling.
//! 3. A session's commit continuation runs at most once; afterwards the
//!    session is gone and further `settle`/`cancel` calls are no-ops.
//! 4. A target equal to the entry's current zone issues zero intents.
//! 5. Cancelled sessions never issue intents.
//!
//! # Failure Modes
//!
//! - Empty or missing zones for the active variant: resolves to `Cancelling`
//!   with [`CancelReason::NoTarget`].
//! - Dragged entry deleted from the store before the commit: zero intents.
//! - Non-finite release point: the last good sample stands in for it.

use std::fmt;
use std::time::Duration;

use plangrid_core::animation::{Animation, Pose, SettleConfig, SettleMotion};
use plangrid_core::event::{PointerEvent, PointerEventKind};
use plangrid_core::geometry::{Point, Rect};
use plangrid_core::momentum::MomentumProjector;
use plangrid_core::sampler::PointerSampler;
use plangrid_zones::{ZoneKey, ZoneRegistry, find_nearest};
use tracing::{debug, debug_span, trace, warn};

use crate::config::DragConfig;
use crate::error::SessionError;
use crate::event::{CancelReason, DragEvent};
use crate::group;
use crate::model::{EntryId, PlanEntry};
use crate::store::PlanStore;

const LOG_TARGET: &str = "plangrid.session";

// ---------------------------------------------------------------------------
// Session identity and state
// ---------------------------------------------------------------------------

/// Identifier of one drag session. Never reused within a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No session (never started, or torn down).
    Idle,
    /// Pointer captured and moving.
    Dragging,
    /// Drop target being computed. Transient within [`DragController::end_drag`].
    Resolving,
    /// Target found; settle motion playing, commit pending.
    Settling,
    /// No target (or capture lost); revert motion playing.
    Cancelling,
}

impl SessionState {
    /// Stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Resolving => "resolving",
            Self::Settling => "settling",
            Self::Cancelling => "cancelling",
        }
    }
}

#[derive(Debug, Clone)]
struct DragSession {
    id: SessionId,
    state: SessionState,
    entry: EntryId,
    origin: ZoneKey,
    origin_rect: Rect,
    /// Pointer position minus the item's top-left corner, viewport space.
    grab_offset: Point,
    start_point: Point,
    start_scroll: Point,
    last_scroll: Point,
    sampler: PointerSampler,
    highlight: Option<ZoneKey>,
    target: Option<ZoneKey>,
    cancel_reason: Option<CancelReason>,
    motion: Option<SettleMotion>,
}

impl DragSession {
    fn transition(&mut self, next: SessionState) {
        trace!(
            target: LOG_TARGET,
            session = self.id.0,
            from = self.state.as_str(),
            to = next.as_str(),
            "session transition"
        );
        self.state = next;
    }

    /// Center of the dragged item (viewport space) if the pointer is at `pointer`.
    fn item_center(&self, pointer: Point) -> Point {
        let top_left = pointer - self.grab_offset;
        Point::new(
            top_left.x + self.origin_rect.width / 2.0,
            top_left.y + self.origin_rect.height / 2.0,
        )
    }
}

/// Immutable view of the controller for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSnapshot {
    /// The session currently being dragged, if any.
    pub dragging: Option<(SessionId, EntryId)>,
    /// Zone under the raw pointer of the dragging session.
    pub highlighted: Option<ZoneKey>,
    /// Sessions playing their settle or revert motion.
    pub finishing: Vec<(SessionId, EntryId, SessionState)>,
}

// ---------------------------------------------------------------------------
// DragController
// ---------------------------------------------------------------------------

/// Orchestrates drag sessions over a [`ZoneRegistry`] and a [`PlanStore`].
///
/// The controller owns only session-scoped state. The registry belongs to the
/// rendering layer and the store to the data layer; both are borrowed per
/// call so every resolution sees the latest layout and data.
pub struct DragController {
    config: DragConfig,
    projector: MomentumProjector,
    settle: SettleConfig,
    active: Option<DragSession>,
    finishing: Vec<DragSession>,
    next_id: u64,
}

impl fmt::Debug for DragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("dragging", &self.active.as_ref().map(|s| s.id))
            .field("finishing", &self.finishing.len())
            .finish()
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragController {
    /// Create a controller with the given configuration.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            projector: config.to_projector(),
            settle: config.to_settle_config(),
            config,
            active: None,
            finishing: Vec::with_capacity(2),
            next_id: 1,
        }
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Replace the configuration. Sessions already in flight keep the motion
    /// they started with.
    pub fn set_config(&mut self, config: DragConfig) {
        self.projector = config.to_projector();
        self.settle = config.to_settle_config();
        self.config = config;
    }

    // -- Input ---------------------------------------------------------------

    /// Start dragging `entry`, whose rendered rectangle (viewport space) is
    /// `origin_rect`, from the pointer-down `event`.
    pub fn begin_drag(
        &mut self,
        entry: &PlanEntry,
        origin_rect: Rect,
        event: &PointerEvent,
    ) -> Result<Vec<DragEvent>, SessionError> {
        if let Some(active) = &self.active {
            return Err(SessionError::AlreadyDragging { active: active.id });
        }
        if let Some(busy) = self.finishing.iter().find(|s| s.entry == entry.id) {
            return Err(SessionError::EntryBusy {
                entry: entry.id,
                session: busy.id,
            });
        }

        let id = SessionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let mut sampler = self.config.to_sampler();
        sampler.seed(event.point, event.timestamp_ms);
        let pointer = event.viewport_point();
        let grab_offset = if pointer.is_finite() {
            pointer - Point::new(origin_rect.x, origin_rect.y)
        } else {
            Point::new(origin_rect.width / 2.0, origin_rect.height / 2.0)
        };

        let session = DragSession {
            id,
            state: SessionState::Dragging,
            entry: entry.id,
            origin: entry.zone(),
            origin_rect,
            grab_offset,
            start_point: event.point,
            start_scroll: event.scroll,
            last_scroll: event.scroll,
            sampler,
            highlight: None,
            target: None,
            cancel_reason: None,
            motion: None,
        };

        debug!(
            target: LOG_TARGET,
            session = id.0,
            entry = entry.id.0,
            origin = %session.origin,
            "drag started"
        );

        let origin = session.origin;
        self.active = Some(session);
        Ok(vec![DragEvent::DragStart {
            session: id,
            entry: entry.id,
            origin,
        }])
    }

    /// Route a pointer event to the active session.
    ///
    /// `Down` is ignored here: starting a drag needs the entry, see
    /// [`begin_drag`](Self::begin_drag).
    pub fn handle(&mut self, event: &PointerEvent, registry: &ZoneRegistry) -> Vec<DragEvent> {
        match event.kind {
            PointerEventKind::Down => Vec::new(),
            PointerEventKind::Move => self.pointer_move(event, registry),
            PointerEventKind::Up => self.end_drag(event, registry),
            PointerEventKind::Cancel => self.capture_lost(),
        }
    }

    /// Sample a pointer move and refresh the live highlight.
    pub fn pointer_move(
        &mut self,
        event: &PointerEvent,
        registry: &ZoneRegistry,
    ) -> Vec<DragEvent> {
        let Some(session) = self.active.as_mut() else {
            return Vec::new();
        };

        session.sampler.record(event.point, event.timestamp_ms);
        session.last_scroll = event.scroll;

        // Raw pointer, not projected: highlight only.
        let candidate =
            find_nearest(registry, registry.active(), event.viewport_point()).map(|hit| hit.key);
        if candidate == session.highlight {
            return Vec::new();
        }
        session.highlight = candidate;
        vec![DragEvent::Highlight {
            session: session.id,
            zone: candidate,
        }]
    }

    /// Release the pointer: project, resolve, and start settling or reverting.
    pub fn end_drag(&mut self, event: &PointerEvent, registry: &ZoneRegistry) -> Vec<DragEvent> {
        let Some(mut session) = self.active.take() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(4);
        Self::clear_highlight(&mut session, &mut out);
        out.push(DragEvent::DragEnd {
            session: session.id,
            entry: session.entry,
        });

        session.transition(SessionState::Resolving);
        session.last_scroll = event.scroll;
        let _span = debug_span!(
            "drag.resolve",
            session = session.id.0,
            entry = session.entry.0,
        )
        .entered();

        let release = if event.point.is_finite() {
            event.point
        } else {
            session.sampler.last_point().unwrap_or(event.point)
        };
        let velocity = session.sampler.velocity();
        let projected = self
            .projector
            .project(release, velocity)
            .to_viewport(event.scroll);
        let release_viewport = release.to_viewport(event.scroll);
        let variant = registry.active();

        match find_nearest(registry, variant, projected) {
            Some(hit) => {
                let noop = hit.key == session.origin;
                debug!(
                    target: LOG_TARGET,
                    session = session.id.0,
                    variant = variant.as_str(),
                    projected_x = projected.x,
                    projected_y = projected.y,
                    vx = velocity.vx,
                    vy = velocity.vy,
                    zone = %hit.key,
                    noop,
                    "drag resolved"
                );
                session.transition(SessionState::Settling);
                session.target = Some(hit.key);
                let offset = session.item_center(release_viewport) - hit.rect.center();
                session.motion = Some(
                    SettleMotion::new(offset, &self.settle)
                        .with_velocity(velocity.clamp_axes(self.projector.max_axis_velocity())),
                );
                out.push(DragEvent::Resolved {
                    session: session.id,
                    entry: session.entry,
                    target: hit.key,
                    projected,
                    noop,
                });
            }
            None => {
                debug!(
                    target: LOG_TARGET,
                    session = session.id.0,
                    variant = variant.as_str(),
                    projected_x = projected.x,
                    projected_y = projected.y,
                    "no drop zone for projected point"
                );
                let reason = CancelReason::NoTarget;
                out.extend(self.start_cancel(&mut session, reason, release_viewport));
            }
        }

        self.finishing.push(session);
        out
    }

    /// Pointer capture was lost: revert with no commit.
    pub fn capture_lost(&mut self) -> Vec<DragEvent> {
        self.abort_active(CancelReason::CaptureLost)
    }

    // -- Continuations -------------------------------------------------------

    /// Advance every settle/revert motion by `dt`, running the continuation
    /// of each session whose motion completes.
    pub fn tick<S: PlanStore + ?Sized>(&mut self, dt: Duration, store: &mut S) -> Vec<DragEvent> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < self.finishing.len() {
            let done = match self.finishing[i].motion.as_mut() {
                Some(motion) => {
                    motion.tick(dt);
                    motion.is_complete()
                }
                None => true,
            };
            if done {
                let session = self.finishing.remove(i);
                Self::finish(session, store, &mut out);
            } else {
                i += 1;
            }
        }
        out
    }

    /// Finish a settling session now, running its commit continuation.
    ///
    /// No effect for sessions that are not settling, including torn-down ones.
    pub fn settle<S: PlanStore + ?Sized>(
        &mut self,
        id: SessionId,
        store: &mut S,
    ) -> Vec<DragEvent> {
        let Some(idx) = self
            .finishing
            .iter()
            .position(|s| s.id == id && s.state == SessionState::Settling)
        else {
            trace!(target: LOG_TARGET, session = id.0, "settle ignored");
            return Vec::new();
        };
        let mut session = self.finishing.remove(idx);
        if let Some(motion) = session.motion.as_mut() {
            motion.finish();
        }
        let mut out = Vec::with_capacity(1);
        Self::finish(session, store, &mut out);
        out
    }

    /// Cancel a session.
    ///
    /// A dragging session starts reverting; a reverting session finishes
    /// immediately. Settling sessions already own a resolved target and are
    /// left alone, as are torn-down ones.
    pub fn cancel(&mut self, id: SessionId) -> Vec<DragEvent> {
        if self.active.as_ref().is_some_and(|s| s.id == id) {
            return self.abort_active(CancelReason::UserCancelled);
        }
        let Some(idx) = self
            .finishing
            .iter()
            .position(|s| s.id == id && s.state == SessionState::Cancelling)
        else {
            trace!(target: LOG_TARGET, session = id.0, "cancel ignored");
            return Vec::new();
        };
        let session = self.finishing.remove(idx);
        let mut out = Vec::with_capacity(1);
        Self::finish_cancel(session, &mut out);
        out
    }

    /// Drop every session without committing (e.g. the grid unmounted).
    pub fn reset(&mut self) {
        let dropped = usize::from(self.active.is_some()) + self.finishing.len();
        if dropped > 0 {
            debug!(target: LOG_TARGET, dropped, "drag controller reset");
        }
        self.active = None;
        self.finishing.clear();
    }

    // -- Queries -------------------------------------------------------------

    /// State of a session. Unknown and torn-down sessions are `Idle`.
    #[must_use]
    pub fn state(&self, id: SessionId) -> SessionState {
        self.session(id).map_or(SessionState::Idle, |s| s.state)
    }

    /// The session currently being dragged.
    #[must_use]
    pub fn active_session(&self) -> Option<SessionId> {
        self.active.as_ref().map(|s| s.id)
    }

    /// Whether `entry` has a live session (dragging or finishing).
    #[must_use]
    pub fn is_busy(&self, entry: EntryId) -> bool {
        self.active.as_ref().is_some_and(|s| s.entry == entry)
            || self.finishing.iter().any(|s| s.entry == entry)
    }

    /// Whether any session is live.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.finishing.is_empty()
    }

    /// Resolved target of a settling session.
    #[must_use]
    pub fn target(&self, id: SessionId) -> Option<ZoneKey> {
        self.session(id).and_then(|s| s.target)
    }

    /// Visual pose of a session's item.
    ///
    /// While dragging, the offset is the pointer displacement since drag
    /// start and the item is lifted. While finishing, it is the settle motion
    /// relative to the item's resting place.
    #[must_use]
    pub fn pose(&self, id: SessionId) -> Option<Pose> {
        let session = self.session(id)?;
        match (&session.motion, session.state) {
            (Some(motion), _) => Some(motion.pose()),
            (None, SessionState::Dragging) => {
                let current = session.sampler.last_point().unwrap_or(session.start_point);
                let offset = current.to_viewport(session.last_scroll)
                    - session.start_point.to_viewport(session.start_scroll);
                Some(Pose {
                    offset,
                    scale: self.settle.lift_scale,
                })
            }
            (None, _) => Some(Pose::NEUTRAL),
        }
    }

    /// Immutable view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> DragSnapshot {
        DragSnapshot {
            dragging: self.active.as_ref().map(|s| (s.id, s.entry)),
            highlighted: self.active.as_ref().and_then(|s| s.highlight),
            finishing: self
                .finishing
                .iter()
                .map(|s| (s.id, s.entry, s.state))
                .collect(),
        }
    }

    // -- Internals -----------------------------------------------------------

    fn session(&self, id: SessionId) -> Option<&DragSession> {
        self.active
            .as_ref()
            .filter(|s| s.id == id)
            .or_else(|| self.finishing.iter().find(|s| s.id == id))
    }

    fn clear_highlight(session: &mut DragSession, out: &mut Vec<DragEvent>) {
        if session.highlight.take().is_some() {
            out.push(DragEvent::Highlight {
                session: session.id,
                zone: None,
            });
        }
    }

    fn abort_active(&mut self, reason: CancelReason) -> Vec<DragEvent> {
        let Some(mut session) = self.active.take() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(3);
        Self::clear_highlight(&mut session, &mut out);
        out.push(DragEvent::DragEnd {
            session: session.id,
            entry: session.entry,
        });
        let pointer = session
            .sampler
            .last_point()
            .unwrap_or(session.start_point)
            .to_viewport(session.last_scroll);
        out.extend(self.start_cancel(&mut session, reason, pointer));
        self.finishing.push(session);
        out
    }

    fn start_cancel(
        &self,
        session: &mut DragSession,
        reason: CancelReason,
        pointer: Point,
    ) -> Vec<DragEvent> {
        debug!(
            target: LOG_TARGET,
            session = session.id.0,
            entry = session.entry.0,
            reason = reason.as_str(),
            "drag cancelling"
        );
        session.transition(SessionState::Cancelling);
        session.cancel_reason = Some(reason);
        let offset = if pointer.is_finite() {
            session.item_center(pointer) - session.origin_rect.center()
        } else {
            Point::ORIGIN
        };
        session.motion = Some(SettleMotion::new(offset, &self.settle));
        vec![DragEvent::CancelStarted {
            session: session.id,
            entry: session.entry,
            reason,
        }]
    }

    fn finish<S: PlanStore + ?Sized>(
        session: DragSession,
        store: &mut S,
        out: &mut Vec<DragEvent>,
    ) {
        match (session.state, session.target) {
            (SessionState::Settling, Some(target)) => {
                Self::finish_settle(session, target, store, out);
            }
            _ => Self::finish_cancel(session, out),
        }
    }

    fn finish_settle<S: PlanStore + ?Sized>(
        mut session: DragSession,
        target: ZoneKey,
        store: &mut S,
        out: &mut Vec<DragEvent>,
    ) {
        // Re-read: the snapshot may have changed while the motion played.
        let committed = match store.entry(session.entry).cloned() {
            None => {
                warn!(
                    target: LOG_TARGET,
                    session = session.id.0,
                    entry = session.entry.0,
                    "dragged entry vanished before commit"
                );
                0
            }
            Some(current) if current.zone() == target => {
                debug!(
                    target: LOG_TARGET,
                    session = session.id.0,
                    zone = %target,
                    "drop onto current zone, nothing to commit"
                );
                0
            }
            Some(current) => {
                let set = group::resolve_move_set(&current, store.entries());
                let issued = group::commit(&set, target, store);
                debug!(
                    target: LOG_TARGET,
                    session = session.id.0,
                    entry = session.entry.0,
                    zone = %target,
                    group_size = set.len(),
                    recipe = set.recipe().map(|r| r.0),
                    "move committed"
                );
                issued
            }
        };
        session.transition(SessionState::Idle);
        out.push(DragEvent::Settled {
            session: session.id,
            entry: session.entry,
            target,
            committed,
        });
    }

    fn finish_cancel(mut session: DragSession, out: &mut Vec<DragEvent>) {
        let reason = session.cancel_reason.unwrap_or(CancelReason::NoTarget);
        session.transition(SessionState::Idle);
        debug!(
            target: LOG_TARGET,
            session = session.id.0,
            reason = reason.as_str(),
            "drag cancelled"
        );
        out.push(DragEvent::Cancelled {
            session: session.id,
            entry: session.entry,
            reason,
        });
    }
}
