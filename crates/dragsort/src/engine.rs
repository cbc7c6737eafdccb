#![forbid(unsafe_code)]

//! The reorder engine: one instance per reorderable container.
//!
//! [`ReorderEngine`] composes the layout registry, drag session, intersection
//! resolver, autoscroll controller and settle spring. Every entry point is a
//! synchronous `&mut self` call that returns the [`ReorderEvent`]s it caused,
//! in order.
//!
//! # Event flow
//!
//! ```text
//! on_drag_changed ─► session offset ─► resolver ─► move_item ─► autoscroll check
//! on_frame        ─► autoscroll ticks (scroll, re-resolve) ─► settle spring
//! on_drag_ended   ─► stop autoscroll ─► Settling ─► (on_frame) ─► Settled
//! ```
//!
//! # Invariants
//!
//! 1. Every [`ReorderEvent::Moved`] is an adjacent swap (`to = from ± 1`),
//!    applied through exactly one [`ItemSequence::move_item`] call. A pointer
//!    that jumps past several siblings in one sample yields the whole chain.
//! 2. Every exit from `Dragging` (drop, cancel, removal, unmount, disable)
//!    stops the autoscroll ticker.
//! 3. If the dragged item disappears from the sequence the session returns to
//!    `Idle` on the next call that sees the sequence.

use std::fmt;
use std::hash::Hash;

use dragsort_core::animation::{Animation, Spring};
use dragsort_core::{Duration, Instant, Point, Vector};
use dragsort_layout::{CoordinateSpace, LayoutError, LayoutRegistry, LayoutView, MeasuredFrame};

use crate::autoscroll::{AutoScrollChange, AutoScrollController, Edge, ScrollViewport, StopReason};
use crate::config::{ConfigError, ReorderConfig};
use crate::handle::{GestureSource, accepts_gesture};
use crate::resolver::{IntersectionResolver, Resolution};
use crate::sequence::ItemSequence;
use crate::session::{DragPhase, DragRelease, DragSession};

/// One gesture update as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Pointer in the container's coordinate space.
    pub location: Point,
    /// Where the gesture began, same space.
    pub start_location: Point,
    /// Pointer in the enclosing viewport's space, if there is one.
    pub viewport_location: Option<Point>,
    pub source: GestureSource,
    /// Whether the dragged item declares a drag handle.
    pub item_declares_handle: bool,
}

impl DragSample {
    #[must_use]
    pub fn new(location: Point, start_location: Point) -> Self {
        Self {
            location,
            start_location,
            viewport_location: None,
            source: GestureSource::Item,
            item_declares_handle: false,
        }
    }

    #[must_use]
    pub fn with_viewport_location(mut self, location: Point) -> Self {
        self.viewport_location = Some(location);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: GestureSource) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_handle(mut self, item_declares_handle: bool) -> Self {
        self.item_declares_handle = item_declares_handle;
        self
    }

    /// Cumulative translation since the gesture began.
    #[must_use]
    pub fn translation(&self) -> Vector {
        self.location.offset_from(self.start_location)
    }
}

/// Why a drag left the `Dragging` phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Dropped,
    Cancelled,
    /// The dragged item vanished from the sequence.
    ItemRemoved,
    /// The dragged item or the whole container was unmounted.
    Unmounted,
    /// Dragging was disabled mid-gesture.
    Disabled,
}

/// Why a call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    DragDisabled,
    /// Gesture came from the item body while the item declares a handle.
    NotHandle,
    /// The item is not in the sequence.
    UnknownItem,
    /// Another item is already being dragged.
    OtherItemDragging,
    /// End or cancel for an item that is not being dragged.
    NotDragging,
}

/// Something the engine did in response to a call.
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderEvent<Id> {
    DragStarted {
        id: Id,
        index: usize,
    },
    /// The dragged item swapped with `neighbor`. Already applied to the
    /// sequence through [`ItemSequence::move_item`].
    Moved {
        id: Id,
        neighbor: Id,
        from: usize,
        to: usize,
    },
    SwapSuppressed {
        neighbor: Id,
    },
    AutoScrollStarted {
        edge: Edge,
    },
    AutoScrollStopped {
        reason: StopReason,
    },
    Released {
        id: Id,
        initial_index: usize,
        final_index: usize,
        reason: EndReason,
    },
    Settled {
        id: Id,
    },
    Ignored {
        reason: IgnoreReason,
    },
}

impl<Id> ReorderEvent<Id> {
    /// Short stable name, used for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DragStarted { .. } => "drag_started",
            Self::Moved { .. } => "moved",
            Self::SwapSuppressed { .. } => "swap_suppressed",
            Self::AutoScrollStarted { .. } => "autoscroll_started",
            Self::AutoScrollStopped { .. } => "autoscroll_stopped",
            Self::Released { .. } => "released",
            Self::Settled { .. } => "settled",
            Self::Ignored { .. } => "ignored",
        }
    }

    /// The `(from, to)` move, if this is one.
    #[must_use]
    pub fn as_move(&self) -> Option<(usize, usize)> {
        match self {
            Self::Moved { from, to, .. } => Some((*from, *to)),
            _ => None,
        }
    }
}

/// Drag-to-reorder state machine for one container.
#[derive(Debug)]
pub struct ReorderEngine<Id> {
    config: ReorderConfig,
    registry: LayoutRegistry<Id>,
    session: DragSession<Id>,
    resolver: IntersectionResolver,
    autoscroll: AutoScrollController,
    settle: Option<Spring>,
    /// Pointer along the axis used for hit testing; shifted by autoscroll.
    pointer: Option<f64>,
}

impl<Id> ReorderEngine<Id>
where
    Id: Eq + Hash + Clone + fmt::Debug,
{
    /// Build an engine from a validated configuration.
    pub fn new(config: ReorderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let space = CoordinateSpace::new(config.coordinate_space.clone());
        Ok(Self {
            registry: LayoutRegistry::new(space, config.axis),
            session: DragSession::new(),
            resolver: IntersectionResolver::new(config.hysteresis_band),
            autoscroll: AutoScrollController::new(config.autoscroll.clone(), config.axis),
            settle: None,
            pointer: None,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &LayoutRegistry<Id> {
        &self.registry
    }

    #[must_use]
    pub fn session(&self) -> &DragSession<Id> {
        &self.session
    }

    #[must_use]
    pub fn autoscroll(&self) -> &AutoScrollController {
        &self.autoscroll
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn is_drag_disabled(&self) -> bool {
        self.config.drag_disabled
    }

    #[must_use]
    pub fn is_dragging(&self, id: &Id) -> bool {
        self.session.is_dragging(id)
    }

    #[must_use]
    pub fn is_pending_drop(&self, id: &Id) -> bool {
        self.session.is_pending_drop(id)
    }

    /// Stacking order for rendering: the dragged item above a settling item
    /// above everything else.
    #[must_use]
    pub fn z_order(&self, id: &Id) -> u8 {
        if self.session.is_dragging(id) {
            2
        } else if self.session.is_pending_drop(id) {
            1
        } else {
            0
        }
    }

    /// Offset along the axis at which to render `id`.
    #[must_use]
    pub fn render_offset<S>(&self, id: &Id, items: &S) -> f64
    where
        S: ItemSequence<Id> + ?Sized,
    {
        if self.session.is_dragging(id) {
            let view = self.registry.view(items.ids());
            self.session.render_offset(id, &view)
        } else {
            self.resting_offset(id)
        }
    }

    /// [`Self::render_offset`] against a view the host already built with
    /// [`LayoutRegistry::view`], for hosts that query every item per frame.
    #[must_use]
    pub fn render_offset_in(&self, id: &Id, view: &LayoutView<'_, Id>) -> f64 {
        if self.session.is_dragging(id) {
            self.session.render_offset(id, view)
        } else {
            self.resting_offset(id)
        }
    }

    fn resting_offset(&self, id: &Id) -> f64 {
        if self.session.is_pending_drop(id) {
            self.settle.as_ref().map_or(0.0, Spring::position)
        } else {
            0.0
        }
    }

    /// [`Self::render_offset`] as a 2D offset.
    #[must_use]
    pub fn render_offset_vector<S>(&self, id: &Id, items: &S) -> Vector
    where
        S: ItemSequence<Id> + ?Sized,
    {
        self.config.axis.to_offset(self.render_offset(id, items))
    }

    /// Record an item's measured frame.
    pub fn on_item_measured(&mut self, id: Id, frame: &MeasuredFrame) -> Result<(), LayoutError> {
        self.registry.update_frame(id, frame)
    }

    /// Forget an unmounted item. Unmounting the dragged item ends the drag.
    pub fn on_item_unmounted(&mut self, id: &Id) -> Vec<ReorderEvent<Id>> {
        let mut events = Vec::new();
        self.registry.remove(id);
        if self.session.is_dragging(id) {
            self.end_implicitly(EndReason::Unmounted, &mut events);
        } else if self.session.is_pending_drop(id) {
            self.finish_settle(&mut events);
        }
        self.trace_events(&events);
        events
    }

    /// A drag gesture on `id` changed.
    pub fn on_drag_changed<S>(
        &mut self,
        id: &Id,
        sample: &DragSample,
        items: &mut S,
        viewport: Option<&mut dyn ScrollViewport>,
        now: Instant,
    ) -> Vec<ReorderEvent<Id>>
    where
        S: ItemSequence<Id> + ?Sized,
    {
        let mut events = Vec::new();
        self.check_dragged_present(items, &mut events);

        if self.config.drag_disabled {
            events.push(ReorderEvent::Ignored {
                reason: IgnoreReason::DragDisabled,
            });
            self.trace_events(&events);
            return events;
        }
        if !accepts_gesture(sample.source, sample.item_declares_handle) {
            events.push(ReorderEvent::Ignored {
                reason: IgnoreReason::NotHandle,
            });
            self.trace_events(&events);
            return events;
        }

        match self.session.dragging_id().cloned() {
            Some(current) if current != *id => {
                events.push(ReorderEvent::Ignored {
                    reason: IgnoreReason::OtherItemDragging,
                });
                self.trace_events(&events);
                return events;
            }
            Some(_) => {}
            None => {
                let Some(index) = (0..items.len()).find(|&i| items.id_at(i).as_ref() == Some(id))
                else {
                    events.push(ReorderEvent::Ignored {
                        reason: IgnoreReason::UnknownItem,
                    });
                    self.trace_events(&events);
                    return events;
                };
                if self.session.pending_drop_id().is_some() {
                    self.finish_settle(&mut events);
                }
                self.session.begin(id.clone(), index);
                self.pointer = None;
                events.push(ReorderEvent::DragStarted {
                    id: id.clone(),
                    index,
                });
            }
        }

        let axis = self.config.axis;
        let viewport_pos = sample.viewport_location.map(|p| axis.project_point(p));
        let hold = self.autoscroll.is_running()
            && viewport_pos.is_some_and(|pos| !self.autoscroll.pointer_moved(pos));
        if !hold || self.pointer.is_none() {
            self.session
                .set_display_offset(axis.project_vector(sample.translation()));
            self.pointer = Some(axis.project_point(sample.location));
        }

        if let Some(pointer) = self.pointer {
            self.resolve_at(pointer, items, &mut events);
        }

        match (viewport, viewport_pos) {
            (Some(viewport), Some(pos)) => {
                let change = self.autoscroll.observe(pos, viewport, now);
                push_autoscroll_change(change, &mut events);
            }
            _ => {
                if self.autoscroll.stop() {
                    events.push(ReorderEvent::AutoScrollStopped {
                        reason: StopReason::LeftBand,
                    });
                }
            }
        }

        self.trace_events(&events);
        events
    }

    /// The drag gesture on `id` ended with a drop.
    pub fn on_drag_ended<S>(&mut self, id: &Id, items: &S) -> Vec<ReorderEvent<Id>>
    where
        S: ItemSequence<Id> + ?Sized,
    {
        self.end(id, items, EndReason::Dropped)
    }

    /// The host cancelled the drag gesture on `id`. Handled like a drop.
    pub fn on_drag_cancelled<S>(&mut self, id: &Id, items: &S) -> Vec<ReorderEvent<Id>>
    where
        S: ItemSequence<Id> + ?Sized,
    {
        self.end(id, items, EndReason::Cancelled)
    }

    /// Advance timers: autoscroll ticks due at `now` and the settle spring by
    /// `dt`.
    pub fn on_frame<S>(
        &mut self,
        now: Instant,
        dt: Duration,
        items: &mut S,
        viewport: Option<&mut dyn ScrollViewport>,
    ) -> Vec<ReorderEvent<Id>>
    where
        S: ItemSequence<Id> + ?Sized,
    {
        let mut events = Vec::new();
        self.check_dragged_present(items, &mut events);

        let due = self.autoscroll.poll(now);
        if due > 0 {
            match viewport {
                Some(viewport) => self.scroll_ticks(due, viewport, items, &mut events),
                None => {
                    self.autoscroll.stop();
                    events.push(ReorderEvent::AutoScrollStopped {
                        reason: StopReason::LeftBand,
                    });
                }
            }
        }

        if let Some(spring) = self.settle.as_mut() {
            spring.tick(dt);
            if spring.is_complete() {
                self.finish_settle(&mut events);
            }
        }

        self.trace_events(&events);
        events
    }

    /// Enable or disable dragging. Disabling mid-drag ends the drag.
    pub fn set_drag_disabled(&mut self, disabled: bool) -> Vec<ReorderEvent<Id>> {
        let mut events = Vec::new();
        self.config.drag_disabled = disabled;
        if disabled && self.session.dragging_id().is_some() {
            self.end_implicitly(EndReason::Disabled, &mut events);
        }
        self.trace_events(&events);
        events
    }

    /// Tear down the container: stop every timer, end any drag and forget all
    /// measurements.
    pub fn unmount(&mut self) -> Vec<ReorderEvent<Id>> {
        let mut events = Vec::new();
        if self.session.dragging_id().is_some() {
            self.end_implicitly(EndReason::Unmounted, &mut events);
        } else if self.session.pending_drop_id().is_some() {
            self.finish_settle(&mut events);
        }
        self.autoscroll.stop();
        self.session.reset();
        self.settle = None;
        self.pointer = None;
        self.registry.clear();
        self.trace_events(&events);
        events
    }

    fn end<S>(&mut self, id: &Id, items: &S, reason: EndReason) -> Vec<ReorderEvent<Id>>
    where
        S: ItemSequence<Id> + ?Sized,
    {
        let mut events = Vec::new();
        self.check_dragged_present(items, &mut events);
        if !events.is_empty() {
            self.trace_events(&events);
            return events;
        }
        if !self.session.is_dragging(id) {
            events.push(ReorderEvent::Ignored {
                reason: IgnoreReason::NotDragging,
            });
            self.trace_events(&events);
            return events;
        }

        self.stop_autoscroll(&mut events);
        let residual = self.render_offset(id, items);
        self.pointer = None;
        if let Some(release) = self.session.release() {
            events.push(released(release, reason));
        }

        let settle = &self.config.settle;
        let spring = Spring::settle(residual)
            .with_stiffness(settle.stiffness)
            .with_damping(settle.damping);
        if settle.animate && !spring.is_complete() {
            self.settle = Some(spring);
        } else {
            self.finish_settle(&mut events);
        }

        self.trace_events(&events);
        events
    }

    fn end_implicitly(&mut self, reason: EndReason, events: &mut Vec<ReorderEvent<Id>>) {
        self.stop_autoscroll(events);
        self.pointer = None;
        self.settle = None;
        if let Some(release) = self.session.release() {
            events.push(released(release, reason));
        }
        self.session.reset();
    }

    fn check_dragged_present<S>(&mut self, items: &S, events: &mut Vec<ReorderEvent<Id>>)
    where
        S: ItemSequence<Id> + ?Sized,
    {
        let Some(dragging) = self.session.dragging_id() else {
            return;
        };
        let present = (0..items.len()).any(|i| items.id_at(i).as_ref() == Some(dragging));
        if !present {
            self.end_implicitly(EndReason::ItemRemoved, events);
        }
    }

    fn resolve_at<S>(&mut self, pointer: f64, items: &mut S, events: &mut Vec<ReorderEvent<Id>>)
    where
        S: ItemSequence<Id> + ?Sized,
    {
        let view = self.registry.view(items.ids());
        let resolution = self.resolver.resolve(&mut self.session, &view, pointer);
        drop(view);

        match resolution {
            Resolution::Swapped { neighbor, from, to } => {
                let Some(id) = self.session.dragging_id().cloned() else {
                    return;
                };
                // Walk one slot at a time; the last hop passes `neighbor`.
                let mut at = from;
                while at != to {
                    let next = if to > at { at + 1 } else { at - 1 };
                    let passed = items.id_at(next).unwrap_or_else(|| neighbor.clone());
                    items.move_item(at, next);
                    events.push(ReorderEvent::Moved {
                        id: id.clone(),
                        neighbor: passed,
                        from: at,
                        to: next,
                    });
                    at = next;
                }
            }
            Resolution::Suppressed { neighbor } => {
                events.push(ReorderEvent::SwapSuppressed { neighbor });
            }
            Resolution::Idle | Resolution::NoMatch => {}
        }
    }

    fn scroll_ticks<S>(
        &mut self,
        due: u32,
        viewport: &mut dyn ScrollViewport,
        items: &mut S,
        events: &mut Vec<ReorderEvent<Id>>,
    ) where
        S: ItemSequence<Id> + ?Sized,
    {
        for _ in 0..due {
            let Some(step) = self.autoscroll.step(viewport) else {
                break;
            };
            self.session.nudge_display_offset(step.display_delta);
            if let Some(pointer) = self.pointer.as_mut() {
                *pointer += step.applied;
                let pointer = *pointer;
                self.resolve_at(pointer, items, events);
            }
            if step.reached_limit {
                events.push(ReorderEvent::AutoScrollStopped {
                    reason: StopReason::ReachedLimit,
                });
                break;
            }
        }
    }

    fn stop_autoscroll(&mut self, events: &mut Vec<ReorderEvent<Id>>) {
        if self.autoscroll.stop() {
            events.push(ReorderEvent::AutoScrollStopped {
                reason: StopReason::DragEnded,
            });
        }
    }

    fn finish_settle(&mut self, events: &mut Vec<ReorderEvent<Id>>) {
        self.settle = None;
        if let Some(id) = self.session.finish_settle() {
            events.push(ReorderEvent::Settled { id });
        }
    }

    #[cfg(feature = "tracing")]
    fn trace_events(&self, events: &[ReorderEvent<Id>]) {
        for event in events {
            let _span = tracing::debug_span!(
                "dragsort.event",
                kind = event.kind(),
                phase = ?self.session.phase(),
                offset = self.session.display_offset(),
            )
            .entered();
            match event {
                ReorderEvent::Moved { id, from, to, .. } => {
                    tracing::debug!(target: "dragsort.engine", item = ?id, from, to, "item moved");
                }
                ReorderEvent::AutoScrollStarted { edge } => {
                    tracing::debug!(target: "dragsort.engine", edge = %edge, "autoscroll started");
                }
                ReorderEvent::Released { id, reason, .. } => {
                    tracing::debug!(target: "dragsort.engine", item = ?id, reason = ?reason, "drag released");
                }
                other => {
                    tracing::trace!(target: "dragsort.engine", event = ?other);
                }
            }
        }
    }

    #[cfg(not(feature = "tracing"))]
    #[inline]
    fn trace_events(&self, _events: &[ReorderEvent<Id>]) {}
}

fn released<Id>(release: DragRelease<Id>, reason: EndReason) -> ReorderEvent<Id> {
    ReorderEvent::Released {
        id: release.id,
        initial_index: release.initial_index,
        final_index: release.final_index,
        reason,
    }
}

fn push_autoscroll_change<Id>(change: AutoScrollChange, events: &mut Vec<ReorderEvent<Id>>) {
    match change {
        AutoScrollChange::Unchanged => {}
        AutoScrollChange::Started(edge) => {
            events.push(ReorderEvent::AutoScrollStarted { edge });
        }
        AutoScrollChange::Reversed(edge) => {
            events.push(ReorderEvent::AutoScrollStopped {
                reason: StopReason::LeftBand,
            });
            events.push(ReorderEvent::AutoScrollStarted { edge });
        }
        AutoScrollChange::Stopped(reason) => {
            events.push(ReorderEvent::AutoScrollStopped { reason });
        }
    }
}
