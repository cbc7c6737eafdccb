#![forbid(unsafe_code)]

//! Drag lifecycle state and rendering offset math.
//!
//! ```text
//! Idle -> Dragging -> Settling -> Idle
//!            \------------------> Idle (reset / item removed)
//! ```
//!
//! # Invariants
//!
//! 1. `dragging_id` is `Some` exactly while a gesture is in progress, and
//!    `initial_index` / `current_index` are `Some` exactly when it is.
//! 2. `pending_drop_id` is `Some` only while settling.
//! 3. [`DragSession::release`] and [`DragSession::reset`] are idempotent.
//!
//! # Offset correction
//!
//! The gesture origin stays where the drag began while the dragged item's
//! layout slot moves with every swap. The rendered offset therefore adds the
//! spans of every item hopped over, with sign opposite to the direction of
//! travel. See [`position_correction`].

use std::hash::Hash;

use dragsort_layout::LayoutView;

/// Coarse lifecycle phase, derived from the session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Settling,
}

/// What a release captured before clearing the drag state.
#[derive(Debug, Clone, PartialEq)]
pub struct DragRelease<Id> {
    pub id: Id,
    pub initial_index: usize,
    pub final_index: usize,
    /// Raw gesture translation at release.
    pub display_offset: f64,
}

/// Per-container drag state.
#[derive(Debug, Clone)]
pub struct DragSession<Id> {
    dragging_id: Option<Id>,
    initial_index: Option<usize>,
    current_index: Option<usize>,
    display_offset: f64,
    last_swapped_id: Option<Id>,
    pending_drop_id: Option<Id>,
}

impl<Id> Default for DragSession<Id> {
    fn default() -> Self {
        Self {
            dragging_id: None,
            initial_index: None,
            current_index: None,
            display_offset: 0.0,
            last_swapped_id: None,
            pending_drop_id: None,
        }
    }
}

impl<Id> DragSession<Id>
where
    Id: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.dragging_id.is_some() {
            DragPhase::Dragging
        } else if self.pending_drop_id.is_some() {
            DragPhase::Settling
        } else {
            DragPhase::Idle
        }
    }

    #[must_use]
    pub fn dragging_id(&self) -> Option<&Id> {
        self.dragging_id.as_ref()
    }

    #[must_use]
    pub fn initial_index(&self) -> Option<usize> {
        self.initial_index
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Raw translation along the axis (no hop correction).
    #[must_use]
    pub fn display_offset(&self) -> f64 {
        self.display_offset
    }

    #[must_use]
    pub fn last_swapped_id(&self) -> Option<&Id> {
        self.last_swapped_id.as_ref()
    }

    #[must_use]
    pub fn pending_drop_id(&self) -> Option<&Id> {
        self.pending_drop_id.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self, id: &Id) -> bool {
        self.dragging_id.as_ref() == Some(id)
    }

    #[must_use]
    pub fn is_pending_drop(&self, id: &Id) -> bool {
        self.pending_drop_id.as_ref() == Some(id)
    }

    /// Start dragging `id`, currently at `index`.
    ///
    /// Returns `false` (and changes nothing) if a drag is already active.
    /// A settle still in progress is abandoned.
    pub fn begin(&mut self, id: Id, index: usize) -> bool {
        if self.dragging_id.is_some() {
            return false;
        }
        self.pending_drop_id = None;
        self.dragging_id = Some(id);
        self.initial_index = Some(index);
        self.current_index = Some(index);
        self.display_offset = 0.0;
        self.last_swapped_id = None;
        true
    }

    /// Replace the raw translation. Ignored when not dragging.
    pub fn set_display_offset(&mut self, offset: f64) {
        if self.dragging_id.is_some() {
            self.display_offset = offset;
        }
    }

    /// Add to the raw translation. Ignored when not dragging.
    pub fn nudge_display_offset(&mut self, delta: f64) {
        if self.dragging_id.is_some() {
            self.display_offset += delta;
        }
    }

    /// Record a resolved swap with `neighbor`, now at `to`.
    pub fn record_swap(&mut self, neighbor: Id, to: usize) {
        if self.dragging_id.is_none() {
            return;
        }
        self.last_swapped_id = Some(neighbor);
        self.current_index = Some(to);
    }

    /// Forget the hysteresis neighbor.
    pub fn clear_last_swapped(&mut self) {
        self.last_swapped_id = None;
    }

    /// `Dragging -> Settling`. Returns `None` when not dragging.
    pub fn release(&mut self) -> Option<DragRelease<Id>> {
        let id = self.dragging_id.take()?;
        let initial_index = self.initial_index.take().unwrap_or_default();
        let final_index = self.current_index.take().unwrap_or(initial_index);
        let display_offset = std::mem::take(&mut self.display_offset);
        self.last_swapped_id = None;
        self.pending_drop_id = Some(id.clone());
        Some(DragRelease {
            id,
            initial_index,
            final_index,
            display_offset,
        })
    }

    /// `Settling -> Idle`. Returns the settled ID, if any.
    pub fn finish_settle(&mut self) -> Option<Id> {
        self.pending_drop_id.take()
    }

    /// Return to `Idle` from any phase. Returns `true` if anything changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.phase() != DragPhase::Idle;
        *self = Self::default();
        changed
    }

    /// Hop correction for the current drag, given the live sequence.
    #[must_use]
    pub fn correction(&self, view: &LayoutView<'_, Id>) -> f64 {
        match (self.initial_index, self.current_index) {
            (Some(initial), Some(current)) => position_correction(view, initial, current),
            _ => 0.0,
        }
    }

    /// Offset at which to render `id`: translation plus hop correction for
    /// the dragged item, zero for everything else.
    #[must_use]
    pub fn render_offset(&self, id: &Id, view: &LayoutView<'_, Id>) -> f64 {
        if self.is_dragging(id) {
            self.display_offset + self.correction(view)
        } else {
            0.0
        }
    }
}

/// Signed span sum of the items a drag hopped over.
///
/// Moving forward (`current > initial`) subtracts the spans at
/// `[initial, current)`; moving backward adds the spans at
/// `[current + 1, initial]`. Indices without a valid registry entry count as
/// zero.
#[must_use]
pub fn position_correction<Id>(view: &LayoutView<'_, Id>, initial: usize, current: usize) -> f64
where
    Id: Eq + Hash + Clone,
{
    use std::cmp::Ordering;

    match current.cmp(&initial) {
        Ordering::Equal => 0.0,
        Ordering::Greater => -(initial..current).map(|i| view.span_at(i)).sum::<f64>(),
        Ordering::Less => (current + 1..=initial).map(|i| view.span_at(i)).sum::<f64>(),
    }
}
