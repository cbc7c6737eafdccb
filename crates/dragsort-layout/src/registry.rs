#![forbid(unsafe_code)]

//! Per-container map from item identity to measured extent.
//!
//! [`LayoutRegistry`] is updated by the host on every layout pass and on
//! unmount. Drag logic never reads it directly: each tick it builds a
//! [`LayoutView`] joining the registry with the authoritative ordered ID list,
//! so an entry that outlives its item (unmount cleanup arrives after the item
//! left the sequence) is invisible to hit testing and offset math.
//!
//! # Invariants
//!
//! 1. `LayoutView::is_valid(id)` is membership in the authoritative list, not
//!    presence of an entry.
//! 2. `LayoutView::extent_for` and `LayoutView::entries` only yield valid IDs.
//! 3. `LayoutView::span_at` is `0.0` for indices without a valid entry.
//! 4. Scan order of `entries` is the authoritative order, so resolution is
//!    deterministic for a given snapshot.

use std::fmt;
use std::hash::Hash;

use dragsort_core::Axis;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::extent::{ExtentError, ItemExtent};
use crate::space::{CoordinateSpace, MeasuredFrame};

/// Measured extents for the items of one container.
#[derive(Debug, Clone)]
pub struct LayoutRegistry<Id> {
    space: CoordinateSpace,
    axis: Axis,
    extents: FxHashMap<Id, ItemExtent>,
}

impl<Id> LayoutRegistry<Id>
where
    Id: Eq + Hash + Clone,
{
    /// Empty registry for a container measured in `space` along `axis`.
    #[must_use]
    pub fn new(space: CoordinateSpace, axis: Axis) -> Self {
        Self {
            space,
            axis,
            extents: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn space(&self) -> &CoordinateSpace {
        &self.space
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Overwrite the extent for `id`.
    pub fn update(&mut self, id: Id, extent: ItemExtent) {
        self.extents.insert(id, extent);
    }

    /// Project a measured frame onto the registry axis and store it.
    pub fn update_frame(&mut self, id: Id, frame: &MeasuredFrame) -> Result<(), LayoutError> {
        if frame.space != self.space {
            return Err(LayoutError::ForeignCoordinateSpace {
                expected: self.space.clone(),
                found: frame.space.clone(),
            });
        }
        let extent = ItemExtent::from_bounds(self.axis, frame.bounds)?;
        self.update(id, extent);
        Ok(())
    }

    /// Drop the entry for an unmounted item.
    pub fn remove(&mut self, id: &Id) -> Option<ItemExtent> {
        self.extents.remove(id)
    }

    /// Raw lookup, without membership checking.
    #[must_use]
    pub fn extent_for(&self, id: &Id) -> Option<ItemExtent> {
        self.extents.get(id).copied()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.extents.clear();
    }

    /// Snapshot joined with the authoritative ordered IDs.
    ///
    /// Duplicate IDs keep their first index.
    pub fn view<I>(&self, ids: I) -> LayoutView<'_, Id>
    where
        I: IntoIterator<Item = Id>,
    {
        let order: Vec<Id> = ids.into_iter().collect();
        let mut index = FxHashMap::default();
        index.reserve(order.len());
        for (i, id) in order.iter().enumerate() {
            index.entry(id.clone()).or_insert(i);
        }
        LayoutView {
            registry: self,
            order,
            index,
        }
    }
}

/// Membership-checked view of a registry for one tick.
#[derive(Debug)]
pub struct LayoutView<'a, Id> {
    registry: &'a LayoutRegistry<Id>,
    order: Vec<Id>,
    index: FxHashMap<Id, usize>,
}

impl<Id> LayoutView<'_, Id>
where
    Id: Eq + Hash + Clone,
{
    /// Number of items in the authoritative sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` is in the authoritative sequence.
    #[must_use]
    pub fn is_valid(&self, id: &Id) -> bool {
        self.index.contains_key(id)
    }

    /// Index of `id` in the authoritative sequence.
    #[must_use]
    pub fn index_of(&self, id: &Id) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// ID at `index` in the authoritative sequence.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<&Id> {
        self.order.get(index)
    }

    /// Extent for a valid `id`; `None` if invalid or unmeasured.
    #[must_use]
    pub fn extent_for(&self, id: &Id) -> Option<ItemExtent> {
        if !self.is_valid(id) {
            return None;
        }
        self.registry.extent_for(id)
    }

    /// Span of the item at `index`, `0.0` when it has no valid entry.
    #[must_use]
    pub fn span_at(&self, index: usize) -> f64 {
        self.id_at(index)
            .and_then(|id| self.registry.extent_for(id))
            .map_or(0.0, |extent| extent.span())
    }

    /// Valid measured entries in authoritative order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Id, ItemExtent)> + '_ {
        self.order.iter().enumerate().filter_map(move |(i, id)| {
            // Duplicates resolve to their first index only.
            if self.index.get(id) != Some(&i) {
                return None;
            }
            self.registry.extent_for(id).map(|extent| (i, id, extent))
        })
    }

    /// Registry entries whose item is no longer in the sequence.
    pub fn stale_ids(&self) -> impl Iterator<Item = &Id> + '_ {
        self.registry
            .extents
            .keys()
            .filter(move |id| !self.index.contains_key(*id))
    }

    /// Serializable picture of this view, for diagnostics and golden tests.
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot<Id> {
        ViewSnapshot {
            space: self.registry.space.clone(),
            axis: match self.registry.axis {
                Axis::Vertical => "vertical",
                Axis::Horizontal => "horizontal",
            },
            entries: self
                .entries()
                .map(|(index, id, extent)| SnapshotEntry {
                    index,
                    id: id.clone(),
                    extent,
                })
                .collect(),
            stale: self.stale_ids().count(),
        }
    }
}

/// One valid entry in a [`ViewSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEntry<Id> {
    pub index: usize,
    pub id: Id,
    pub extent: ItemExtent,
}

/// Serializable state of a [`LayoutView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot<Id> {
    pub space: CoordinateSpace,
    pub axis: &'static str,
    pub entries: Vec<SnapshotEntry<Id>>,
    /// Count of entries kept alive only by pending unmount cleanup.
    pub stale: usize,
}

/// Rejected registry update.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Frame was measured in another container's space.
    ForeignCoordinateSpace {
        expected: CoordinateSpace,
        found: CoordinateSpace,
    },
    /// Frame projected to an invalid extent.
    Extent(ExtentError),
}

impl From<ExtentError> for LayoutError {
    fn from(err: ExtentError) -> Self {
        Self::Extent(err)
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForeignCoordinateSpace { expected, found } => {
                write!(f, "frame measured in space '{found}', expected '{expected}'")
            }
            Self::Extent(err) => write!(f, "invalid frame: {err}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Extent(err) => Some(err),
            Self::ForeignCoordinateSpace { .. } => None,
        }
    }
}
