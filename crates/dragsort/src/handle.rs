#![forbid(unsafe_code)]

//! Drag handle scoping.
//!
//! When any part of an item's content declares itself a drag handle, only
//! gestures from that handle move the item. The host computes the boolean
//! once per item while walking its content and passes it along with each
//! gesture sample.

/// Where a drag gesture originated within an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureSource {
    /// Anywhere on the item.
    #[default]
    Item,
    /// A sub-view that declared itself the drag handle.
    Handle,
}

/// Whether a gesture from `source` may drag an item.
#[inline]
#[must_use]
pub const fn accepts_gesture(source: GestureSource, item_declares_handle: bool) -> bool {
    match source {
        GestureSource::Handle => true,
        GestureSource::Item => !item_declares_handle,
    }
}

/// Accumulates handle declarations while the host walks one item's content.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandleScope {
    declared: bool,
}

impl HandleScope {
    #[must_use]
    pub const fn new() -> Self {
        Self { declared: false }
    }

    /// Record a handle. Returns `true` for the first declaration only; later
    /// ones render as ordinary content.
    pub fn declare(&mut self) -> bool {
        !std::mem::replace(&mut self.declared, true)
    }

    /// Whether the item has a handle.
    #[must_use]
    pub const fn declares_handle(&self) -> bool {
        self.declared
    }

    /// Gesture acceptance for this item.
    #[must_use]
    pub const fn accepts(&self, source: GestureSource) -> bool {
        accepts_gesture(source, self.declared)
    }
}
