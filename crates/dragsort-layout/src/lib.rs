#![forbid(unsafe_code)]

//! Item extents and the per-container layout registry.
//!
//! The host feeds measured frames in; the reorder engine reads a
//! membership-checked [`LayoutView`] out, once per tick.

pub mod extent;
pub mod registry;
pub mod space;

pub use extent::{ExtentError, ItemExtent};
pub use registry::{LayoutError, LayoutRegistry, LayoutView, SnapshotEntry, ViewSnapshot};
pub use space::{CoordinateSpace, MeasuredFrame};
