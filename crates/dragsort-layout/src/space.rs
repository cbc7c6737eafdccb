#![forbid(unsafe_code)]

//! Named coordinate spaces and frames measured in them.

use std::fmt;

use dragsort_core::Bounds;
use serde::Serialize;

/// Name of the coordinate space one container measures its items in.
///
/// Nested containers use distinct names so a measurement routed to the wrong
/// registry is rejected instead of silently mixing coordinate systems.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CoordinateSpace(String);

impl CoordinateSpace {
    /// Create a named space.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The space name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self::new("reorderable")
    }
}

impl fmt::Display for CoordinateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 2D frame reported by a layout pass, tagged with its space.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredFrame {
    pub space: CoordinateSpace,
    pub bounds: Bounds,
}

impl MeasuredFrame {
    /// Create a frame measured in `space`.
    #[must_use]
    pub fn new(space: CoordinateSpace, bounds: Bounds) -> Self {
        Self { space, bounds }
    }
}
