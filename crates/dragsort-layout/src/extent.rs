#![forbid(unsafe_code)]

//! Measured item span along the layout axis.

use std::fmt;

use dragsort_core::{Axis, Bounds};
use serde::Serialize;

/// An item's measured `[min, max]` along the axis.
///
/// Always `min <= max` with both bounds finite. A zero-span extent is valid
/// and contains exactly one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemExtent {
    min: f64,
    max: f64,
}

impl ItemExtent {
    /// Create an extent, rejecting inverted or non-finite bounds.
    pub fn new(min: f64, max: f64) -> Result<Self, ExtentError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ExtentError::NonFinite { min, max });
        }
        if min > max {
            return Err(ExtentError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Extent starting at `start` with length `span`.
    pub fn from_start(start: f64, span: f64) -> Result<Self, ExtentError> {
        Self::new(start, start + span)
    }

    /// Project a measured frame onto `axis`.
    pub fn from_bounds(axis: Axis, bounds: Bounds) -> Result<Self, ExtentError> {
        let (min, max) = axis.span_of(bounds);
        Self::new(min, max)
    }

    #[inline]
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`.
    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// `min <= pos <= max`.
    #[inline]
    #[must_use]
    pub fn contains(&self, pos: f64) -> bool {
        self.min <= pos && pos <= self.max
    }

    /// Whether `pos` lies in `[min, min + band)`, clipped to the extent.
    #[inline]
    #[must_use]
    pub fn in_start_band(&self, pos: f64, band: f64) -> bool {
        self.min <= pos && pos < self.min + band && pos <= self.max
    }

    /// Whether `pos` lies in `(max - band, max]`, clipped to the extent.
    #[inline]
    #[must_use]
    pub fn in_end_band(&self, pos: f64, band: f64) -> bool {
        self.max - band < pos && pos <= self.max && self.min <= pos
    }

    /// The same extent shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: f64) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// Rejected extent bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtentError {
    /// `min > max`.
    Inverted { min: f64, max: f64 },
    /// A bound was NaN or infinite.
    NonFinite { min: f64, max: f64 },
}

impl fmt::Display for ExtentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inverted { min, max } => write!(f, "inverted extent min={min} > max={max}"),
            Self::NonFinite { min, max } => write!(f, "non-finite extent min={min} max={max}"),
        }
    }
}

impl std::error::Error for ExtentError {}
