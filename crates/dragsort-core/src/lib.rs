#![forbid(unsafe_code)]

//! Core: geometry, axis projection, animation and tick primitives.
//!
//! # Role in dragsort
//! `dragsort-core` holds the stateless and clock-free building blocks the
//! layout registry and reorder engine are written against.
//!
//! # Primary responsibilities
//! - **Geometry**: `Point`, `Size`, `Vector`, `Bounds` in `f64` layout units.
//! - **Axis**: projection of 2D geometry onto the stacking axis.
//! - **Animation**: the spring that settles a released item.
//! - **Ticker**: a host-pumped, cancellable repeating task.

pub mod animation;
pub mod axis;
pub mod geometry;
pub mod ticker;

pub use axis::Axis;
pub use geometry::{Bounds, Point, Size, Vector};
pub use ticker::{TickTicket, Ticker};

/// Re-exported so hosts can pass timestamps without depending on `web-time`.
pub use web_time::{Duration, Instant};
