#![forbid(unsafe_code)]

//! Frame-driven animations.
//!
//! Animations here are advanced explicitly by the host with a frame delta;
//! nothing owns a clock. This keeps drag settling deterministic under test.

pub mod spring;

use std::time::Duration;

pub use spring::Spring;

/// A value that evolves over time when ticked.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its resting state.
    fn is_complete(&self) -> bool;

    /// Current animated value in caller units.
    fn value(&self) -> f64;

    /// Return to the initial state.
    fn reset(&mut self);
}
