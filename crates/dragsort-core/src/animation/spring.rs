#![forbid(unsafe_code)]

//! Damped spring used to settle a released item back into its slot.
//!
//! The spring integrates `a = -k (x - target) - c v` with semi-implicit
//! Euler steps. Positions are in layout units and are never clamped, so the
//! same type animates a residual drag offset of any sign toward zero.
//!
//! # Invariants
//!
//! 1. Once at rest the spring stays put until [`Spring::retarget`] or
//!    [`Animation::reset`] wakes it.
//! 2. Stiffness is at least [`MIN_STIFFNESS`]; damping is never negative.
//! 3. Frame deltas larger than [`MAX_STEP`] are split into sub-steps.

use std::time::Duration;

use super::Animation;

/// Largest single integration step.
pub const MAX_STEP: Duration = Duration::from_millis(4);

/// Lower bound applied to stiffness.
pub const MIN_STIFFNESS: f64 = 0.1;

/// Default stiffness (snappy, slight overshoot).
pub const DEFAULT_STIFFNESS: f64 = 170.0;

/// Default damping.
pub const DEFAULT_DAMPING: f64 = 26.0;

/// Distance to target under which the spring may come to rest.
const REST_DISTANCE: f64 = 0.01;

/// Speed under which the spring may come to rest.
const REST_SPEED: f64 = 0.05;

/// Damped harmonic oscillator over a scalar position.
#[derive(Debug, Clone)]
pub struct Spring {
    initial: f64,
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring from `initial` toward `target` with default parameters.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            initial,
            position: initial,
            velocity: 0.0,
            target,
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
            at_rest: (initial - target).abs() < REST_DISTANCE,
        }
    }

    /// Spring from `offset` back to zero.
    #[must_use]
    pub fn settle(offset: f64) -> Self {
        Self::new(offset, 0.0)
    }

    /// Set stiffness (builder). Clamped to [`MIN_STIFFNESS`].
    #[must_use]
    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder). Clamped to zero.
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping.max(0.0);
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Move the target and wake the spring if the target actually changed.
    pub fn retarget(&mut self, target: f64) {
        if (self.target - target).abs() >= REST_DISTANCE {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Jump straight to the target and stop.
    pub fn finish(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        let accel = -self.stiffness * (self.position - self.target) - self.damping * self.velocity;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
    }

    fn advance(&mut self, dt: Duration) {
        if self.at_rest || dt.is_zero() {
            return;
        }
        let max_step = MAX_STEP.as_secs_f64();
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let h = remaining.min(max_step);
            self.step(h);
            remaining -= h;
        }
        if (self.position - self.target).abs() < REST_DISTANCE && self.velocity.abs() < REST_SPEED
        {
            self.finish();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = (self.initial - self.target).abs() < REST_DISTANCE;
    }
}
