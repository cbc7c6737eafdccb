#![forbid(unsafe_code)]

//! Drag-to-reorder for linear stacks of items.
//!
//! # Role in dragsort
//! `dragsort` is the engine crate. It owns one container's drag state and
//! turns gesture samples, layout measurements and frame ticks into
//! reorder operations on a caller-owned sequence.
//!
//! # Primary responsibilities
//! - **DragSession**: `Idle -> Dragging -> Settling` lifecycle and the hop
//!   correction that keeps the dragged item under the pointer.
//! - **IntersectionResolver**: pointer hit testing with swap-back hysteresis.
//! - **AutoScrollController**: edge scrolling of an enclosing viewport.
//! - **ReorderEngine**: composition root returning [`ReorderEvent`]s.
//!
//! # How it fits in the system
//! Geometry, axis projection, the spring and the ticker live in
//! `dragsort-core`; measured extents and the membership-checked registry view
//! live in `dragsort-layout`. Hosts drive everything through
//! [`ReorderEngine`] and never block: autoscroll and settling advance only
//! when the host calls [`ReorderEngine::on_frame`].
//!
//! # Example
//!
//! ```
//! use dragsort::{
//!     Bounds, CoordinateSpace, DragSample, Instant, MeasuredFrame, Point, ReorderConfig,
//!     ReorderEngine,
//! };
//!
//! let mut engine = ReorderEngine::new(ReorderConfig::default()).unwrap();
//! let mut items = vec!["a", "b", "c"];
//! for (i, id) in items.iter().enumerate() {
//!     let frame = MeasuredFrame::new(
//!         CoordinateSpace::default(),
//!         Bounds::new(0.0, i as f64 * 40.0, 200.0, 40.0),
//!     );
//!     engine.on_item_measured(*id, &frame).unwrap();
//! }
//!
//! let sample = DragSample::new(Point::new(10.0, 60.0), Point::new(10.0, 20.0));
//! engine.on_drag_changed(&"a", &sample, &mut items, None, Instant::now());
//! assert_eq!(items, vec!["b", "a", "c"]);
//! ```

pub mod autoscroll;
pub mod config;
pub mod engine;
pub mod handle;
pub mod resolver;
pub mod sequence;
pub mod session;

pub use autoscroll::{
    AutoScrollChange, AutoScrollController, Edge, ScrollState, ScrollStep, ScrollViewport,
    StopReason,
};
#[cfg(feature = "config-file")]
pub use config::ConfigLoadError;
pub use config::{AutoScrollConfig, ConfigError, ReorderConfig, SettleConfig};
pub use engine::{DragSample, EndReason, IgnoreReason, ReorderEngine, ReorderEvent};
pub use handle::{GestureSource, HandleScope, accepts_gesture};
pub use resolver::{IntersectionResolver, Resolution};
pub use sequence::{ItemSequence, KeyedSequence};
pub use session::{DragPhase, DragRelease, DragSession, position_correction};

pub use dragsort_core::{Axis, Bounds, Duration, Instant, Point, Size, Vector};
pub use dragsort_layout::{
    CoordinateSpace, ExtentError, ItemExtent, LayoutError, LayoutRegistry, LayoutView,
    MeasuredFrame,
};
