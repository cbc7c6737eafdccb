#![forbid(unsafe_code)]

//! Edge autoscroll for an enclosing viewport.
//!
//! While the pointer sits in a band at either end of the viewport's visible
//! bounds, a [`Ticker`] repeatedly scrolls the viewport toward that edge. The
//! engine re-runs hit testing after every step with the pointer shifted by the
//! applied scroll distance.
//!
//! # Invariants
//!
//! 1. At most one ticker runs per controller.
//! 2. A step never scrolls outside `[0, content - visible]`.
//! 3. The ticker stops on the step that reaches the limit, so a pinned pointer
//!    always terminates.

use std::fmt;

use dragsort_core::{Axis, Bounds, Instant, Point, TickTicket, Ticker};

use crate::config::AutoScrollConfig;

/// Scrollable viewport geometry plus the ability to scroll it.
pub trait ScrollViewport {
    /// Visible region, in the viewport's coordinate space.
    fn visible_bounds(&self) -> Bounds;

    /// Full scrollable content.
    fn content_bounds(&self) -> Bounds;

    /// Current scroll offset.
    fn scroll_offset(&self) -> Point;

    /// Scroll so the offset becomes `offset`.
    fn scroll_to(&mut self, offset: Point);
}

/// Plain viewport state for hosts that keep the scroll position themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub visible: Bounds,
    pub content: Bounds,
    pub offset: Point,
}

impl ScrollState {
    #[must_use]
    pub const fn new(visible: Bounds, content: Bounds, offset: Point) -> Self {
        Self {
            visible,
            content,
            offset,
        }
    }
}

impl ScrollViewport for ScrollState {
    fn visible_bounds(&self) -> Bounds {
        self.visible
    }

    fn content_bounds(&self) -> Bounds {
        self.content
    }

    fn scroll_offset(&self) -> Point {
        self.offset
    }

    fn scroll_to(&mut self, offset: Point) {
        self.offset = offset;
    }
}

/// Viewport end the scroll heads toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

impl Edge {
    /// Sign of the scroll direction.
    #[must_use]
    pub const fn direction(self) -> f64 {
        match self {
            Self::Start => -1.0,
            Self::End => 1.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the autoscroll ticker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Pointer left the edge band, or the edge became unscrollable.
    LeftBand,
    /// Scrolling hit the start or end of the content.
    ReachedLimit,
    /// The drag ended, was cancelled, or the container went away.
    DragEnded,
}

/// Result of checking the pointer against the edge bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScrollChange {
    Unchanged,
    Started(Edge),
    /// The ticker switched edges: stopped, then started toward the new edge.
    Reversed(Edge),
    Stopped(StopReason),
}

/// One applied scroll step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollStep {
    pub edge: Edge,
    /// Distance actually scrolled along the axis (after clamping).
    pub applied: f64,
    /// Amount to add to the dragged item's display offset. Zero on the step
    /// that hits the limit.
    pub display_delta: f64,
    /// Offset along the axis after the step.
    pub offset: f64,
    pub reached_limit: bool,
}

/// Drives edge scrolling during a drag.
#[derive(Debug, Clone)]
pub struct AutoScrollController {
    config: AutoScrollConfig,
    axis: Axis,
    ticker: Ticker,
    /// Run owned by this controller; only it can stop the ticker.
    run: Option<TickTicket>,
    edge: Option<Edge>,
    last_pointer: Option<f64>,
}

impl AutoScrollController {
    #[must_use]
    pub fn new(config: AutoScrollConfig, axis: Axis) -> Self {
        let ticker = Ticker::new(config.interval());
        Self {
            config,
            axis,
            ticker,
            run: None,
            edge: None,
            last_pointer: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AutoScrollConfig {
        &self.config
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Edge the running ticker heads toward.
    #[must_use]
    pub fn edge(&self) -> Option<Edge> {
        self.edge.filter(|_| self.ticker.is_running())
    }

    /// Ticket of the running scroll, if any. Each start or reversal mints a
    /// new one.
    #[must_use]
    pub fn ticket(&self) -> Option<TickTicket> {
        self.run.filter(|_| self.ticker.is_running())
    }

    /// Whether `viewport_pos` differs from the last observed pointer.
    #[must_use]
    pub fn pointer_moved(&self, viewport_pos: f64) -> bool {
        self.last_pointer != Some(viewport_pos)
    }

    /// Band the pointer is in, if scrolling toward it is possible.
    #[must_use]
    pub fn edge_for(&self, viewport_pos: f64, viewport: &dyn ScrollViewport) -> Option<Edge> {
        let (start, end) = self.axis.span_of(viewport.visible_bounds());
        let offset = self.axis.project_point(viewport.scroll_offset());
        let band = self.config.edge_band;
        if viewport_pos < start + band && offset > 0.0 {
            Some(Edge::Start)
        } else if viewport_pos > end - band && offset < self.max_offset(viewport) {
            Some(Edge::End)
        } else {
            None
        }
    }

    /// Check the pointer (viewport space) against the edge bands and start,
    /// reverse, or stop the ticker.
    pub fn observe(
        &mut self,
        viewport_pos: f64,
        viewport: &dyn ScrollViewport,
        now: Instant,
    ) -> AutoScrollChange {
        self.last_pointer = Some(viewport_pos);
        if !self.config.enabled {
            return AutoScrollChange::Unchanged;
        }
        match (self.edge(), self.edge_for(viewport_pos, viewport)) {
            (None, None) => AutoScrollChange::Unchanged,
            (Some(_), None) => {
                self.halt();
                AutoScrollChange::Stopped(StopReason::LeftBand)
            }
            (None, Some(edge)) => {
                self.launch(edge, now);
                AutoScrollChange::Started(edge)
            }
            (Some(running), Some(edge)) if running == edge => AutoScrollChange::Unchanged,
            (Some(_), Some(edge)) => {
                self.halt();
                self.launch(edge, now);
                AutoScrollChange::Reversed(edge)
            }
        }
    }

    /// Ticks due at `now`.
    pub fn poll(&mut self, now: Instant) -> u32 {
        self.ticker.poll(now)
    }

    /// Scroll one step toward the current edge. Returns `None` when not
    /// running.
    pub fn step(&mut self, viewport: &mut dyn ScrollViewport) -> Option<ScrollStep> {
        let edge = self.edge()?;
        let current = viewport.scroll_offset();
        let from = self.axis.project_point(current);
        let max = self.max_offset(viewport);
        let target = from + edge.direction() * self.config.speed;
        let clamped = target.clamp(0.0, max);
        viewport.scroll_to(self.axis.to_point(clamped, current));

        let hit = clamped != target;
        let at_limit = match edge {
            Edge::Start => clamped <= 0.0,
            Edge::End => clamped >= max,
        };
        if at_limit {
            self.halt();
        }
        Some(ScrollStep {
            edge,
            applied: clamped - from,
            display_delta: if hit { 0.0 } else { target - from },
            offset: clamped,
            reached_limit: at_limit,
        })
    }

    /// Stop scrolling. Returns `true` if the ticker was running.
    pub fn stop(&mut self) -> bool {
        self.last_pointer = None;
        self.halt()
    }

    fn launch(&mut self, edge: Edge, now: Instant) {
        self.edge = Some(edge);
        self.run = self.ticker.start(now);
    }

    fn halt(&mut self) -> bool {
        self.edge = None;
        self.run
            .take()
            .is_some_and(|ticket| self.ticker.stop_ticket(ticket))
    }

    fn max_offset(&self, viewport: &dyn ScrollViewport) -> f64 {
        let content = self.axis.project_size(viewport.content_bounds().size);
        let visible = self.axis.project_size(viewport.visible_bounds().size);
        (content - visible).max(0.0)
    }
}
