#![forbid(unsafe_code)]

//! Host-pumped fixed-interval ticker.
//!
//! [`Ticker`] is a cancellable repeating task without a thread. The host polls
//! it from whatever clock it already has (frame callback, event loop timer)
//! and receives the number of intervals that elapsed since the last fire.
//!
//! # Invariants
//!
//! 1. `start` while running and `stop` while stopped are no-ops.
//! 2. Every start mints a new [`TickTicket`]; a ticket from a previous run
//!    never matches the current one.
//! 3. A stopped ticker reports zero due ticks.
//! 4. A single poll reports at most [`MAX_CATCH_UP`] ticks so a stalled host
//!    cannot trigger an unbounded burst.

use web_time::{Duration, Instant};

/// Upper bound on ticks reported by a single [`Ticker::poll`].
pub const MAX_CATCH_UP: u32 = 8;

/// Shortest allowed interval.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Identity of one start..stop run of a [`Ticker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickTicket(u64);

impl TickTicket {
    /// Raw run number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Run {
    ticket: TickTicket,
    next_due: Instant,
}

/// A repeating task the host drives by polling.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    run: Option<Run>,
    runs_started: u64,
}

impl Ticker {
    /// Create a stopped ticker. Intervals under 1 ms are raised to 1 ms.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            run: None,
            runs_started: 0,
        }
    }

    /// Configured interval.
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a run is in progress.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Ticket of the current run, if any.
    #[must_use]
    pub fn ticket(&self) -> Option<TickTicket> {
        self.run.map(|run| run.ticket)
    }

    /// Start a run whose first tick is due one interval after `now`.
    ///
    /// Returns the new ticket, or `None` if already running.
    pub fn start(&mut self, now: Instant) -> Option<TickTicket> {
        if self.run.is_some() {
            return None;
        }
        self.runs_started = self.runs_started.wrapping_add(1);
        let ticket = TickTicket(self.runs_started);
        self.run = Some(Run {
            ticket,
            next_due: now + self.interval,
        });
        Some(ticket)
    }

    /// Stop the current run. Returns `true` if a run was stopped.
    pub fn stop(&mut self) -> bool {
        self.run.take().is_some()
    }

    /// Stop only if `ticket` names the current run.
    pub fn stop_ticket(&mut self, ticket: TickTicket) -> bool {
        if self.ticket() == Some(ticket) {
            self.run = None;
            true
        } else {
            false
        }
    }

    /// Number of ticks that came due at or before `now`, capped at
    /// [`MAX_CATCH_UP`]. Advances the schedule past the reported ticks.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let interval = self.interval;
        let Some(run) = self.run.as_mut() else {
            return 0;
        };
        let mut due = 0;
        while run.next_due <= now && due < MAX_CATCH_UP {
            run.next_due += interval;
            due += 1;
        }
        if due == MAX_CATCH_UP && run.next_due <= now {
            // Drop the backlog instead of replaying it later.
            run.next_due = now + interval;
        }
        due
    }
}
