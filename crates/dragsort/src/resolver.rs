#![forbid(unsafe_code)]

//! Pointer-to-neighbor hit testing with swap-back hysteresis.
//!
//! # Algorithm
//!
//! 1. Without an active drag, nothing happens.
//! 2. The first valid, measured, non-dragged entry (authoritative order)
//!    whose extent contains the pointer is the candidate.
//! 3. No candidate clears the remembered neighbor.
//! 4. A candidate equal to the remembered neighbor is suppressed while the
//!    pointer sits in its edge band: `[min, min + band)` when the dragged item
//!    is after the neighbor, `(max - band, max]` otherwise.
//! 5. Anything else is a swap: the session advances to the neighbor's index
//!    and the caller is told `from -> to`.
//!
//! Extents are re-read every call, so a neighbor whose size is still
//! animating after a swap is tested against its live geometry.

use std::hash::Hash;

use dragsort_layout::LayoutView;

use crate::session::DragSession;

/// Outcome of one resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<Id> {
    /// No drag in progress.
    Idle,
    /// Pointer is over no sibling.
    NoMatch,
    /// Pointer is over the just-swapped neighbor's hysteresis band.
    Suppressed { neighbor: Id },
    /// Swap with `neighbor`; the dragged item moves `from -> to`.
    Swapped { neighbor: Id, from: usize, to: usize },
}

impl<Id> Resolution<Id> {
    /// The move to report, if this is a swap.
    #[must_use]
    pub fn as_move(&self) -> Option<(usize, usize)> {
        match self {
            Self::Swapped { from, to, .. } => Some((*from, *to)),
            _ => None,
        }
    }
}

/// Decides whether the dragged item swaps with a neighbor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionResolver {
    hysteresis_band: f64,
}

impl IntersectionResolver {
    #[must_use]
    pub fn new(hysteresis_band: f64) -> Self {
        Self {
            hysteresis_band: hysteresis_band.max(0.0),
        }
    }

    #[must_use]
    pub fn hysteresis_band(&self) -> f64 {
        self.hysteresis_band
    }

    /// Resolve `pointer` (stack-space scalar) against `view`, updating the
    /// session's hysteresis neighbor and current index.
    pub fn resolve<Id>(
        &self,
        session: &mut DragSession<Id>,
        view: &LayoutView<'_, Id>,
        pointer: f64,
    ) -> Resolution<Id>
    where
        Id: Eq + Hash + Clone,
    {
        let (Some(dragging), Some(current)) = (session.dragging_id(), session.current_index())
        else {
            return Resolution::Idle;
        };

        let candidate = view
            .entries()
            .find(|(_, id, extent)| *id != dragging && extent.contains(pointer));

        let Some((neighbor_index, neighbor, extent)) = candidate else {
            session.clear_last_swapped();
            return Resolution::NoMatch;
        };
        let neighbor = neighbor.clone();

        if session.last_swapped_id() == Some(&neighbor) {
            let in_band = if current > neighbor_index {
                extent.in_start_band(pointer, self.hysteresis_band)
            } else {
                extent.in_end_band(pointer, self.hysteresis_band)
            };
            if in_band {
                return Resolution::Suppressed { neighbor };
            }
        }

        session.record_swap(neighbor.clone(), neighbor_index);
        Resolution::Swapped {
            neighbor,
            from: current,
            to: neighbor_index,
        }
    }
}

impl Default for IntersectionResolver {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HYSTERESIS_BAND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragsort_core::Axis;
    use dragsort_layout::{CoordinateSpace, ItemExtent, LayoutRegistry};

    fn stacked(spans: &[(&'static str, f64)]) -> LayoutRegistry<&'static str> {
        let mut reg = LayoutRegistry::new(CoordinateSpace::default(), Axis::Vertical);
        let mut start = 0.0;
        for &(id, span) in spans {
            reg.update(id, ItemExtent::from_start(start, span).unwrap());
            start += span;
        }
        reg
    }

    #[test]
    fn idle_session_resolves_nothing() {
        let reg = stacked(&[("a", 100.0), ("b", 100.0)]);
        let view = reg.view(["a", "b"]);
        let mut session = DragSession::new();
        let res = IntersectionResolver::default().resolve(&mut session, &view, 150.0);
        assert_eq!(res, Resolution::Idle);
    }

    #[test]
    fn overlap_swaps_with_neighbor() {
        let reg = stacked(&[("a", 100.0), ("b", 100.0)]);
        let view = reg.view(["a", "b"]);
        let mut session = DragSession::new();
        session.begin("a", 0);
        let res = IntersectionResolver::default().resolve(&mut session, &view, 150.0);
        assert_eq!(
            res,
            Resolution::Swapped {
                neighbor: "b",
                from: 0,
                to: 1
            }
        );
        assert_eq!(res.as_move(), Some((0, 1)));
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(session.last_swapped_id(), Some(&"b"));
    }

    #[test]
    fn own_extent_never_matches() {
        let reg = stacked(&[("a", 100.0), ("b", 100.0)]);
        let view = reg.view(["a", "b"]);
        let mut session = DragSession::new();
        session.begin("a", 0);
        let res = IntersectionResolver::default().resolve(&mut session, &view, 50.0);
        assert_eq!(res, Resolution::NoMatch);
    }

    #[test]
    fn no_match_clears_last_swapped() {
        let reg = stacked(&[("a", 100.0), ("b", 100.0)]);
        let view = reg.view(["a", "b"]);
        let mut session = DragSession::new();
        session.begin("a", 0);
        session.record_swap("b", 0);
        IntersectionResolver::default().resolve(&mut session, &view, 500.0);
        assert_eq!(session.last_swapped_id(), None);
    }

    #[test]
    fn stale_entry_never_matches() {
        let reg = stacked(&[("a", 100.0), ("gone", 100.0), ("c", 100.0)]);
        let view = reg.view(["a", "c"]);
        let mut session = DragSession::new();
        session.begin("a", 0);
        let res = IntersectionResolver::default().resolve(&mut session, &view, 150.0);
        assert_eq!(res, Resolution::NoMatch);
    }

    #[test]
    fn hysteresis_backward_band_is_near_min() {
        // "a" swapped forward past "b"; b's extent has not moved yet.
        let reg = stacked(&[("a", 100.0), ("b", 100.0)]);
        let view = reg.view(["b", "a"]);
        let mut session = DragSession::new();
        session.begin("a", 0);
        session.record_swap("b", 1);
        let resolver = IntersectionResolver::new(64.0);

        let res = resolver.resolve(&mut session, &view, 150.0);
        assert_eq!(res, Resolution::Suppressed { neighbor: "b" });
        assert_eq!(session.current_index(), Some(1));

        let res = resolver.resolve(&mut session, &view, 170.0);
        assert_eq!(res.as_move(), Some((1, 0)));
    }

    #[test]
    fn hysteresis_forward_band_is_near_max() {
        let reg = stacked(&[("b", 100.0), ("a", 100.0)]);
        let view = reg.view(["a", "b"]);
        let mut session = DragSession::new();
        session.begin("a", 1);
        session.record_swap("b", 0);
        let resolver = IntersectionResolver::new(64.0);

        // "a" swapped backward past "b"; b still measures [0, 100].
        let res = resolver.resolve(&mut session, &view, 80.0);
        assert_eq!(res, Resolution::Suppressed { neighbor: "b" });

        let res = resolver.resolve(&mut session, &view, 20.0);
        assert_eq!(res.as_move(), Some((0, 1)));
    }

    #[test]
    fn different_neighbor_ignores_hysteresis() {
        let reg = stacked(&[("a", 100.0), ("b", 100.0), ("c", 100.0)]);
        let view = reg.view(["b", "a", "c"]);
        let mut session = DragSession::new();
        session.begin("a", 0);
        session.record_swap("b", 1);
        let res = IntersectionResolver::new(64.0).resolve(&mut session, &view, 210.0);
        assert_eq!(res.as_move(), Some((1, 2)));
        assert_eq!(session.last_swapped_id(), Some(&"c"));
    }

    #[test]
    fn zero_span_neighbor_matches_at_its_point() {
        let mut reg = stacked(&[("a", 100.0)]);
        reg.update("thin", ItemExtent::new(100.0, 100.0).unwrap());
        let view = reg.view(["a", "thin"]);
        let mut session = DragSession::new();
        session.begin("a", 0);
        let res = IntersectionResolver::default().resolve(&mut session, &view, 100.0);
        // "a" also contains 100.0 but is the dragged item.
        assert_eq!(res.as_move(), Some((0, 1)));
    }

    #[test]
    fn negative_band_clamped() {
        assert_eq!(IntersectionResolver::new(-5.0).hysteresis_band(), 0.0);
    }
}
