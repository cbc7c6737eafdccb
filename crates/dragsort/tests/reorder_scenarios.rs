#![forbid(unsafe_code)]

//! End-to-end drag scenarios against the public engine API.
//!
//! Each test plays the host: it measures items in their current order,
//! feeds gesture samples and frame ticks, and applies moves through the
//! `Vec` sequence.
//!
//! Run:
//!   cargo test -p dragsort --test reorder_scenarios

use dragsort::{
    Axis, Bounds, CoordinateSpace, DragPhase, DragSample, Duration, Edge, EndReason, Instant,
    MeasuredFrame, Point, ReorderConfig, ReorderEngine, ReorderEvent, ScrollState, ScrollViewport,
    StopReason, Vector, position_correction,
};

type Engine = ReorderEngine<&'static str>;

const FRAME: Duration = Duration::from_millis(16);

// ── Helpers ─────────────────────────────────────────────────────────────

fn engine() -> Engine {
    ReorderEngine::new(ReorderConfig::default()).expect("default config is valid")
}

/// Measure `items` stacked contiguously from 0 in their current order.
fn relayout(engine: &mut Engine, items: &[&'static str], span: fn(&str) -> f64) {
    let space = CoordinateSpace::default();
    let mut y = 0.0;
    for &id in items {
        let h = span(id);
        let frame = MeasuredFrame::new(space.clone(), Bounds::new(0.0, y, 320.0, h));
        engine.on_item_measured(id, &frame).expect("same space");
        y += h;
    }
}

fn uniform(_: &str) -> f64 {
    100.0
}

fn drag_to(start: f64, to: f64) -> DragSample {
    DragSample::new(Point::new(10.0, to), Point::new(10.0, start))
}

fn moves(events: &[ReorderEvent<&'static str>]) -> Vec<(usize, usize)> {
    events.iter().filter_map(ReorderEvent::as_move).collect()
}

fn settle(engine: &mut Engine, items: &mut Vec<&'static str>, now: Instant) -> bool {
    for _ in 0..500 {
        let events = engine.on_frame(now, FRAME, items, None);
        if events.iter().any(|e| matches!(e, ReorderEvent::Settled { .. })) {
            return true;
        }
    }
    false
}

// ═════════════════════════════════════════════════════════════════════════
// Move emission
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn continuous_drag_emits_adjacent_chain() {
    let mut engine = engine();
    let mut items = vec!["a0", "a1", "a2", "a3", "a4"];
    relayout(&mut engine, &items, uniform);
    let now = Instant::now();

    let mut all = Vec::new();
    let mut y = 50.0;
    while y <= 350.0 {
        let events = engine.on_drag_changed(&"a0", &drag_to(50.0, y), &mut items, None, now);
        all.extend(moves(&events));
        relayout(&mut engine, &items, uniform);
        y += 10.0;
    }

    assert_eq!(all, vec![(0, 1), (1, 2), (2, 3)]);
    assert_eq!(items, vec!["a1", "a2", "a3", "a0", "a4"]);
}

#[test]
fn jump_past_several_siblings_emits_adjacent_chain() {
    let mut engine = engine();
    let mut items = vec!["a0", "a1", "a2", "a3", "a4"];
    relayout(&mut engine, &items, uniform);

    let events = engine.on_drag_changed(&"a0", &drag_to(50.0, 350.0), &mut items, None, Instant::now());
    assert_eq!(moves(&events), vec![(0, 1), (1, 2), (2, 3)]);
    let passed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ReorderEvent::Moved { neighbor, .. } => Some(*neighbor),
            _ => None,
        })
        .collect();
    assert_eq!(passed, vec!["a1", "a2", "a3"]);
    assert_eq!(items, vec!["a1", "a2", "a3", "a0", "a4"]);
    assert_eq!(engine.session().current_index(), Some(3));
    assert_eq!(engine.session().last_swapped_id(), Some(&"a3"));

    // Back up past two siblings in one sample.
    relayout(&mut engine, &items, uniform);
    let events = engine.on_drag_changed(&"a0", &drag_to(50.0, 120.0), &mut items, None, Instant::now());
    assert_eq!(moves(&events), vec![(3, 2), (2, 1)]);
    assert_eq!(items, vec!["a1", "a0", "a2", "a3", "a4"]);
}

#[test]
fn one_swap_per_sample() {
    let mut engine = engine();
    let mut items = vec!["a0", "a1", "a2"];
    relayout(&mut engine, &items, uniform);
    let events = engine.on_drag_changed(&"a0", &drag_to(50.0, 150.0), &mut items, None, Instant::now());
    assert_eq!(moves(&events).len(), 1);
    assert_eq!(
        events.last(),
        Some(&ReorderEvent::Moved {
            id: "a0",
            neighbor: "a1",
            from: 0,
            to: 1
        })
    );
}

// ═════════════════════════════════════════════════════════════════════════
// Hysteresis
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn swap_back_suppressed_inside_band() {
    let mut engine = engine();
    let mut items = vec!["A", "B", "C"];
    relayout(&mut engine, &items, uniform);
    let now = Instant::now();

    let events = engine.on_drag_changed(&"A", &drag_to(50.0, 150.0), &mut items, None, now);
    assert_eq!(moves(&events), vec![(0, 1)]);
    assert_eq!(items, vec!["B", "A", "C"]);

    // B has not been re-measured; the pointer sits in [100, 164).
    for y in [150.0, 155.0, 160.0, 163.0] {
        let events = engine.on_drag_changed(&"A", &drag_to(50.0, y), &mut items, None, now);
        assert!(moves(&events).is_empty(), "swap at {y}");
        assert!(events.contains(&ReorderEvent::SwapSuppressed { neighbor: "B" }));
    }

    let events = engine.on_drag_changed(&"A", &drag_to(50.0, 170.0), &mut items, None, now);
    assert_eq!(moves(&events), vec![(1, 0)]);
    assert_eq!(items, vec!["A", "B", "C"]);
}

#[test]
fn different_neighbor_swaps_despite_band() {
    let mut engine = engine();
    let mut items = vec!["A", "B", "C"];
    relayout(&mut engine, &items, uniform);
    let now = Instant::now();

    engine.on_drag_changed(&"A", &drag_to(50.0, 150.0), &mut items, None, now);
    let events = engine.on_drag_changed(&"A", &drag_to(50.0, 210.0), &mut items, None, now);
    assert_eq!(moves(&events), vec![(1, 2)]);
    assert_eq!(items, vec!["B", "C", "A"]);
}

// ═════════════════════════════════════════════════════════════════════════
// Offset correction and validity filtering
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn dragged_item_stays_under_pointer() {
    let mut engine = engine();
    let mut items = vec!["a0", "a1", "a2"];
    relayout(&mut engine, &items, uniform);
    let now = Instant::now();

    engine.on_drag_changed(&"a0", &drag_to(50.0, 150.0), &mut items, None, now);
    relayout(&mut engine, &items, uniform);

    // Slot moved down by 100; raw translation is 100; rendered offset is 0.
    assert_eq!(engine.render_offset(&"a0", &items), 0.0);
    assert_eq!(engine.render_offset(&"a1", &items), 0.0);
}

#[test]
fn stale_entry_never_matches_or_counts() {
    let mut engine = engine();
    let mut items = vec!["a", "ghost", "b"];
    relayout(&mut engine, &items, uniform);
    // "ghost" left the sequence but its unmount callback has not run yet.
    items.retain(|id| *id != "ghost");
    let now = Instant::now();

    let events = engine.on_drag_changed(&"a", &drag_to(50.0, 150.0), &mut items, None, now);
    assert!(moves(&events).is_empty());
    assert_eq!(items, vec!["a", "b"]);

    // Had "a" hopped past "b", only b's span would count.
    assert_eq!(engine.registry().len(), 3);
    let view = engine.registry().view(["b", "a"]);
    assert_eq!(view.stale_ids().collect::<Vec<_>>(), vec![&"ghost"]);
    assert_eq!(position_correction(&view, 0, 1), -100.0);
}

// ═════════════════════════════════════════════════════════════════════════
// Autoscroll
// ═════════════════════════════════════════════════════════════════════════

fn viewport(offset: f64) -> ScrollState {
    ScrollState::new(
        Bounds::new(0.0, 0.0, 320.0, 400.0),
        Bounds::new(0.0, 0.0, 320.0, 1000.0),
        Point::new(0.0, offset),
    )
}

#[test]
fn pinned_pointer_scrolls_to_start_then_halts() {
    let mut engine = engine();
    let mut items = vec!["a", "b"];
    relayout(&mut engine, &items, uniform);
    let mut vp = viewport(5.0);
    let t0 = Instant::now();

    let sample = drag_to(50.0, 60.0).with_viewport_location(Point::new(10.0, 10.0));
    let events = engine.on_drag_changed(&"a", &sample, &mut items, Some(&mut vp), t0);
    assert!(events.contains(&ReorderEvent::AutoScrollStarted { edge: Edge::Start }));

    let mut offsets = vec![vp.scroll_offset().y];
    let mut stopped = false;
    for tick in 1..=20u64 {
        let now = t0 + Duration::from_millis(10 * tick);
        let events = engine.on_frame(now, FRAME, &mut items, Some(&mut vp));
        if events.contains(&ReorderEvent::AutoScrollStopped {
            reason: StopReason::ReachedLimit,
        }) {
            stopped = true;
        }
        if offsets.last() != Some(&vp.scroll_offset().y) {
            offsets.push(vp.scroll_offset().y);
        }
    }

    assert!(stopped);
    assert_eq!(offsets, vec![5.0, 2.0, 0.0]);
    assert!(!engine.autoscroll().is_running());
    // Translation 10, nudged by -3 once; the limit step adds nothing.
    assert_eq!(engine.render_offset(&"a", &items), 7.0);
}

#[test]
fn unmoved_viewport_pointer_keeps_scrolled_offset() {
    let mut engine = engine();
    let mut items = vec!["a", "b"];
    relayout(&mut engine, &items, uniform);
    let mut vp = viewport(100.0);
    let t0 = Instant::now();

    let sample = drag_to(50.0, 60.0).with_viewport_location(Point::new(10.0, 10.0));
    engine.on_drag_changed(&"a", &sample, &mut items, Some(&mut vp), t0);
    engine.on_frame(t0 + Duration::from_millis(10), FRAME, &mut items, Some(&mut vp));
    assert_eq!(engine.render_offset(&"a", &items), 7.0);

    // Same viewport position while scrolling: the raw translation is held.
    engine.on_drag_changed(&"a", &sample, &mut items, Some(&mut vp), t0);
    assert_eq!(engine.render_offset(&"a", &items), 7.0);

    // Leaving the band stops scrolling and resumes tracking the gesture.
    let sample = drag_to(50.0, 80.0).with_viewport_location(Point::new(10.0, 200.0));
    let events = engine.on_drag_changed(&"a", &sample, &mut items, Some(&mut vp), t0);
    assert!(events.contains(&ReorderEvent::AutoScrollStopped {
        reason: StopReason::LeftBand
    }));
    assert_eq!(engine.render_offset(&"a", &items), 30.0);
}

#[test]
fn end_band_scrolls_forward() {
    let mut engine = engine();
    let mut items = vec!["a", "b"];
    relayout(&mut engine, &items, uniform);
    let mut vp = viewport(0.0);
    let t0 = Instant::now();

    let sample = drag_to(50.0, 60.0).with_viewport_location(Point::new(10.0, 390.0));
    let events = engine.on_drag_changed(&"a", &sample, &mut items, Some(&mut vp), t0);
    assert!(events.contains(&ReorderEvent::AutoScrollStarted { edge: Edge::End }));
    engine.on_frame(t0 + Duration::from_millis(30), FRAME, &mut items, Some(&mut vp));
    assert_eq!(vp.scroll_offset().y, 9.0);
}

#[test]
fn scroll_ticks_shift_hit_test_into_neighbor() {
    let mut engine = engine();
    let mut items = vec!["a", "b", "c"];
    relayout(&mut engine, &items, uniform);
    let mut vp = viewport(100.0);
    let t0 = Instant::now();

    // Pointer at 205 over c's own extent; b ends at 200.
    let sample = drag_to(250.0, 205.0).with_viewport_location(Point::new(10.0, 10.0));
    let events = engine.on_drag_changed(&"c", &sample, &mut items, Some(&mut vp), t0);
    assert!(moves(&events).is_empty());
    assert!(events.contains(&ReorderEvent::AutoScrollStarted { edge: Edge::Start }));

    let mut all = Vec::new();
    for tick in 1..=3u64 {
        let now = t0 + Duration::from_millis(10 * tick);
        all.extend(moves(&engine.on_frame(now, FRAME, &mut items, Some(&mut vp))));
    }

    // 205 -> 202 -> 199 crosses into b; 196 sits in b's band afterwards.
    assert_eq!(all, vec![(2, 1)]);
    assert_eq!(items, vec!["a", "c", "b"]);
    assert_eq!(vp.scroll_offset().y, 91.0);
}

#[test]
fn cancel_tears_down_autoscroll() {
    let mut engine = engine();
    let mut items = vec!["a", "b"];
    relayout(&mut engine, &items, uniform);
    let mut vp = viewport(100.0);
    let t0 = Instant::now();

    let sample = drag_to(50.0, 60.0).with_viewport_location(Point::new(10.0, 10.0));
    engine.on_drag_changed(&"a", &sample, &mut items, Some(&mut vp), t0);
    engine.on_drag_cancelled(&"a", &items);
    assert!(!engine.autoscroll().is_running());

    let events = engine.on_frame(t0 + Duration::from_secs(1), FRAME, &mut items, Some(&mut vp));
    assert!(!events.iter().any(|e| matches!(e, ReorderEvent::AutoScrollStopped { .. })));
    assert_eq!(vp.scroll_offset().y, 100.0);
}

// ═════════════════════════════════════════════════════════════════════════
// Full lifecycle
// ═════════════════════════════════════════════════════════════════════════

fn mixed(id: &str) -> f64 {
    match id {
        "item0" => 200.0,
        "item1" => 100.0,
        _ => 300.0,
    }
}

#[test]
fn three_items_full_lifecycle() {
    let mut engine = engine();
    let mut items = vec!["item0", "item1", "item2"];
    relayout(&mut engine, &items, mixed);
    let now = Instant::now();

    let events = engine.on_drag_changed(&"item0", &drag_to(100.0, 250.0), &mut items, None, now);
    assert_eq!(events[0], ReorderEvent::DragStarted { id: "item0", index: 0 });
    assert_eq!(moves(&events), vec![(0, 1)]);
    relayout(&mut engine, &items, mixed);

    let events = engine.on_drag_changed(&"item0", &drag_to(100.0, 320.0), &mut items, None, now);
    assert_eq!(moves(&events), vec![(1, 2)]);
    relayout(&mut engine, &items, mixed);

    let events = engine.on_drag_ended(&"item0", &items);
    assert_eq!(
        events[0],
        ReorderEvent::Released {
            id: "item0",
            initial_index: 0,
            final_index: 2,
            reason: EndReason::Dropped
        }
    );
    assert!(engine.session().dragging_id().is_none());
    assert!(engine.is_pending_drop(&"item0"));
    assert_eq!(engine.phase(), DragPhase::Settling);

    assert!(settle(&mut engine, &mut items, now));
    assert!(!engine.is_pending_drop(&"item0"));
    assert_eq!(engine.phase(), DragPhase::Idle);
    assert_eq!(items, vec!["item1", "item2", "item0"]);
}

#[test]
fn end_after_removal_reports_removal_without_settle() {
    let mut engine = engine();
    let mut items = vec!["a", "b"];
    relayout(&mut engine, &items, uniform);
    let now = Instant::now();

    engine.on_drag_changed(&"a", &drag_to(50.0, 80.0), &mut items, None, now);
    items.retain(|id| *id != "a");

    let events = engine.on_drag_ended(&"a", &items);
    assert_eq!(
        events,
        vec![ReorderEvent::Released {
            id: "a",
            initial_index: 0,
            final_index: 0,
            reason: EndReason::ItemRemoved
        }]
    );
    assert_eq!(engine.phase(), DragPhase::Idle);
    assert!(!engine.is_pending_drop(&"a"));
}

#[test]
fn new_drag_during_settle_finishes_previous() {
    let mut engine = engine();
    let mut items = vec!["a", "b"];
    relayout(&mut engine, &items, uniform);
    let now = Instant::now();

    engine.on_drag_changed(&"a", &drag_to(50.0, 70.0), &mut items, None, now);
    engine.on_drag_ended(&"a", &items);
    assert!(engine.is_pending_drop(&"a"));

    let events = engine.on_drag_changed(&"b", &drag_to(150.0, 160.0), &mut items, None, now);
    assert_eq!(
        events[..2],
        [
            ReorderEvent::Settled { id: "a" },
            ReorderEvent::DragStarted { id: "b", index: 1 }
        ]
    );
    assert!(!engine.is_pending_drop(&"a"));
}

// ═════════════════════════════════════════════════════════════════════════
// Horizontal axis and batched rendering
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn horizontal_row_swaps_along_x() {
    let config = ReorderConfig::default().with_axis(Axis::Horizontal);
    let mut engine = ReorderEngine::new(config).expect("valid config");
    let mut items = vec!["left", "mid", "right"];
    let space = CoordinateSpace::default();
    for (i, &id) in items.iter().enumerate() {
        let frame = MeasuredFrame::new(space.clone(), Bounds::new(i as f64 * 100.0, 0.0, 100.0, 40.0));
        engine.on_item_measured(id, &frame).expect("same space");
    }

    let sample = DragSample::new(Point::new(170.0, 20.0), Point::new(50.0, 20.0));
    let events = engine.on_drag_changed(&"left", &sample, &mut items, None, Instant::now());
    assert_eq!(moves(&events), vec![(0, 1)]);
    assert_eq!(items, vec!["mid", "left", "right"]);

    // Translation 120 along x, slot moved 100.
    assert_eq!(engine.render_offset_vector(&"left", &items), Vector::new(20.0, 0.0));
    assert_eq!(engine.render_offset_vector(&"mid", &items), Vector::new(0.0, 0.0));
}

#[test]
fn shared_view_matches_per_item_queries() {
    let mut engine = engine();
    let mut items = vec!["a0", "a1", "a2"];
    relayout(&mut engine, &items, uniform);
    engine.on_drag_changed(&"a0", &drag_to(50.0, 170.0), &mut items, None, Instant::now());

    let view = engine.registry().view(items.iter().copied());
    for id in &items {
        assert_eq!(engine.render_offset_in(id, &view), engine.render_offset(id, &items));
    }
    assert_eq!(engine.render_offset_in(&"a0", &view), 20.0);
}
