#![no_main]

use arbitrary::Arbitrary;
use dragsort::{
    Bounds, CoordinateSpace, DragPhase, DragSample, Duration, GestureSource, Instant,
    MeasuredFrame, Point, ReorderConfig, ReorderEngine, ScrollState, ScrollViewport,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Drag {
        item: u8,
        y: i16,
        viewport_y: i16,
        from_handle: bool,
        declares_handle: bool,
    },
    End { item: u8 },
    Cancel { item: u8 },
    Frame { ms: u8 },
    Measure { item: u8, y: i16, span: u8 },
    Remove { item: u8 },
    Unmount { item: u8 },
    Disable(bool),
}

#[derive(Debug, Arbitrary)]
struct Input {
    count: u8,
    scroll: u16,
    ops: Vec<Op>,
}

fn pick(items: &[u8], i: u8) -> Option<u8> {
    (!items.is_empty()).then(|| items[usize::from(i) % items.len()])
}

fuzz_target!(|input: Input| {
    let Ok(mut engine) = ReorderEngine::new(ReorderConfig::default()) else {
        return;
    };
    let count = input.count % 16;
    let mut items: Vec<u8> = (0..count).collect();
    let max = 600.0;
    let mut vp = ScrollState::new(
        Bounds::new(0.0, 0.0, 100.0, 400.0),
        Bounds::new(0.0, 0.0, 100.0, 1000.0),
        Point::new(0.0, f64::from(input.scroll) % max),
    );
    let space = CoordinateSpace::default();
    for (i, &id) in items.iter().enumerate() {
        let frame = MeasuredFrame::new(space.clone(), Bounds::new(0.0, i as f64 * 40.0, 100.0, 40.0));
        let _ = engine.on_item_measured(id, &frame);
    }

    let mut now = Instant::now();
    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Drag {
                item,
                y,
                viewport_y,
                from_handle,
                declares_handle,
            } => {
                let Some(id) = pick(&items, item) else { continue };
                let source = if from_handle {
                    GestureSource::Handle
                } else {
                    GestureSource::Item
                };
                let sample = DragSample::new(Point::new(5.0, f64::from(y)), Point::new(5.0, 0.0))
                    .with_viewport_location(Point::new(5.0, f64::from(viewport_y)))
                    .with_source(source)
                    .with_handle(declares_handle);
                engine.on_drag_changed(&id, &sample, &mut items, Some(&mut vp), now);
            }
            Op::End { item } => {
                if let Some(id) = pick(&items, item) {
                    engine.on_drag_ended(&id, &items);
                    assert_ne!(engine.session().dragging_id(), Some(&id));
                }
            }
            Op::Cancel { item } => {
                if let Some(id) = pick(&items, item) {
                    engine.on_drag_cancelled(&id, &items);
                    assert_ne!(engine.session().dragging_id(), Some(&id));
                }
            }
            Op::Frame { ms } => {
                let dt = Duration::from_millis(u64::from(ms));
                now += dt;
                engine.on_frame(now, dt, &mut items, Some(&mut vp));
            }
            Op::Measure { item, y, span } => {
                let frame = MeasuredFrame::new(
                    space.clone(),
                    Bounds::new(0.0, f64::from(y), 100.0, f64::from(span)),
                );
                let _ = engine.on_item_measured(item % 16, &frame);
            }
            Op::Remove { item } => {
                if let Some(id) = pick(&items, item) {
                    items.retain(|x| *x != id);
                }
            }
            Op::Unmount { item } => {
                engine.on_item_unmounted(&(item % 16));
            }
            Op::Disable(disabled) => {
                engine.set_drag_disabled(disabled);
                if disabled {
                    assert_ne!(engine.phase(), DragPhase::Dragging);
                }
            }
        }

        let offset = vp.scroll_offset().y;
        assert!((0.0..=max).contains(&offset), "scroll offset {offset}");
        if engine.session().dragging_id().is_none() {
            assert!(!engine.autoscroll().is_running());
        }
        for &id in &items {
            assert!(engine.render_offset(&id, &items).is_finite());
        }
    }

    let mut sorted = items.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), items.len());
});
