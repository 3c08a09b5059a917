use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use coordinator::{
    Coordinator, CoordinatorOptions, Extents, GestureEvent, GestureTracker, PointerSample,
    ScrollOrigin, ScrollableContent,
};

struct ListContent {
    offset: AtomicI32,
}

impl ScrollableContent for ListContent {
    fn scroll_offset(&self) -> i32 {
        self.offset.load(Ordering::Relaxed)
    }

    fn scroll_by(&self, dy: i32) {
        let cur = self.offset.load(Ordering::Relaxed);
        self.offset.store((cur + dy).max(0), Ordering::Relaxed);
    }
}

fn main() {
    // Simulate a host that owns a list below a 300-unit header with a
    // 100-unit hover band.
    let list = Arc::new(ListContent {
        offset: AtomicI32::new(0),
    });

    let resolver_list = Arc::clone(&list);
    let opts = CoordinatorOptions::new()
        .with_content_resolver(Some(move || {
            Some(Arc::clone(&resolver_list) as Arc<dyn ScrollableContent>)
        }))
        .with_on_change(Some(|c: &Coordinator| {
            println!("  redraw requested: offset={}", c.offset());
        }));

    let mut coordinator = Coordinator::new(opts);
    coordinator.set_extents(Extents::new(300, 100));

    // Drive a drag on the header surface: pointer moving up collapses it.
    let mut gesture = GestureTracker::default();
    gesture.on_pointer_down(PointerSample::new(500.0, 0));
    for (y, t) in [(470.0, 16), (420.0, 32), (330.0, 48)] {
        if let Some(GestureEvent::Drag { dy }) = gesture.on_pointer_move(PointerSample::new(y, t)) {
            let dy = dy.round() as i32;
            let consumed = coordinator.pre_scroll(ScrollOrigin::Header, dy);
            coordinator.post_scroll(ScrollOrigin::Header, dy - consumed);
        }
    }
    println!("after drag: offset={}", coordinator.offset());

    // Release with momentum; the fling continues across the boundary.
    if let Some(GestureEvent::Release { velocity }) =
        gesture.on_pointer_up(PointerSample::new(300.0, 64))
    {
        println!("released with velocity {velocity:.0} units/s");
        coordinator.start_fling(velocity, 64);
    }

    let mut now = 64;
    while coordinator.tick(now) {
        now += 16;
    }
    println!(
        "after fling: offset={}, list_offset={}",
        coordinator.offset(),
        list.scroll_offset()
    );
}
