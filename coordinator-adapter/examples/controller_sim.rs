use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use coordinator::{CoordinatorOptions, Extents, PointerSample, ScrollableContent};
use coordinator_adapter::Controller;

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
    let list = Arc::new(ListContent {
        offset: AtomicI32::new(0),
    });

    let resolver_list = Arc::clone(&list);
    let mut controller = Controller::new(CoordinatorOptions::new().with_content_resolver(Some(
        move || Some(Arc::clone(&resolver_list) as Arc<dyn ScrollableContent>),
    )));
    controller.set_extents(Extents::new(300, 100));

    // A flick up on the header: collapse, then hand the rest to the list.
    controller.on_pointer_down(PointerSample::new(600.0, 0));
    for (y, t) in [(560.0, 16), (500.0, 32), (420.0, 48)] {
        controller.on_pointer_move(PointerSample::new(y, t));
    }
    controller.on_pointer_up(PointerSample::new(400.0, 64));
    println!(
        "released: offset={}, flinging={}",
        controller.coordinator().offset(),
        controller.coordinator().is_flinging()
    );

    let mut now = 64;
    while controller.tick(now) {
        now += 16;
    }
    println!(
        "settled: offset={}, list_offset={}",
        controller.coordinator().offset(),
        list.scroll_offset()
    );

    // The content surface participates through the same arbitration.
    controller.unfold();
    controller.on_content_gesture_start();
    let consumed = controller.on_content_scroll(120);
    println!("content scroll of 120: header consumed {consumed}");
}
