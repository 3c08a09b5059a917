use coordinator::{
    Coordinator, CoordinatorOptions, Extents, GestureEvent, GestureTracker, PointerSample,
    ScrollOrigin,
};

/// A framework-neutral controller that wraps a [`Coordinator`] and wires the
/// header drag surface into it.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_pointer_*` when the host dispatches pointer events hit-testing the
///   header surface
/// - `on_content_*` when the content surface reports nested scrolling
/// - `tick(now_ms)` each frame while a fling is active
///
/// Header drags follow the same two-phase pipeline as content scrolls: the
/// delta is first offered to pre-scroll arbitration (which declines
/// header-origin deltas), and the remainder is applied via post-scroll.
#[derive(Clone, Debug)]
pub struct Controller {
    coordinator: Coordinator,
    header_gesture: GestureTracker,
}

impl Controller {
    pub fn new(options: CoordinatorOptions) -> Self {
        let header_gesture = GestureTracker::new(options.touch_slop, options.velocity_window_ms);
        Self {
            coordinator: Coordinator::new(options),
            header_gesture,
        }
    }

    pub fn from_coordinator(coordinator: Coordinator) -> Self {
        let options = coordinator.options();
        let header_gesture = GestureTracker::new(options.touch_slop, options.velocity_window_ms);
        Self {
            coordinator,
            header_gesture,
        }
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut Coordinator {
        &mut self.coordinator
    }

    pub fn into_coordinator(self) -> Coordinator {
        self.coordinator
    }

    pub fn is_dragging(&self) -> bool {
        self.header_gesture.is_dragging()
    }

    /// Forwards the host's measurement pass.
    pub fn set_extents(&mut self, extents: Extents) {
        self.coordinator.set_extents(extents);
    }

    pub fn fold(&mut self) {
        self.coordinator.fold();
    }

    pub fn unfold(&mut self) {
        self.coordinator.unfold();
    }

    // ----------------------------------------------- header drag surface

    /// Pointer-down on the header surface. Starting a gesture aborts any
    /// in-flight fling.
    pub fn on_pointer_down(&mut self, sample: PointerSample) {
        self.coordinator.notify_gesture_start();
        self.header_gesture.on_pointer_down(sample);
    }

    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        if let Some(GestureEvent::Drag { dy }) = self.header_gesture.on_pointer_move(sample) {
            let dy = dy.round() as i32;
            let consumed = self.coordinator.pre_scroll(ScrollOrigin::Header, dy);
            self.coordinator
                .post_scroll(ScrollOrigin::Header, dy - consumed);
        }
    }

    /// Pointer-up on the header surface. A drag release starts the shared
    /// fling from the gesture's velocity; a tap does nothing.
    pub fn on_pointer_up(&mut self, sample: PointerSample) {
        if let Some(GestureEvent::Release { velocity }) = self.header_gesture.on_pointer_up(sample)
        {
            self.coordinator.start_fling(velocity, sample.timestamp_ms);
        }
    }

    pub fn on_pointer_cancel(&mut self) {
        self.header_gesture.on_pointer_cancel();
    }

    // -------------------------------------------------- content surface

    /// Call when the content surface begins its own gesture.
    pub fn on_content_gesture_start(&mut self) {
        self.coordinator.notify_gesture_start();
    }

    /// Nested pre-scroll for a content-origin delta. Returns how much the
    /// header consumed; the content applies the remainder itself.
    pub fn on_content_scroll(&mut self, dy: i32) -> i32 {
        self.coordinator.pre_scroll(ScrollOrigin::Content, dy)
    }

    /// Routes the content's release velocity into the shared fling, so the
    /// content never runs its own momentum scrolling.
    pub fn on_content_release(&mut self, velocity: f32, now_ms: u64) {
        self.coordinator.start_fling(velocity, now_ms);
    }

    // -------------------------------------------------------- frame loop

    /// Advances an active fling. Returns `true` while another frame is
    /// needed; hosts keep scheduling ticks until it returns `false`.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.coordinator.tick(now_ms)
    }
}
