use std::cell::Cell;
use std::sync::Arc;

use crate::fling::DecayCurve;
use crate::options::{CoordinatorOptions, ScrollableContent};
use crate::types::{CoordinatorState, Extents, ScrollOrigin};

/// An in-flight fling.
///
/// `last_applied_y` tracks the cumulative position already handed out as
/// per-frame deltas, so rounding to integer deltas never drifts more than
/// half a unit from the curve.
#[derive(Clone, Copy, Debug)]
struct Fling {
    curve: DecayCurve,
    last_applied_y: f64,
    last_tick_ms: u64,
}

/// The nested-scroll coordinator.
///
/// Owns the header's scroll offset, clamped to `[0, max_offset]` where
/// `max_offset = header_extent - hover_extent`. For every incoming scroll
/// delta it decides how much the header consumes versus how much is left for
/// the content, and it runs the fling simulation that continues the same
/// arbitration after the finger is lifted.
///
/// This type is intentionally UI-agnostic and single-threaded: input
/// delivery and fling-frame advancement are callbacks invoked by the host's
/// frame loop. It never blocks and never spawns work; it only computes the
/// next state and signals the host via the `on_change` callback.
#[derive(Clone, Debug)]
pub struct Coordinator {
    options: CoordinatorOptions,
    extents: Extents,
    // lazily recomputed from extents; None = invalidated
    max_offset: Cell<Option<i32>>,
    offset: i32,
    fling: Option<Fling>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Coordinator {
    pub fn new(options: CoordinatorOptions) -> Self {
        cdebug!(
            touch_slop = options.touch_slop,
            velocity_window_ms = options.velocity_window_ms,
            "Coordinator::new"
        );
        Self {
            options,
            extents: Extents::default(),
            max_offset: Cell::new(None),
            offset: 0,
            fling: None,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &CoordinatorOptions {
        &self.options
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Coordinator) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    pub fn set_content_resolver(
        &mut self,
        resolver: Option<impl Fn() -> Option<Arc<dyn ScrollableContent>> + Send + Sync + 'static>,
    ) {
        self.options.content_resolver = resolver.map(|f| Arc::new(f) as _);
    }

    /// Updates the header/hover extents from the host's measurement pass.
    ///
    /// Invalidates the cached `max_offset`; it is recomputed lazily on next
    /// access. The current offset is re-clamped against the new range.
    pub fn set_extents(&mut self, extents: Extents) {
        if extents == self.extents {
            return;
        }
        ctrace!(
            header = extents.header,
            hover = extents.hover,
            "Coordinator::set_extents"
        );
        self.extents = extents;
        self.max_offset.set(None);

        let max = self.max_offset();
        if self.offset > max {
            self.offset = max;
            self.notify();
        }
    }

    /// The header's collapsible travel.
    ///
    /// Zero until extents are known; every operation clamps against this, so
    /// pre-layout calls are silent no-ops rather than errors.
    pub fn max_offset(&self) -> i32 {
        if let Some(max) = self.max_offset.get() {
            return max;
        }
        let max = self.extents.max_offset();
        self.max_offset.set(Some(max));
        max
    }

    /// Current header offset (0 = fully expanded, `max_offset` = collapsed).
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn is_flinging(&self) -> bool {
        self.fling.is_some()
    }

    pub fn state(&self) -> CoordinatorState {
        CoordinatorState {
            offset: self.offset,
            max_offset: self.max_offset(),
            is_flinging: self.is_flinging(),
        }
    }

    /// Call when any participating surface begins a new gesture.
    ///
    /// A new gesture is the sole cancellation mechanism for an in-flight
    /// fling.
    pub fn notify_gesture_start(&mut self) {
        self.abort_fling();
    }

    pub fn abort_fling(&mut self) {
        if self.fling.take().is_some() {
            cdebug!("fling aborted");
        }
    }

    /// Pre-scroll arbitration: given a scroll delta `dy` (positive =
    /// scrolling down / header collapsing), returns how much the header
    /// consumed. The remainder (`dy - consumed`) is the caller's to apply to
    /// the content via its normal scrolling.
    ///
    /// Runs before the content scrolls itself, which is what makes the
    /// header win ties at the boundaries.
    pub fn pre_scroll(&mut self, origin: ScrollOrigin, dy: i32) -> i32 {
        // Header drags are not arbitrated here; they are applied in full by
        // `post_scroll`.
        if origin == ScrollOrigin::Header {
            return 0;
        }
        let max = self.max_offset();
        // Fully expanded and pulling further down: let the content's own
        // top-overscroll show through.
        if self.offset == 0 && dy < 0 {
            return 0;
        }
        // Fully collapsed and still pushing up: content scrolls.
        if self.offset == max && dy > 0 {
            return 0;
        }
        // Content-origin pull-down while the content is not yet at its own
        // top: let the content finish scrolling to its top first.
        if origin == ScrollOrigin::Content && dy < 0 && self.content_scroll_offset() != 0 {
            return 0;
        }

        let consumed = dy.clamp(-self.offset, max - self.offset);
        if consumed != 0 {
            self.offset += consumed;
            ctrace!(dy, consumed, offset = self.offset, "pre_scroll");
            self.notify();
        }
        consumed
    }

    /// Post-scroll: applies residual delta that originated from the header's
    /// own drag surface (pre-scroll deliberately declined it).
    pub fn post_scroll(&mut self, origin: ScrollOrigin, unconsumed: i32) {
        if origin == ScrollOrigin::Header {
            self.scroll_by(unconsumed);
        }
    }

    /// Sets the header offset, clamped to `[0, max_offset]`.
    pub fn scroll_to(&mut self, y: i32) {
        let target = y.clamp(0, self.max_offset());
        if target != self.offset {
            self.offset = target;
            self.notify();
        }
    }

    pub fn scroll_by(&mut self, dy: i32) {
        self.scroll_to(self.offset.saturating_add(dy));
    }

    /// Collapses the header to its hover band. Instantaneous; aborts any
    /// in-flight fling.
    pub fn fold(&mut self) {
        cdebug!("fold");
        self.abort_fling();
        let max = self.max_offset();
        self.scroll_to(max);
    }

    /// Expands the header fully. Instantaneous; aborts any in-flight fling.
    pub fn unfold(&mut self) {
        cdebug!("unfold");
        self.abort_fling();
        self.scroll_to(0);
    }

    /// Starts a fling from a release velocity (units/second, sign-aligned
    /// with scroll deltas).
    ///
    /// The simulation runs over a virtual combined coordinate
    /// `offset + content_scroll_offset`, so header collapse and content
    /// scroll form one continuous axis. The lower bound is 0, except when
    /// releasing at `max_offset` with continued motion: then it extends to
    /// `-max_offset` so the curve can travel across the collapsed-header
    /// boundary without a seam.
    pub fn start_fling(&mut self, velocity: f32, now_ms: u64) {
        let max = self.max_offset();
        let min = if velocity < 0.0 && self.offset == max {
            -(max as f64)
        } else {
            0.0
        };
        let start = self.offset as f64 + self.content_scroll_offset() as f64;
        cdebug!(velocity, start, min, "start_fling");

        let curve = DecayCurve::new(
            start,
            velocity as f64,
            min,
            i64::MAX as f64,
            self.options.fling_decay_per_ms,
            self.options.fling_settle_velocity,
        );
        self.fling = Some(Fling {
            curve,
            last_applied_y: start,
            last_tick_ms: now_ms,
        });
    }

    /// Advances an in-flight fling to `now_ms` and applies one frame of
    /// motion. Returns `true` while further frames are needed.
    ///
    /// Per frame the delta is routed with the same policy as live input:
    /// content absorbs it while the header is pinned at `max_offset` (and
    /// motion continues forward) or while the content is not at its own top;
    /// otherwise the header consumes it, clamped.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(mut fling) = self.fling.take() else {
            return false;
        };

        let dt_ms = now_ms.saturating_sub(fling.last_tick_ms) as f64;
        fling.last_tick_ms = now_ms;
        let (y, settled) = fling.curve.advance(dt_ms);
        let dy = (y - fling.last_applied_y).round() as i32;
        fling.last_applied_y += dy as f64;

        if dy != 0 {
            let at_max = self.offset == self.max_offset();
            self.batch_update(|c| {
                if at_max && dy > 0 {
                    c.content_scroll_by(dy);
                } else if c.content_scroll_offset() != 0 {
                    c.content_scroll_by(dy);
                } else {
                    c.scroll_by(dy);
                }
                // a fling frame was applied even when the header did not move
                c.notify();
            });
        }

        if settled {
            ctrace!(y, "fling settled");
            false
        } else {
            self.fling = Some(fling);
            true
        }
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Resolves the front-facing content fresh; never cached across calls.
    fn content(&self) -> Option<Arc<dyn ScrollableContent>> {
        self.options.content_resolver.as_ref().and_then(|f| f())
    }

    fn content_scroll_offset(&self) -> i32 {
        self.content().map(|c| c.scroll_offset()).unwrap_or(0)
    }

    /// Forwards `dy` to the content; silently dropped when no content
    /// resolves.
    fn content_scroll_by(&self, dy: i32) {
        if let Some(content) = self.content() {
            content.scroll_by(dy);
        }
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(CoordinatorOptions::new())
    }
}
