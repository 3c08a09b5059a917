use std::sync::Arc;

use crate::coordinator::Coordinator;
use crate::fling::{DEFAULT_DECAY_PER_MS, DEFAULT_SETTLE_VELOCITY};
use crate::gesture::DEFAULT_TOUCH_SLOP;
use crate::velocity::DEFAULT_VELOCITY_WINDOW_MS;

/// A scrollable content surface the coordinator can forward motion to.
///
/// This is the only capability the coordinator requires from content: read
/// the current vertical offset, and scroll by a delta. `scroll_by` takes
/// `&self` because the coordinator only ever holds a shared handle; hosts
/// are expected to use interior mutability.
pub trait ScrollableContent {
    /// Current vertical scroll offset (0 = scrolled to top).
    fn scroll_offset(&self) -> i32;
    /// Scrolls the content by `dy` (positive = content moving up).
    fn scroll_by(&self, dy: i32);
}

/// Resolves the currently front-facing scrollable content, if any.
///
/// The coordinator calls this on every use and never caches the result: in a
/// paged container the front-facing surface can change between frames.
pub type ContentResolver = Arc<dyn Fn() -> Option<Arc<dyn ScrollableContent>> + Send + Sync>;

/// A callback fired when the coordinator's observable state changes (the
/// header offset moved or a fling frame was applied).
///
/// Hosts typically request a redraw / next frame tick here.
pub type OnChangeCallback = Arc<dyn Fn(&Coordinator) + Send + Sync>;

/// Configuration for [`Coordinator`].
///
/// Cheap to clone: callbacks are stored in `Arc`s.
#[derive(Clone)]
pub struct CoordinatorOptions {
    /// Minimum pointer displacement before a pointer-down becomes a drag.
    pub touch_slop: f32,
    /// Retention window for velocity samples.
    pub velocity_window_ms: u64,
    /// Per-millisecond fling velocity decay factor.
    pub fling_decay_per_ms: f64,
    /// Velocity below which a fling settles, in units/second.
    pub fling_settle_velocity: f64,
    /// Lookup for the currently front-facing scrollable content.
    pub content_resolver: Option<ContentResolver>,
    /// Optional callback fired when the coordinator's state changes.
    pub on_change: Option<OnChangeCallback>,
}

impl CoordinatorOptions {
    pub fn new() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            velocity_window_ms: DEFAULT_VELOCITY_WINDOW_MS,
            fling_decay_per_ms: DEFAULT_DECAY_PER_MS,
            fling_settle_velocity: DEFAULT_SETTLE_VELOCITY,
            content_resolver: None,
            on_change: None,
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_velocity_window_ms(mut self, velocity_window_ms: u64) -> Self {
        self.velocity_window_ms = velocity_window_ms;
        self
    }

    pub fn with_fling_decay_per_ms(mut self, fling_decay_per_ms: f64) -> Self {
        self.fling_decay_per_ms = fling_decay_per_ms;
        self
    }

    pub fn with_fling_settle_velocity(mut self, fling_settle_velocity: f64) -> Self {
        self.fling_settle_velocity = fling_settle_velocity;
        self
    }

    pub fn with_content_resolver(
        mut self,
        resolver: Option<impl Fn() -> Option<Arc<dyn ScrollableContent>> + Send + Sync + 'static>,
    ) -> Self {
        self.content_resolver = resolver.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Coordinator) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CoordinatorOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CoordinatorOptions")
            .field("touch_slop", &self.touch_slop)
            .field("velocity_window_ms", &self.velocity_window_ms)
            .field("fling_decay_per_ms", &self.fling_decay_per_ms)
            .field("fling_settle_velocity", &self.fling_settle_velocity)
            .field("content_resolver", &self.content_resolver.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}
