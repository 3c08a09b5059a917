use std::collections::VecDeque;

/// Default retention window for velocity samples, in milliseconds.
pub const DEFAULT_VELOCITY_WINDOW_MS: u64 = 1000;

#[derive(Clone, Copy, Debug)]
struct Sample {
    y: f32,
    timestamp_ms: u64,
}

/// A bounded-window velocity estimator over raw pointer positions.
///
/// Samples older than the window are evicted on every push, so a gesture that
/// was fast early on but has since slowed down reports its current velocity,
/// not a historical one. The estimate is only meaningful right after the last
/// sample of a gesture; trackers must be cleared between gestures.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    window_ms: u64,
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms: window_ms.max(1),
            samples: VecDeque::new(),
        }
    }

    /// Pushes a new pointer reading.
    ///
    /// Timestamps must increase monotonically; readings that go backwards in
    /// time are ignored.
    pub fn push(&mut self, y: f32, timestamp_ms: u64) {
        if let Some(last) = self.samples.back() {
            if timestamp_ms < last.timestamp_ms {
                cwarn!(
                    timestamp_ms,
                    last = last.timestamp_ms,
                    "ignoring out-of-order velocity sample"
                );
                return;
            }
        }

        self.samples.push_back(Sample { y, timestamp_ms });
        self.trim();
    }

    /// Raw pointer velocity in units per second over the retained window.
    ///
    /// Positive means the pointer is moving toward larger `y`. Callers that
    /// want scroll-delta sign (positive = scrolling down) must negate this.
    pub fn velocity(&self) -> f32 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };

        let dt_ms = last.timestamp_ms.saturating_sub(first.timestamp_ms);
        if dt_ms == 0 {
            return 0.0;
        }

        (last.y - first.y) / (dt_ms as f32 / 1000.0)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    fn trim(&mut self) {
        let Some(&Sample { timestamp_ms, .. }) = self.samples.back() else {
            return;
        };

        while let Some(first) = self.samples.front() {
            if timestamp_ms <= first.timestamp_ms + self.window_ms {
                break;
            }
            let _ = self.samples.pop_front();
        }
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY_WINDOW_MS)
    }
}
