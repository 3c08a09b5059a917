use crate::types::PointerSample;
use crate::velocity::VelocityTracker;

/// Default touch slop, in the same units as pointer positions.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// An event produced by [`GestureTracker`] from raw pointer samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// An active drag moved by `dy`.
    ///
    /// Sign convention: positive = content moving up / scrolling down, i.e.
    /// the inverse of raw pointer movement.
    Drag { dy: f32 },
    /// The pointer lifted out of an active drag.
    ///
    /// `velocity` is in units per second, sign-aligned with drag deltas (so
    /// it is the raw pointer velocity negated).
    Release { velocity: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    /// Pointer is down but has not yet exceeded the touch slop.
    Watching { start_y: f32 },
    Dragging { last_y: f32 },
}

/// Turns a stream of pointer samples into drag lifecycle events plus a
/// release velocity, filtering out accidental micro-movements.
///
/// State machine: `Idle -> Watching` on pointer-down, `Watching -> Dragging`
/// once displacement exceeds the touch slop, back to `Idle` on up/cancel.
/// A gesture that never exceeds the slop is a tap and produces no events.
///
/// Every sample while the pointer is down feeds the velocity tracker,
/// regardless of phase.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    phase: Phase,
    touch_slop: f32,
    velocity: VelocityTracker,
}

impl GestureTracker {
    pub fn new(touch_slop: f32, velocity_window_ms: u64) -> Self {
        Self {
            phase: Phase::Idle,
            touch_slop: touch_slop.max(0.0),
            velocity: VelocityTracker::new(velocity_window_ms),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn on_pointer_down(&mut self, sample: PointerSample) {
        self.velocity.clear();
        self.velocity.push(sample.y, sample.timestamp_ms);
        self.phase = Phase::Watching { start_y: sample.y };
    }

    /// Feeds a pointer-move sample, returning a [`GestureEvent::Drag`] once
    /// the gesture is (or becomes) an active drag.
    ///
    /// On the slop-crossing move only the excess over the slop is delivered,
    /// so drag-start does not produce a visible jump.
    pub fn on_pointer_move(&mut self, sample: PointerSample) -> Option<GestureEvent> {
        match self.phase {
            // Move without a preceding down; nothing to track.
            Phase::Idle => None,
            Phase::Watching { start_y } => {
                self.velocity.push(sample.y, sample.timestamp_ms);
                let raw = start_y - sample.y;
                if raw.abs() <= self.touch_slop {
                    return None;
                }
                let dy = if raw > 0.0 {
                    raw - self.touch_slop
                } else {
                    raw + self.touch_slop
                };
                cdebug!(raw, dy, "drag started");
                self.phase = Phase::Dragging { last_y: sample.y };
                Some(GestureEvent::Drag { dy })
            }
            Phase::Dragging { last_y } => {
                self.velocity.push(sample.y, sample.timestamp_ms);
                let dy = last_y - sample.y;
                self.phase = Phase::Dragging { last_y: sample.y };
                Some(GestureEvent::Drag { dy })
            }
        }
    }

    /// Feeds the pointer-up sample. Returns a [`GestureEvent::Release`] when
    /// it ends an active drag; a tap (slop never exceeded) returns `None`.
    pub fn on_pointer_up(&mut self, sample: PointerSample) -> Option<GestureEvent> {
        self.velocity.push(sample.y, sample.timestamp_ms);
        let was_dragging = self.is_dragging();
        self.phase = Phase::Idle;

        let event = if was_dragging {
            let velocity = -self.velocity.velocity();
            ctrace!(velocity, "drag released");
            Some(GestureEvent::Release { velocity })
        } else {
            None
        };
        self.velocity.clear();
        event
    }

    /// Aborts the gesture without a release event (no fling).
    pub fn on_pointer_cancel(&mut self) {
        self.phase = Phase::Idle;
        self.velocity.clear();
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_SLOP, crate::velocity::DEFAULT_VELOCITY_WINDOW_MS)
    }
}
