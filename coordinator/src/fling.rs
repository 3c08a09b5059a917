/// Default per-millisecond velocity decay factor.
pub const DEFAULT_DECAY_PER_MS: f64 = 0.998;

/// Default velocity threshold below which a fling settles, in units/second.
pub const DEFAULT_SETTLE_VELOCITY: f64 = 50.0;

/// An exponential-decay fling simulator.
///
/// Velocity decays as `v(t) = v0 * decay^t` (with `t` in milliseconds), and
/// position follows the closed-form integral of that curve, clamped to
/// `[min, max]`. The curve settles once the instantaneous velocity drops
/// below the settle threshold or the unclamped position leaves the bounds.
///
/// The closed form keeps the simulation frame-coherent: the position at a
/// given elapsed time does not depend on how it was subdivided into frames.
#[derive(Clone, Copy, Debug)]
pub struct DecayCurve {
    start_pos: f64,
    /// Initial velocity, units per second.
    start_velocity: f64,
    decay_per_ms: f64,
    settle_velocity: f64,
    min: f64,
    max: f64,
    elapsed_ms: f64,
}

impl DecayCurve {
    pub fn new(
        start_pos: f64,
        velocity: f64,
        min: f64,
        max: f64,
        decay_per_ms: f64,
        settle_velocity: f64,
    ) -> Self {
        Self {
            start_pos,
            start_velocity: velocity,
            // decay == 1.0 would never settle and divides by ln(1) == 0
            decay_per_ms: decay_per_ms.clamp(1e-6, 0.999_999),
            settle_velocity: settle_velocity.abs().max(f64::EPSILON),
            min: min.min(max),
            max: max.max(min),
            elapsed_ms: 0.0,
        }
    }

    fn position_at(&self, t_ms: f64) -> f64 {
        // integral of v0 * decay^t over t, with velocity in units/second
        let travelled = self.start_velocity * (self.decay_per_ms.powf(t_ms) - 1.0)
            / (1000.0 * self.decay_per_ms.ln());
        self.start_pos + travelled
    }

    fn velocity_at(&self, t_ms: f64) -> f64 {
        self.start_velocity * self.decay_per_ms.powf(t_ms)
    }

    /// Advances the simulation by `delta_time_ms`.
    ///
    /// Returns the clamped position and whether the curve has settled.
    pub fn advance(&mut self, delta_time_ms: f64) -> (f64, bool) {
        self.elapsed_ms += delta_time_ms.max(0.0);
        let raw = self.position_at(self.elapsed_ms);
        let settled = self.velocity_at(self.elapsed_ms).abs() < self.settle_velocity
            || raw < self.min
            || raw > self.max;
        (raw.clamp(self.min, self.max), settled)
    }

    /// The clamped position at the current elapsed time.
    pub fn position(&self) -> f64 {
        self.position_at(self.elapsed_ms).clamp(self.min, self.max)
    }

    /// Where the curve would come to rest with unbounded travel.
    pub fn projected_end_pos(&self) -> f64 {
        self.start_pos - self.start_velocity / (1000.0 * self.decay_per_ms.ln())
    }
}
