use crate::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_i32(&mut self, start: i32, end_exclusive: i32) -> i32 {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as i32
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// A content surface double that clamps at its own top, like a real list.
#[derive(Debug, Default)]
struct FakeContent {
    offset: AtomicI32,
}

impl FakeContent {
    fn new(offset: i32) -> Arc<Self> {
        Arc::new(Self {
            offset: AtomicI32::new(offset),
        })
    }

    fn offset(&self) -> i32 {
        self.offset.load(Ordering::Relaxed)
    }
}

impl ScrollableContent for FakeContent {
    fn scroll_offset(&self) -> i32 {
        self.offset.load(Ordering::Relaxed)
    }

    fn scroll_by(&self, dy: i32) {
        let cur = self.offset.load(Ordering::Relaxed);
        self.offset.store((cur + dy).max(0), Ordering::Relaxed);
    }
}

fn coordinator_with_content(content: &Arc<FakeContent>) -> Coordinator {
    let content = Arc::clone(content);
    let mut c = Coordinator::new(CoordinatorOptions::new().with_content_resolver(Some(
        move || Some(Arc::clone(&content) as Arc<dyn ScrollableContent>),
    )));
    c.set_extents(Extents::new(300, 100));
    c
}

fn sample(y: f32, t: u64) -> PointerSample {
    PointerSample::new(y, t)
}

// ---------------------------------------------------------------- gesture

#[test]
fn tap_under_slop_produces_no_events() {
    let mut g = GestureTracker::new(8.0, 1000);
    g.on_pointer_down(sample(100.0, 0));
    assert_eq!(g.on_pointer_move(sample(104.0, 16)), None);
    assert_eq!(g.on_pointer_move(sample(97.0, 32)), None);
    assert!(!g.is_dragging());
    assert_eq!(g.on_pointer_up(sample(98.0, 48)), None);
}

#[test]
fn slop_excess_is_first_drag_delta() {
    let mut g = GestureTracker::new(8.0, 1000);
    g.on_pointer_down(sample(100.0, 0));
    // finger moved up by 20, slop 8: only the excess 12 is delivered
    assert_eq!(
        g.on_pointer_move(sample(80.0, 16)),
        Some(GestureEvent::Drag { dy: 12.0 })
    );
    assert!(g.is_dragging());

    // pulling down past the slop delivers a negative excess
    let mut g = GestureTracker::new(8.0, 1000);
    g.on_pointer_down(sample(100.0, 0));
    assert_eq!(
        g.on_pointer_move(sample(110.0, 16)),
        Some(GestureEvent::Drag { dy: -2.0 })
    );
}

#[test]
fn drag_deltas_follow_pointer() {
    let mut g = GestureTracker::new(8.0, 1000);
    g.on_pointer_down(sample(100.0, 0));
    g.on_pointer_move(sample(80.0, 16));
    assert_eq!(
        g.on_pointer_move(sample(75.0, 32)),
        Some(GestureEvent::Drag { dy: 5.0 })
    );
    assert_eq!(
        g.on_pointer_move(sample(78.0, 48)),
        Some(GestureEvent::Drag { dy: -3.0 })
    );
}

#[test]
fn moves_without_pointer_down_are_ignored() {
    let mut g = GestureTracker::new(8.0, 1000);
    assert_eq!(g.on_pointer_move(sample(50.0, 0)), None);
    assert_eq!(g.on_pointer_up(sample(50.0, 16)), None);
}

#[test]
fn release_velocity_is_inverted_pointer_velocity() {
    let mut g = GestureTracker::new(8.0, 1000);
    g.on_pointer_down(sample(200.0, 0));
    g.on_pointer_move(sample(180.0, 16));
    g.on_pointer_move(sample(160.0, 32));
    let Some(GestureEvent::Release { velocity }) = g.on_pointer_up(sample(150.0, 48)) else {
        panic!("expected a release event");
    };
    // pointer travelled -50 units in 48ms; scroll velocity is the negation
    let expected = 50.0 / 0.048;
    assert!((velocity - expected).abs() < 1.0, "velocity = {velocity}");
}

#[test]
fn cancel_mid_drag_emits_no_release() {
    let mut g = GestureTracker::new(8.0, 1000);
    g.on_pointer_down(sample(200.0, 0));
    assert!(g.on_pointer_move(sample(150.0, 16)).is_some());
    g.on_pointer_cancel();
    assert!(!g.is_dragging());
    // the tracker is fully reset; a stray up is a no-op
    assert_eq!(g.on_pointer_up(sample(150.0, 32)), None);
}

// --------------------------------------------------------------- velocity

#[test]
fn velocity_tracker_uses_recent_window_only() {
    let mut v = VelocityTracker::new(1000);
    // an early fast burst, long since over
    v.push(0.0, 0);
    v.push(100.0, 100);
    // a much later, slower movement; the burst falls outside the window
    v.push(110.0, 1200);
    v.push(120.0, 1400);
    let vel = v.velocity();
    assert!((vel - 50.0).abs() < 0.01, "velocity = {vel}");
}

#[test]
fn velocity_tracker_ignores_out_of_order_samples() {
    let mut v = VelocityTracker::new(1000);
    v.push(0.0, 100);
    v.push(50.0, 200);
    v.push(999.0, 50); // stale, dropped
    assert!((v.velocity() - 500.0).abs() < 0.01);
}

#[test]
fn velocity_tracker_degenerate_cases() {
    let v = VelocityTracker::new(1000);
    assert_eq!(v.velocity(), 0.0);

    let mut v = VelocityTracker::new(1000);
    v.push(42.0, 7);
    assert_eq!(v.velocity(), 0.0);
}

// ------------------------------------------------------------------ fling

#[test]
fn decay_curve_travels_and_settles() {
    let mut curve = DecayCurve::new(0.0, 1000.0, 0.0, 1e9, 0.998, 50.0);
    let projected = curve.projected_end_pos();

    let mut last = 0.0;
    let mut settled = false;
    for _ in 0..10_000 {
        let (pos, done) = curve.advance(16.0);
        assert!(pos >= last, "position went backwards: {pos} < {last}");
        last = pos;
        if done {
            settled = true;
            break;
        }
    }
    assert!(settled, "curve never settled");
    // settles a bit short of the unbounded end position
    assert!(last <= projected + 1e-6);
    assert!(last > projected * 0.9);
}

#[test]
fn decay_curve_clamps_and_settles_at_bound() {
    let mut curve = DecayCurve::new(100.0, -5000.0, 0.0, 1e9, 0.998, 50.0);
    let mut pos = 100.0;
    let mut settled = false;
    for _ in 0..10_000 {
        let (p, done) = curve.advance(16.0);
        pos = p;
        if done {
            settled = true;
            break;
        }
    }
    assert!(settled);
    assert_eq!(pos, 0.0);
}

#[test]
fn decay_curve_is_frame_coherent() {
    // the same elapsed time must land on the same position, however the
    // frames were subdivided
    let mut a = DecayCurve::new(0.0, 1234.0, -1e9, 1e9, 0.998, 50.0);
    let mut b = a;
    let (pa, _) = a.advance(1000.0);
    let mut pb = 0.0;
    for _ in 0..100 {
        pb = b.advance(10.0).0;
    }
    assert!((pa - pb).abs() < 1e-6);
}

// ------------------------------------------------------------ arbitration

#[test]
fn expanded_header_passes_pull_down_to_content() {
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);
    assert_eq!(c.offset(), 0);
    assert_eq!(c.pre_scroll(ScrollOrigin::Content, -30), 0);
    assert_eq!(c.offset(), 0);
}

#[test]
fn collapsed_header_passes_push_up_to_content() {
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);
    c.fold();
    assert_eq!(c.offset(), 200);
    assert_eq!(c.pre_scroll(ScrollOrigin::Content, 40), 0);
    assert_eq!(c.offset(), 200);
}

#[test]
fn content_scrolls_to_its_top_before_header_expands() {
    let content = FakeContent::new(50);
    let mut c = coordinator_with_content(&content);
    c.scroll_to(100);

    // pull-down defers to the content until it reaches its own top
    assert_eq!(c.pre_scroll(ScrollOrigin::Content, -20), 0);
    assert_eq!(c.offset(), 100);

    // push-up still collapses the header
    assert_eq!(c.pre_scroll(ScrollOrigin::Content, 20), 20);
    assert_eq!(c.offset(), 120);

    // once the content is at its top, pull-down expands the header
    content.scroll_by(-50);
    assert_eq!(content.offset(), 0);
    assert_eq!(c.pre_scroll(ScrollOrigin::Content, -20), -20);
    assert_eq!(c.offset(), 100);
}

#[test]
fn consumption_clamps_within_a_single_delta() {
    // cumulative 220 against a travel of 200: 20 is left for the content
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);

    let mut consumed_total = 0;
    let mut remainder_total = 0;
    for dy in [50, 80, 90] {
        let consumed = c.pre_scroll(ScrollOrigin::Content, dy);
        consumed_total += consumed;
        remainder_total += dy - consumed;
    }
    assert_eq!(c.offset(), 200);
    assert_eq!(consumed_total, 200);
    assert_eq!(remainder_total, 20);
}

#[test]
fn header_origin_is_declined_in_pre_scroll() {
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);
    assert_eq!(c.pre_scroll(ScrollOrigin::Header, 50), 0);
    assert_eq!(c.offset(), 0);

    c.post_scroll(ScrollOrigin::Header, 50);
    assert_eq!(c.offset(), 50);

    // content-origin residue is not the header's business
    c.post_scroll(ScrollOrigin::Content, 50);
    assert_eq!(c.offset(), 50);
}

#[test]
fn scroll_to_clamps_to_valid_range() {
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);
    c.scroll_to(-50);
    assert_eq!(c.offset(), 0);
    c.scroll_to(10_000);
    assert_eq!(c.offset(), 200);
    c.scroll_by(-10_000);
    assert_eq!(c.offset(), 0);
}

#[test]
fn fold_and_unfold() {
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);
    c.fold();
    assert_eq!(c.offset(), c.max_offset());
    c.unfold();
    assert_eq!(c.offset(), 0);

    c.start_fling(800.0, 0);
    assert!(c.is_flinging());
    c.fold();
    assert!(!c.is_flinging());
    assert_eq!(c.offset(), 200);
    assert!(!c.tick(16));
}

#[test]
fn operations_before_extents_are_known_are_no_ops() {
    let mut c = Coordinator::default();
    assert_eq!(c.max_offset(), 0);
    c.scroll_by(50);
    assert_eq!(c.offset(), 0);
    assert_eq!(c.pre_scroll(ScrollOrigin::Content, 50), 0);
    c.fold();
    assert_eq!(c.offset(), 0);
}

#[test]
fn extents_changes_invalidate_max_offset_and_reclamp() {
    let mut c = Coordinator::default();
    c.set_extents(Extents::new(300, 100));
    assert_eq!(c.max_offset(), 200);
    c.fold();
    assert_eq!(c.offset(), 200);

    c.set_extents(Extents::new(250, 100));
    assert_eq!(c.max_offset(), 150);
    assert_eq!(c.offset(), 150);

    // hover larger than header never yields a negative travel
    c.set_extents(Extents::new(50, 100));
    assert_eq!(c.max_offset(), 0);
    assert_eq!(c.offset(), 0);
}

#[test]
fn missing_content_resolver_drops_forwarded_motion() {
    let mut c = Coordinator::default();
    c.set_extents(Extents::new(300, 100));
    c.fold();
    c.start_fling(500.0, 0);
    // frames advance and settle without a content surface to forward to
    let mut t = 0;
    for _ in 0..10_000 {
        t += 16;
        if !c.tick(t) {
            break;
        }
    }
    assert!(!c.is_flinging());
    assert_eq!(c.offset(), 200);
}

#[test]
fn random_deltas_never_escape_valid_range() {
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);
    let mut rng = Lcg::new(0xC0FFEE);

    for _ in 0..5_000 {
        let dy = rng.gen_range_i32(-300, 301);
        let origin = if rng.gen_bool() {
            ScrollOrigin::Content
        } else {
            ScrollOrigin::Header
        };
        let before = c.offset();
        let consumed = c.pre_scroll(origin, dy);
        assert_eq!(c.offset(), before + consumed);
        c.post_scroll(origin, dy - consumed);

        assert!(c.offset() >= 0);
        assert!(c.offset() <= c.max_offset());

        if rng.gen_range_i32(0, 100) < 2 {
            if rng.gen_bool() {
                c.fold();
            } else {
                c.unfold();
            }
        }
    }
}

// ----------------------------------------------------------- fling frames

fn run_fling(c: &mut Coordinator, start_ms: u64) -> u64 {
    let mut t = start_ms;
    for _ in 0..10_000 {
        t += 16;
        if !c.tick(t) {
            return t;
        }
    }
    panic!("fling never settled");
}

#[test]
fn fling_collapses_header_then_scrolls_content() {
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);

    c.start_fling(2000.0, 0);
    run_fling(&mut c, 0);

    // the header travel is exhausted first, the rest goes to the content
    assert_eq!(c.offset(), 200);
    assert!(content.offset() > 0, "content = {}", content.offset());
}

#[test]
fn fling_from_collapsed_crosses_into_header_without_reset() {
    // release while fully collapsed, with the content scrolled down and the
    // gesture continuing toward the top
    let content = FakeContent::new(300);
    let mut c = coordinator_with_content(&content);
    c.scroll_to(200);

    c.start_fling(-1000.0, 0);
    assert!(c.is_flinging());

    let mut t = 0;
    let mut header_moved_while_content_scrolled = false;
    for _ in 0..10_000 {
        t += 16;
        let offset_before = c.offset();
        let more = c.tick(t);
        if content.offset() > 0 && c.offset() != offset_before {
            header_moved_while_content_scrolled = true;
        }
        if !more {
            break;
        }
    }
    assert!(!c.is_flinging());
    // the header stays pinned until the content reaches its own top
    assert!(!header_moved_while_content_scrolled);
    assert_eq!(content.offset(), 0);
    // then the remaining momentum expands the header
    assert!(c.offset() < 200, "offset = {}", c.offset());
    assert!(c.offset() >= 0);
}

#[test]
fn fling_frames_conserve_combined_position() {
    let content = FakeContent::new(300);
    let mut c = coordinator_with_content(&content);
    c.scroll_to(200);

    let start = (c.offset() + content.offset()) as f64;
    let mut curve = DecayCurve::new(
        start,
        -1000.0,
        -200.0,
        i64::MAX as f64,
        DEFAULT_DECAY_PER_MS,
        DEFAULT_SETTLE_VELOCITY,
    );

    c.start_fling(-1000.0, 0);
    let mut t = 0;
    let mut frames = 0;
    loop {
        t += 16;
        let more = c.tick(t);
        if content.offset() == 0 {
            // the content surface clamps at its own top; past this point the
            // leftover of the crossing frame is dropped, as in a real list
            break;
        }
        let (expected, _) = curve.advance(16.0);
        let combined = (c.offset() + content.offset()) as f64;
        // each frame applies exactly the curve's per-frame delta (up to
        // integer rounding), with no discontinuity at the boundary
        assert!(
            (combined - expected).abs() <= 1.0,
            "combined = {combined}, expected = {expected}"
        );
        frames += 1;
        if !more {
            break;
        }
    }
    assert!(frames > 3, "expected several conserved frames, got {frames}");
}

#[test]
fn new_gesture_aborts_fling() {
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);
    c.start_fling(1500.0, 0);
    assert!(c.tick(16));

    let offset = c.offset();
    c.notify_gesture_start();
    assert!(!c.is_flinging());
    assert!(!c.tick(32));
    assert_eq!(c.offset(), offset);
}

#[test]
fn release_at_max_extends_lower_bound() {
    // with the lower bound extended to -max_offset, a fling that starts at
    // the collapsed boundary has enough travel to fully expand the header
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);
    c.scroll_to(200);

    c.start_fling(-4000.0, 0);
    run_fling(&mut c, 0);
    assert_eq!(c.offset(), 0);
}

// ---------------------------------------------------------- notifications

#[test]
fn on_change_fires_on_offset_changes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_cb = Arc::clone(&calls);
    let mut c = Coordinator::new(CoordinatorOptions::new().with_on_change(Some(move |_: &Coordinator| {
        calls_cb.fetch_add(1, Ordering::Relaxed);
    })));
    c.set_extents(Extents::new(300, 100));

    c.scroll_by(50);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    // no-op scrolls do not notify
    c.scroll_by(0);
    c.scroll_to(50);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn batch_update_coalesces_notifications() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_cb = Arc::clone(&calls);
    let mut c = Coordinator::new(CoordinatorOptions::new().with_on_change(Some(move |_: &Coordinator| {
        calls_cb.fetch_add(1, Ordering::Relaxed);
    })));
    c.set_extents(Extents::new(300, 100));

    c.batch_update(|c| {
        c.scroll_by(30);
        c.scroll_by(40);
        c.fold();
    });
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(c.offset(), 200);
}

#[test]
fn state_snapshot_reflects_coordinator() {
    let content = FakeContent::new(0);
    let mut c = coordinator_with_content(&content);
    c.scroll_to(120);
    c.start_fling(900.0, 0);

    let state = c.state();
    assert_eq!(
        state,
        CoordinatorState {
            offset: 120,
            max_offset: 200,
            is_flinging: true,
        }
    );
}
