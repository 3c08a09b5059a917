use coordinator::{DEFAULT_DECAY_PER_MS, DEFAULT_SETTLE_VELOCITY, DecayCurve};

fn main() {
    // Watch an exponential-decay fling settle, frame by frame.
    let mut curve = DecayCurve::new(
        0.0,
        1200.0,
        0.0,
        f64::from(i32::MAX),
        DEFAULT_DECAY_PER_MS,
        DEFAULT_SETTLE_VELOCITY,
    );
    println!("projected end position: {:.1}", curve.projected_end_pos());

    let mut frame = 0;
    loop {
        let (pos, settled) = curve.advance(16.0);
        frame += 1;
        if frame % 10 == 0 || settled {
            println!("frame {frame:3}: position {pos:7.1}");
        }
        if settled {
            break;
        }
    }
}
