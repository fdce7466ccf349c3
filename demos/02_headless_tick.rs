//! 02 - Headless Tick
//!
//! Runs the point simulation without any window or GPU and prints how long
//! advancing 100,000 points takes per frame.
//!
//! Run with: `cargo run --release --example 02_headless_tick`

use std::time::Instant;

use whorl_points::PointCloud;

const FRAMES: u32 = 600;

fn main() {
    let mut cloud = PointCloud::new(100_000);
    println!("Advancing {} points for {} frames...", cloud.len(), FRAMES);

    let start = Instant::now();
    for _ in 0..FRAMES {
        cloud.advance();
    }
    let elapsed = start.elapsed();

    let per_frame = elapsed.as_secs_f64() * 1000.0 / FRAMES as f64;
    println!(
        "{} frames in {:.1} ms ({:.4} ms/frame)",
        FRAMES,
        elapsed.as_secs_f64() * 1000.0,
        per_frame
    );

    // A handful of sample thetas as a sanity check of the accumulated state
    for point in cloud.points().iter().take(3) {
        println!("radius {:.3} -> theta {:.1}", point.radius, point.theta);
    }
}
