//! Plucked string: a triangle profile released from rest.
//!
//! Demonstrates:
//!   1. Building a leapfrog scheme from a flat `SchemeSpec`
//!   2. Seeding both history slices from an initial profile
//!   3. Stepping, reading snapshots and per-step metrics
//!   4. Cross-checking the threaded scheme against the sequential one
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example plucked_string

use fdstep_engine::{Engine, SchemeKind, SchemeSpec};
use fdstep_schemes::profiles::{linspace, spacing, triangle_wave};

// ─── Grid parameters ────────────────────────────────────────────

const POINTS: usize = 201;
const LENGTH: f64 = 1.0;
const SPEED: f64 = 1.0;
const COURANT: f64 = 0.9;
const STEPS: u64 = 400;
const REPORT_EVERY: u64 = 100;

fn spec(kind: SchemeKind, dx: f64) -> SchemeSpec {
    let mut spec = SchemeSpec::new(kind, vec![POINTS], COURANT * dx / SPEED, dx);
    spec.speed = SPEED;
    spec
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let x = linspace(0.0, LENGTH, POINTS);
    let dx = spacing(&x).ok_or("grid needs at least two points")?;
    let u0 = triangle_wave(&x, 0.1, 0.3 * LENGTH, 0.4 * LENGTH);

    let mut engine = Engine::from_spec(&spec(SchemeKind::Leapfrog, dx))?;
    engine.seed(0, &u0)?;
    engine.seed(1, &u0)?;
    println!(
        "leapfrog: {POINTS} points, dx={dx:.5}, courant={:.2}",
        engine.courant()
    );

    for chunk in 0..STEPS / REPORT_EVERY {
        engine.run(REPORT_EVERY)?;
        let view = engine.snapshot()?;
        let peak = view.data.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        let m = engine.last_metrics();
        println!(
            "  [{chunk}] t={:>4} peak={peak:.5} step={}us",
            view.time, m.total_us
        );
    }

    let mut threaded = Engine::from_spec(&spec(SchemeKind::ThreadedLeapfrog, dx))?;
    threaded.seed(0, &u0)?;
    threaded.seed(1, &u0)?;
    threaded.run(STEPS)?;
    let identical = threaded.current_result()? == engine.current_result()?;
    println!(
        "threaded ({} workers) matches sequential: {identical}",
        threaded.last_metrics().workers
    );
    Ok(())
}
