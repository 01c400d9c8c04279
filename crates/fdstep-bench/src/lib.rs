//! Benchmark profiles for the fdstep engine.
//!
//! Provides pre-seeded engines for benchmarking:
//!
//! - [`string_profile`]: a plucked string on a line, sequential or threaded
//! - [`membrane_profile`]: a Gaussian bump on a square membrane

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;

use fdstep_engine::{Engine, SchemeKind, SchemeSpec};
use fdstep_schemes::profiles::{gaussian_wave, linspace, triangle_wave};

/// Courant number used by every profile.
pub const PROFILE_COURANT: f64 = 0.8;

/// Leapfrog engine over `points` cells on `[0, 1]`, released from rest.
///
/// `threads = None` selects the sequential scheme; `Some(t)` the threaded
/// one with `t` workers.
pub fn string_profile(points: usize, threads: Option<usize>) -> Result<Engine, Box<dyn Error>> {
    let x = linspace(0.0, 1.0, points);
    let dx = 1.0 / (points.max(2) - 1) as f64;
    let kind = match threads {
        Some(_) => SchemeKind::ThreadedLeapfrog,
        None => SchemeKind::Leapfrog,
    };
    let mut spec = SchemeSpec::new(kind, vec![points], PROFILE_COURANT * dx, dx);
    spec.threads = threads;

    let mut engine = Engine::from_spec(&spec)?;
    let u0 = triangle_wave(&x, 0.1, 0.3, 0.4);
    engine.seed(0, &u0)?;
    engine.seed(1, &u0)?;
    Ok(engine)
}

/// Wave2D engine on an `n × n` unit square with a centred Gaussian bump.
pub fn membrane_profile(n: usize) -> Result<Engine, Box<dyn Error>> {
    let x = linspace(0.0, 1.0, n);
    let dx = 1.0 / (n.max(2) - 1) as f64;
    // 2-D stability needs c dt sqrt(2) / dx <= 1.
    let dt = PROFILE_COURANT * dx / 2.0f64.sqrt();
    let spec = SchemeSpec::new(SchemeKind::Wave2D, vec![n, n], dt, dx);

    let mut engine = Engine::from_spec(&spec)?;
    let bump = gaussian_wave(&x, 1.0, 0.5, 0.1);
    let u0: Vec<f64> = bump
        .iter()
        .flat_map(|&by| bump.iter().map(move |&bx| bx * by))
        .collect();
    engine.seed(0, &u0)?;
    engine.seed(1, &u0)?;
    Ok(engine)
}
