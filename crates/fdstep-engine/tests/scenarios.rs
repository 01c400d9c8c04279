//! Integration test: end-to-end stepping scenarios through `Engine`.
//!
//! Each scenario builds a scheme from a `SchemeSpec` or a builder, seeds
//! the history the way an outer array layer would, and checks the
//! published result and its time index.

use fdstep_core::{SeedError, StateError};
use fdstep_engine::{Engine, SchemeKind, SchemeSpec};
use fdstep_schemes::profiles::{euler_start, gaussian_wave, linspace, spacing};
use fdstep_schemes::{LaxAdvection1D, Leapfrog1D, Scheme};
use fdstep_test_utils::{assert_close, pulse, run_direct};

// ── Helpers ─────────────────────────────────────────────────────────

fn leapfrog_engine(n: usize, boundary_code: i32) -> Engine {
    let mut spec = SchemeSpec::new(SchemeKind::Leapfrog, vec![n], 0.5, 1.0);
    spec.boundary_code = boundary_code;
    Engine::from_spec(&spec).unwrap()
}

// ── Scenarios ───────────────────────────────────────────────────────

#[test]
fn leapfrog_pulse_splits_symmetrically() {
    let mut engine = leapfrog_engine(5, 0);
    let p = pulse(5, 2);
    engine.seed(0, &p).unwrap();
    engine.seed(1, &p).unwrap();
    engine.step().unwrap();

    assert_close(
        engine.current_result().unwrap(),
        &[0.0, 0.25, 0.5, 0.25, 0.0],
        1e-15,
    );
    assert_eq!(engine.current_time().unwrap(), 2);
}

#[test]
fn unseeded_engine_steps_zeros() {
    let mut engine = leapfrog_engine(6, 1);
    assert_eq!(engine.current_result().unwrap_err(), StateError::NotReady);
    engine.run(3).unwrap();
    assert_eq!(engine.current_result().unwrap(), &[0.0; 6]);
    assert_eq!(engine.current_time().unwrap(), 4);
}

#[test]
fn advection_result_bootstraps_leapfrog() {
    let n = 64;
    let x = linspace(0.0, 1.0, n);
    let dx = spacing(&x).unwrap();
    let dt = 0.5 * dx;
    let u0 = gaussian_wave(&x, 1.0, 0.5, 0.05);

    let advection = LaxAdvection1D::builder()
        .points(n)
        .dt(dt)
        .dx(dx)
        .build()
        .unwrap();
    let mut starter = Engine::new(Scheme::from(advection)).unwrap();
    starter.seed(0, &u0).unwrap();
    starter.step().unwrap();
    let u1 = starter.current_result().unwrap().to_vec();

    let leapfrog = Leapfrog1D::builder()
        .points(n)
        .dt(dt)
        .dx(dx)
        .build()
        .unwrap();
    let mut engine = Engine::new(leapfrog.clone()).unwrap();
    engine.seed(0, &u0).unwrap();
    engine.seed(1, &u1).unwrap();
    engine.run(20).unwrap();

    let expected = run_direct(&leapfrog, &[u0, u1], 20).unwrap();
    assert_eq!(engine.current_result().unwrap(), expected.as_slice());
    assert_eq!(engine.current_time().unwrap(), 21);
}

#[test]
fn euler_start_seeds_second_slice() {
    let n = 9;
    let u0 = vec![0.0; n];
    let v0 = vec![2.0; n];
    let u1 = euler_start(&u0, &v0, 0.25);
    assert_eq!(u1, vec![0.5; n]);

    let mut engine = leapfrog_engine(n, 2);
    engine.seed(0, &u0).unwrap();
    engine.seed(1, &u1).unwrap();
    engine.step().unwrap();
    // Flat slices keep a constant velocity under free ends.
    assert_close(engine.current_result().unwrap(), &[1.0; 9], 1e-15);
}

#[test]
fn seed_bytes_matches_seed() {
    let values = [0.0f64, 0.5, -1.25, 2.0, 0.0];
    let f64_bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    let f32_bytes: Vec<u8> = values
        .iter()
        .flat_map(|&v| (v as f32).to_le_bytes())
        .collect();

    let mut a = leapfrog_engine(5, 0);
    a.seed(0, &values).unwrap();
    a.seed(1, &values).unwrap();

    let mut b = leapfrog_engine(5, 0);
    b.seed_bytes(0, "float64", &f64_bytes).unwrap();
    b.seed_bytes(1, "f4", &f32_bytes).unwrap();

    a.run(4).unwrap();
    b.run(4).unwrap();
    assert_eq!(a.current_result().unwrap(), b.current_result().unwrap());
}

#[test]
fn seed_bytes_rejects_unsupported_dtype() {
    let mut engine = leapfrog_engine(5, 0);
    assert_eq!(
        engine.seed_bytes(0, "int32", &[0u8; 20]),
        Err(SeedError::TypeMismatch {
            dtype: "int32".into()
        })
    );
}

#[test]
fn seed_f32_widens() {
    let mut engine = Engine::from_spec(&SchemeSpec::new(
        SchemeKind::Advection,
        vec![4],
        0.1,
        1.0,
    ))
    .unwrap();
    engine.seed_f32(0, &[1.0, 1.0, 1.0, 1.0]).unwrap();
    engine.step().unwrap();
    assert_close(engine.current_result().unwrap(), &[1.0; 4], 1e-15);
}

#[test]
fn wave2d_snapshot_carries_extents() {
    let spec = SchemeSpec::new(SchemeKind::Wave2D, vec![5, 6], 0.5, 1.0);
    let mut engine = Engine::from_spec(&spec).unwrap();
    let mut p = vec![0.0; 30];
    p[2 * 6 + 3] = 1.0;
    engine.seed(0, &p).unwrap();
    engine.seed(1, &p).unwrap();
    engine.step().unwrap();

    let view = engine.snapshot().unwrap();
    assert_eq!(view.extents, &[5, 6]);
    assert_eq!(view.time, 2);
    assert_eq!(view.data.len(), 30);
    assert!((view.data[2 * 6 + 3] - 0.0).abs() < 1e-15);
    assert!((view.data[2 * 6 + 4] - 0.25).abs() < 1e-15);
    assert!((view.data[6 + 3] - 0.25).abs() < 1e-15);
}

#[test]
fn threaded_engine_reports_workers() {
    let mut spec = SchemeSpec::new(SchemeKind::ThreadedLeapfrog, vec![50], 0.4, 1.0);
    spec.threads = Some(3);
    let mut engine = Engine::from_spec(&spec).unwrap();
    engine.seed(0, &pulse(50, 25)).unwrap();
    engine.seed(1, &pulse(50, 25)).unwrap();
    engine.run(5).unwrap();
    assert_eq!(engine.last_metrics().workers, 3);
    assert_eq!(engine.last_metrics().memory_bytes, 3 * 50 * 8);
}
