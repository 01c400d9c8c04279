//! Test utilities and fixture schemes for fdstep development.
//!
//! Provides deterministic grid data, a tolerance assertion, fixture
//! schemes ([`HoldScheme`], [`FailingScheme`]) and [`run_direct`], a
//! reference stepping loop over plain vectors used to cross-check the
//! engine's history rotation.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{FailingScheme, HoldScheme};

use fdstep_core::StepError;
use fdstep_scheme::{Propagate, StepContext};

/// Deterministic pseudo-random values in `[-1, 1)`.
///
/// A 64-bit LCG; the same `seed` always yields the same sequence.
pub fn pseudo_random(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            // Top 53 bits as a fraction in [0, 1).
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            2.0 * unit - 1.0
        })
        .collect()
}

/// A single unit spike at `at`, zero elsewhere.
pub fn pulse(n: usize, at: usize) -> Vec<f64> {
    let mut v = vec![0.0; n];
    v[at] = 1.0;
    v
}

/// Panic unless every pair of values is within `tol`.
pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tol,
            "index {i}: got {a}, expected {e} (tol {tol})"
        );
    }
}

/// Step `scheme` `steps` times over plain vectors, shifting the history
/// by one slice per step, and return the final result.
///
/// `history` holds the `k-1` initial slices, oldest first.
pub fn run_direct(
    scheme: &dyn Propagate,
    history: &[Vec<f64>],
    steps: u64,
) -> Result<Vec<f64>, StepError> {
    let mut history: Vec<Vec<f64>> = history.to_vec();
    let mut next = vec![0.0; scheme.shape().len()];
    for step in 0..steps {
        let previous: Vec<&[f64]> = history.iter().map(Vec::as_slice).collect();
        let mut ctx = StepContext::new(&previous, &mut next, scheme.shape(), step);
        scheme.propagate(&mut ctx)?;
        history.remove(0);
        history.push(next.clone());
    }
    Ok(next)
}
