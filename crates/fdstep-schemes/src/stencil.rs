//! Shared 1-D stencil helpers.
//!
//! [`sweep_1d`] applies a three-point update across a line under a
//! boundary policy; the advection and leapfrog schemes differ only in the
//! cell function they pass in.

use fdstep_core::{Boundary, ConfigError, GridShape, SchemeParams};

/// Fewest points a 1-D three-point stencil accepts.
pub const MIN_POINTS_1D: usize = 3;

/// Validate the common 1-D builder inputs.
///
/// Grid checks run before parameter checks, and all of them before any
/// buffer exists.
pub(crate) fn line_setup(
    points: Option<usize>,
    speed: f64,
    dt: Option<f64>,
    dx: Option<f64>,
) -> Result<(GridShape, SchemeParams), ConfigError> {
    let points = points.ok_or(ConfigError::MissingParameter { name: "points" })?;
    let shape = GridShape::line(points)?;
    shape.require(1, MIN_POINTS_1D)?;
    let dt = dt.ok_or(ConfigError::MissingParameter { name: "dt" })?;
    let dx = dx.ok_or(ConfigError::MissingParameter { name: "dx" })?;
    let params = SchemeParams::new(speed, dt, dx)?;
    Ok((shape, params))
}

/// Log a warning when the Courant number suggests divergence.
pub(crate) fn warn_if_unstable(name: &str, courant: f64) {
    if courant.abs() > 1.0 {
        log::warn!("{name}: Courant number {courant:.4} exceeds 1, output may diverge");
    }
}

/// Fill `next` from a three-point `update(jm1, j, jp1)` under `boundary`.
///
/// `edges` is the slice whose end values a fixed boundary copies.
/// Free ends are extrapolated after the interior sweep, from the values
/// it just produced. `next.len()` must be at least [`MIN_POINTS_1D`].
pub(crate) fn sweep_1d<F>(next: &mut [f64], edges: &[f64], boundary: Boundary, update: F)
where
    F: Fn(usize, usize, usize) -> f64,
{
    let n = next.len();
    match boundary {
        Boundary::Fixed => {
            next[0] = edges[0];
            next[n - 1] = edges[n - 1];
            for j in 1..n - 1 {
                next[j] = update(j - 1, j, j + 1);
            }
        }
        Boundary::Periodic => {
            for j in 0..n {
                let jp1 = (j + 1) % n;
                let jm1 = if j == 0 { n - 1 } else { j - 1 };
                next[j] = update(jm1, j, jp1);
            }
        }
        Boundary::FreeEnds => {
            for j in 1..n - 1 {
                next[j] = update(j - 1, j, j + 1);
            }
            next[0] = next[1];
            next[n - 1] = next[n - 2];
        }
    }
}

/// One leapfrog cell: `rho2 * (last[jp1] - 2 last[j] + last[jm1]) + 2 last[j] - b4last[j]`.
///
/// Shared by the sequential and threaded schemes so both round identically.
#[inline]
pub(crate) fn leapfrog_cell(
    rho2: f64,
    b4last: &[f64],
    last: &[f64],
    jm1: usize,
    j: usize,
    jp1: usize,
) -> f64 {
    rho2 * (last[jp1] - 2.0 * last[j] + last[jm1]) + 2.0 * last[j] - b4last[j]
}
