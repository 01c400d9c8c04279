//! Initial wave profiles for seeding 1-D grids.
//!
//! ```
//! use fdstep_schemes::profiles::{linspace, triangle_wave};
//!
//! let x = linspace(0.0, 10.0, 201);
//! let u0 = triangle_wave(&x, 1.0, 3.0, 2.0);
//! assert_eq!(u0[60], 1.0);
//! ```

/// `n` evenly spaced points from `start` to `stop` inclusive.
///
/// The last point is exactly `stop`. A single point is `start`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut x: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            x[n - 1] = stop;
            x
        }
    }
}

/// Spacing of a uniform grid, `x[1] - x[0]`.
pub fn spacing(x: &[f64]) -> Option<f64> {
    match x {
        [a, b, ..] => Some(b - a),
        _ => None,
    }
}

/// Gaussian packet `amplitude * exp(-((x - mean) / sigma)² / 2)`.
pub fn gaussian_wave(x: &[f64], amplitude: f64, mean: f64, sigma: f64) -> Vec<f64> {
    x.iter()
        .map(|&xi| {
            let z = (xi - mean) / sigma;
            amplitude * (-(z * z) / 2.0).exp()
        })
        .collect()
}

/// Triangular packet peaking at `location` over a base of width `base`.
pub fn triangle_wave(x: &[f64], amplitude: f64, location: f64, base: f64) -> Vec<f64> {
    let halfbase = base / 2.0;
    x.iter()
        .map(|&xi| {
            let d = (xi - location).abs();
            if d < halfbase {
                amplitude * (1.0 - d / halfbase)
            } else {
                0.0
            }
        })
        .collect()
}

/// Rectangular (shock) packet of `width` centred on `location`.
pub fn rectangle_wave(x: &[f64], amplitude: f64, location: f64, width: f64) -> Vec<f64> {
    let halfwidth = width / 2.0;
    x.iter()
        .map(|&xi| {
            if (xi - location).abs() < halfwidth {
                amplitude
            } else {
                0.0
            }
        })
        .collect()
}

/// Second leapfrog slice from displacement `u0` and velocity `v0`:
/// `u0 + dt * v0`. Extra values in the longer input are ignored.
pub fn euler_start(u0: &[f64], v0: &[f64], dt: f64) -> Vec<f64> {
    u0.iter().zip(v0).map(|(&u, &v)| u + dt * v).collect()
}
