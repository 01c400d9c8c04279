//! Three-level leapfrog for the 2-D wave equation.
//!
//! Grids are flattened row by row with x as the fast index, so the
//! extents are `[ny, nx]`. For every interior cell:
//!
//! ```text
//! dudx2 = (u1[ix-1,iy] - 2 u1[ix,iy] + u1[ix+1,iy]) / dx²
//! dudy2 = (u1[ix,iy-1] - 2 u1[ix,iy] + u1[ix,iy+1]) / dy²
//! next  = dt² c² (dudx2 + dudy2) + 2 u1[ix,iy] - u0[ix,iy]
//! ```
//!
//! Every border cell is held at its `u1` value.

use crate::stencil::warn_if_unstable;
use fdstep_core::params::positive_step;
use fdstep_core::{Boundary, ConfigError, GridShape, SchemeParams, StepError};
use fdstep_scheme::{Propagate, StepContext};

/// Fewest points along either axis.
pub const MIN_POINTS_2D: usize = 5;

/// Membrane wave propagation on a rectangular grid with fixed edges.
#[derive(Clone, Debug)]
pub struct Wave2D {
    shape: GridShape,
    params: SchemeParams,
    dy: f64,
    tcsquared: f64,
}

/// Builder for [`Wave2D`].
///
/// Required fields: `rows`, `cols`, `dt` and `dx`. `dy` defaults to `dx`,
/// speed to 1. Only fixed edges are implemented; any other boundary is
/// accepted with a warning and ignored.
pub struct Wave2DBuilder {
    rows: Option<usize>,
    cols: Option<usize>,
    speed: f64,
    dt: Option<f64>,
    dx: Option<f64>,
    dy: Option<f64>,
    boundary: Boundary,
}

impl Wave2D {
    /// Create a new builder.
    pub fn builder() -> Wave2DBuilder {
        Wave2DBuilder {
            rows: None,
            cols: None,
            speed: 1.0,
            dt: None,
            dx: None,
            dy: None,
            boundary: Boundary::Fixed,
        }
    }

    /// Points along y (slow axis).
    pub fn rows(&self) -> usize {
        self.shape.extents()[0]
    }

    /// Points along x (fast axis).
    pub fn cols(&self) -> usize {
        self.shape.extents()[1]
    }

    /// Grid spacing along y.
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Physical parameters (`dx` is the x spacing).
    pub fn params(&self) -> &SchemeParams {
        &self.params
    }

    /// `c dt sqrt(1/dx² + 1/dy²)`, the 2-D stability number.
    ///
    /// Explicit leapfrog on the membrane diverges once this exceeds 1.
    pub fn stability_number(&self) -> f64 {
        let dx = self.params.dx();
        let inv = 1.0 / (dx * dx) + 1.0 / (self.dy * self.dy);
        self.params.speed() * self.params.dt() * inv.sqrt()
    }
}

impl Wave2DBuilder {
    /// Points along y, at least 5.
    pub fn rows(mut self, ny: usize) -> Self {
        self.rows = Some(ny);
        self
    }

    /// Points along x, at least 5.
    pub fn cols(mut self, nx: usize) -> Self {
        self.cols = Some(nx);
        self
    }

    /// Wave speed (default 1.0).
    pub fn speed(mut self, c: f64) -> Self {
        self.speed = c;
        self
    }

    /// Time step.
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Grid spacing along x.
    pub fn dx(mut self, dx: f64) -> Self {
        self.dx = Some(dx);
        self
    }

    /// Grid spacing along y (default `dx`).
    pub fn dy(mut self, dy: f64) -> Self {
        self.dy = Some(dy);
        self
    }

    /// Boundary selector. Only [`Boundary::Fixed`] has an effect.
    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Build the scheme, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a required field is missing, either axis has fewer
    /// than 5 points, a step is not finite and positive, or the speed is
    /// not finite.
    pub fn build(self) -> Result<Wave2D, ConfigError> {
        let ny = self.rows.ok_or(ConfigError::MissingParameter { name: "rows" })?;
        let nx = self.cols.ok_or(ConfigError::MissingParameter { name: "cols" })?;
        let shape = GridShape::plane(ny, nx)?;
        shape.require(2, MIN_POINTS_2D)?;
        let dt = self.dt.ok_or(ConfigError::MissingParameter { name: "dt" })?;
        let dx = self.dx.ok_or(ConfigError::MissingParameter { name: "dx" })?;
        let params = SchemeParams::new(self.speed, dt, dx)?;
        let dy = positive_step("dy", self.dy.unwrap_or(dx))?;

        if self.boundary != Boundary::Fixed {
            log::warn!(
                "Wave2D: boundary '{}' is not supported, edges stay fixed",
                self.boundary
            );
        }
        let scheme = Wave2D {
            shape,
            params,
            dy,
            tcsquared: dt * dt * self.speed * self.speed,
        };
        warn_if_unstable("Wave2D", scheme.stability_number());
        Ok(scheme)
    }
}

impl Propagate for Wave2D {
    fn name(&self) -> &str {
        "Wave2D"
    }

    fn history_depth(&self) -> usize {
        3
    }

    fn shape(&self) -> &GridShape {
        &self.shape
    }

    fn courant(&self) -> f64 {
        self.params.courant()
    }

    fn propagate(&self, ctx: &mut StepContext<'_>) -> Result<(), StepError> {
        let (u0, u1, next) = ctx.three_level(&self.shape)?;
        let nx = self.cols();
        let ny = self.rows();
        let dx = self.params.dx();
        let dy = self.dy;
        let tcsquared = self.tcsquared;

        // iy = 0 and iy = ny-1
        next[..nx].copy_from_slice(&u1[..nx]);
        let top = (ny - 1) * nx;
        next[top..].copy_from_slice(&u1[top..]);

        for iy in 1..ny - 1 {
            let row = iy * nx;
            next[row] = u1[row];
            for ix in 1..nx - 1 {
                let c = row + ix;
                let dudx2 = (u1[c - 1] - 2.0 * u1[c] + u1[c + 1]) / dx / dx;
                let dudy2 = (u1[c - nx] - 2.0 * u1[c] + u1[c + nx]) / dy / dy;
                next[c] = tcsquared * (dudx2 + dudy2) + 2.0 * u1[c] - u0[c];
            }
            next[row + nx - 1] = u1[row + nx - 1];
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdstep_test_utils::{assert_close, pseudo_random, run_direct};
    use proptest::prelude::*;

    fn scheme(ny: usize, nx: usize) -> Wave2D {
        Wave2D::builder()
            .rows(ny)
            .cols(nx)
            .dt(0.5)
            .dx(1.0)
            .build()
            .unwrap()
    }

    fn transpose(v: &[f64], ny: usize, nx: usize) -> Vec<f64> {
        let mut t = vec![0.0; v.len()];
        for iy in 0..ny {
            for ix in 0..nx {
                t[ix * ny + iy] = v[iy * nx + ix];
            }
        }
        t
    }

    #[test]
    fn centre_pulse_spreads_to_four_neighbours() {
        let s = scheme(5, 5);
        let mut p = vec![0.0; 25];
        p[12] = 1.0;
        let out = run_direct(&s, &[p.clone(), p], 1).unwrap();
        let mut expected = vec![0.0; 25];
        for i in [7, 11, 13, 17] {
            expected[i] = 0.25;
        }
        assert_close(&out, &expected, 1e-15);
    }

    #[test]
    fn border_is_held_at_newest_slice() {
        let (ny, nx) = (5, 7);
        let s = scheme(ny, nx);
        let u0 = pseudo_random(ny * nx, 1);
        let u1 = pseudo_random(ny * nx, 2);
        let out = run_direct(&s, &[u0, u1.clone()], 1).unwrap();
        for iy in 0..ny {
            for ix in 0..nx {
                if ix == 0 || iy == 0 || ix == nx - 1 || iy == ny - 1 {
                    let i = s.shape().index2(ix, iy);
                    assert_eq!(out[i], u1[i], "border ({ix},{iy})");
                }
            }
        }
    }

    #[test]
    fn minimum_extent_is_five() {
        let small = Wave2D::builder().rows(4).cols(5).dt(0.1).dx(1.0).build();
        assert!(matches!(
            small,
            Err(ConfigError::ExtentTooSmall { axis: 0, extent: 4, min: 5 })
        ));
        let narrow = Wave2D::builder().rows(5).cols(4).dt(0.1).dx(1.0).build();
        assert!(matches!(
            narrow,
            Err(ConfigError::ExtentTooSmall { axis: 1, .. })
        ));
        assert!(Wave2D::builder().rows(5).cols(5).dt(0.1).dx(1.0).build().is_ok());
    }

    #[test]
    fn rejects_bad_dy() {
        let result = Wave2D::builder()
            .rows(5)
            .cols(5)
            .dt(0.1)
            .dx(1.0)
            .dy(-1.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::NonPositiveStep { name: "dy", .. })
        ));
    }

    #[test]
    fn non_fixed_boundary_is_ignored() {
        let periodic = Wave2D::builder()
            .rows(6)
            .cols(6)
            .dt(0.5)
            .dx(1.0)
            .boundary(Boundary::Periodic)
            .build()
            .unwrap();
        let fixed = scheme(6, 6);
        let u0 = pseudo_random(36, 5);
        let u1 = pseudo_random(36, 6);
        assert_eq!(
            run_direct(&periodic, &[u0.clone(), u1.clone()], 2).unwrap(),
            run_direct(&fixed, &[u0, u1], 2).unwrap()
        );
    }

    #[test]
    fn mismatched_context_grid_is_an_error() {
        let s = scheme(6, 6);
        let small = GridShape::plane(5, 5).unwrap();
        let u = vec![0.0; 25];
        let previous = [u.as_slice(), u.as_slice()];
        let mut next = vec![0.0; 25];
        let mut ctx = StepContext::new(&previous, &mut next, &small, 0);
        assert_eq!(
            s.propagate(&mut ctx),
            Err(StepError::ShapeMismatch {
                expected: vec![6, 6],
                got: vec![5, 5]
            })
        );
    }

    #[test]
    fn courant_is_one_dimensional_ratio() {
        let s = Wave2D::builder()
            .rows(5)
            .cols(5)
            .speed(1.0)
            .dt(0.5)
            .dx(1.0)
            .dy(1.0)
            .build()
            .unwrap();
        assert!((s.courant() - 0.5).abs() < 1e-15);
        assert!((s.stability_number() - 0.5 * 2.0f64.sqrt()).abs() < 1e-15);
    }

    proptest! {
        #[test]
        fn flat_history_is_fixed_point(ny in 5usize..12, nx in 5usize..12, value in -5.0f64..5.0) {
            let s = scheme(ny, nx);
            let flat = vec![value; ny * nx];
            let out = run_direct(&s, &[flat.clone(), flat], 3).unwrap();
            prop_assert!(out.iter().all(|&v| v == value));
        }

        #[test]
        fn square_grid_commutes_with_transpose(n in 5usize..10, seed in any::<u64>()) {
            let s = scheme(n, n);
            let u0 = pseudo_random(n * n, seed);
            let u1 = pseudo_random(n * n, seed.wrapping_add(1));
            let plain = run_direct(&s, &[u0.clone(), u1.clone()], 1).unwrap();
            let swapped = run_direct(
                &s,
                &[transpose(&u0, n, n), transpose(&u1, n, n)],
                1,
            ).unwrap();
            prop_assert_eq!(transpose(&plain, n, n), swapped);
        }
    }
}
