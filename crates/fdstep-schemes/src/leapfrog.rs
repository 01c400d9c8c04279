//! Three-level leapfrog for the 1-D wave equation.
//!
//! ```text
//! rho = c * dt / dx
//! next[j] = rho² * (last[j+1] - 2 last[j] + last[j-1]) + 2 last[j] - b4last[j]
//! ```
//!
//! `last` is the newest previous slice and `b4last` the one before it.
//! Constructed via the builder pattern: [`Leapfrog1D::builder`].

use crate::stencil::{leapfrog_cell, line_setup, sweep_1d, warn_if_unstable};
use fdstep_core::{Boundary, ConfigError, GridShape, SchemeParams, StepError};
use fdstep_scheme::{Propagate, StepContext};

/// Centered second-difference wave propagation on a line.
///
/// Needs two seeded slices. A string released from rest can be started
/// by seeding the same profile twice, or by seeding
/// [`euler_start`](crate::profiles::euler_start) output as the second
/// slice.
#[derive(Clone, Debug)]
pub struct Leapfrog1D {
    shape: GridShape,
    params: SchemeParams,
    boundary: Boundary,
    rho2: f64,
}

/// Builder for [`Leapfrog1D`].
///
/// Required fields: `points`, `dt` and `dx`. Speed defaults to 1, the
/// boundary to [`Boundary::Fixed`].
pub struct Leapfrog1DBuilder {
    points: Option<usize>,
    speed: f64,
    dt: Option<f64>,
    dx: Option<f64>,
    boundary: Boundary,
}

impl Leapfrog1D {
    /// Create a new builder.
    pub fn builder() -> Leapfrog1DBuilder {
        Leapfrog1DBuilder {
            points: None,
            speed: 1.0,
            dt: None,
            dx: None,
            boundary: Boundary::Fixed,
        }
    }

    /// Squared Courant number, the stencil coefficient.
    pub fn rho2(&self) -> f64 {
        self.rho2
    }

    /// Boundary policy.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Physical parameters.
    pub fn params(&self) -> &SchemeParams {
        &self.params
    }
}

impl Leapfrog1DBuilder {
    /// Number of grid points (at least 3).
    pub fn points(mut self, n: usize) -> Self {
        self.points = Some(n);
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

    /// Grid spacing.
    pub fn dx(mut self, dx: f64) -> Self {
        self.dx = Some(dx);
        self
    }

    /// Boundary policy (default fixed).
    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Build the scheme, validating all configuration.
    pub fn build(self) -> Result<Leapfrog1D, ConfigError> {
        let (shape, params) = line_setup(self.points, self.speed, self.dt, self.dx)?;
        let rho = params.courant();
        warn_if_unstable("Leapfrog1D", rho);
        Ok(Leapfrog1D {
            shape,
            params,
            boundary: self.boundary,
            rho2: rho * rho,
        })
    }
}

impl Propagate for Leapfrog1D {
    fn name(&self) -> &str {
        "Leapfrog1D"
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
        let (b4last, last, next) = ctx.three_level(&self.shape)?;
        let rho2 = self.rho2;
        sweep_1d(next, last, self.boundary, |jm1, j, jp1| {
            leapfrog_cell(rho2, b4last, last, jm1, j, jp1)
        });
        Ok(())
    }
}
