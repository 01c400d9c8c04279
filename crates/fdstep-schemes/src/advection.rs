//! Two-level Lax advection on a line.
//!
//! ```text
//! rho = c * dt / (2 * dx)
//! next[j] = (prev[j+1] + prev[j-1]) / 2 - rho * (prev[j+1] - prev[j-1])
//! ```
//!
//! Constructed via the builder pattern: [`LaxAdvection1D::builder`].

use crate::stencil::{line_setup, sweep_1d, warn_if_unstable};
use fdstep_core::{Boundary, ConfigError, GridShape, SchemeParams, StepError};
use fdstep_scheme::{Propagate, StepContext};

/// Centered-average advection of a 1-D profile at speed `c`.
///
/// The sign of `c` sets the direction of travel. Periodic boundaries
/// conserve the sum of the grid for any Courant number.
///
/// ```
/// use fdstep_schemes::LaxAdvection1D;
///
/// let scheme = LaxAdvection1D::builder()
///     .points(5)
///     .speed(1.0)
///     .dt(0.1)
///     .dx(1.0)
///     .build()
///     .unwrap();
/// assert!((scheme.rho() - 0.05).abs() < 1e-15);
/// ```
#[derive(Clone, Debug)]
pub struct LaxAdvection1D {
    shape: GridShape,
    params: SchemeParams,
    boundary: Boundary,
    rho: f64,
}

/// Builder for [`LaxAdvection1D`].
///
/// Required fields: `points`, `dt` and `dx`. Speed defaults to 1, the
/// boundary to [`Boundary::Fixed`].
pub struct LaxAdvection1DBuilder {
    points: Option<usize>,
    speed: f64,
    dt: Option<f64>,
    dx: Option<f64>,
    boundary: Boundary,
}

impl LaxAdvection1D {
    /// Create a new builder.
    pub fn builder() -> LaxAdvection1DBuilder {
        LaxAdvection1DBuilder {
            points: None,
            speed: 1.0,
            dt: None,
            dx: None,
            boundary: Boundary::Fixed,
        }
    }

    /// The stencil coefficient `c * dt / (2 * dx)`.
    pub fn rho(&self) -> f64 {
        self.rho
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

impl LaxAdvection1DBuilder {
    /// Number of grid points (at least 3).
    pub fn points(mut self, n: usize) -> Self {
        self.points = Some(n);
        self
    }

    /// Advection speed (default 1.0).
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
    ///
    /// # Errors
    ///
    /// Returns `Err` if `points`, `dt` or `dx` is missing, the grid has
    /// fewer than 3 points, `dt`/`dx` is not finite and positive, or the
    /// speed is not finite.
    pub fn build(self) -> Result<LaxAdvection1D, ConfigError> {
        let (shape, params) = line_setup(self.points, self.speed, self.dt, self.dx)?;
        let rho = params.speed() * params.dt() / 2.0 / params.dx();
        warn_if_unstable("LaxAdvection1D", params.courant());
        Ok(LaxAdvection1D {
            shape,
            params,
            boundary: self.boundary,
            rho,
        })
    }
}

impl Propagate for LaxAdvection1D {
    fn name(&self) -> &str {
        "LaxAdvection1D"
    }

    fn history_depth(&self) -> usize {
        2
    }

    fn shape(&self) -> &GridShape {
        &self.shape
    }

    fn courant(&self) -> f64 {
        self.params.courant()
    }

    fn propagate(&self, ctx: &mut StepContext<'_>) -> Result<(), StepError> {
        let (prev, next) = ctx.two_level(&self.shape)?;
        let rho = self.rho;
        sweep_1d(next, prev, self.boundary, |jm1, _, jp1| {
            (prev[jp1] + prev[jm1]) / 2.0 - rho * (prev[jp1] - prev[jm1])
        });
        Ok(())
    }
}
