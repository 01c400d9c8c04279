//! Physical parameters shared by every scheme.

use crate::error::ConfigError;

/// Propagation speed, time step and spatial step of a scheme.
///
/// Immutable after construction. The Courant number these imply governs
/// stability of every explicit scheme in this workspace but is never
/// enforced: keeping `|speed| * dt / dx <= 1` is the caller's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchemeParams {
    speed: f64,
    dt: f64,
    dx: f64,
}

impl SchemeParams {
    /// Validate and build.
    ///
    /// `dt` and `dx` must be finite and strictly positive; `speed` must be
    /// finite (its sign sets the advection direction).
    pub fn new(speed: f64, dt: f64, dx: f64) -> Result<Self, ConfigError> {
        if !speed.is_finite() {
            return Err(ConfigError::NonFiniteSpeed { value: speed });
        }
        positive_step("dt", dt)?;
        positive_step("dx", dx)?;
        Ok(Self { speed, dt, dx })
    }

    /// Wave or advection speed.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Spatial step along the fast axis.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Courant number `speed * dt / dx`.
    pub fn courant(&self) -> f64 {
        self.speed * self.dt / self.dx
    }
}

/// Reject a step that is not finite and strictly positive.
pub fn positive_step(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositiveStep { name, value })
    }
}
