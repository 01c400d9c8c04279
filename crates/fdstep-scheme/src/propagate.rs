//! The [`Propagate`] trait.
//!
//! A scheme is a stateless operator: its parameters are fixed at
//! construction and every step reads the frozen history and writes only
//! the fresh slot.

use crate::context::StepContext;
use fdstep_core::{GridShape, StepError};

/// An explicit finite-difference update rule.
///
/// # Contract
///
/// - `propagate()` MUST be deterministic: same inputs produce identical
///   outputs.
/// - `propagate()` MUST write every cell of the fresh slot.
/// - `history_depth()` and `shape()` are fixed at construction; the engine
///   sizes its history from them once.
///
/// # Examples
///
/// A two-level scheme that holds the field still:
///
/// ```
/// use fdstep_core::{GridShape, StepError};
/// use fdstep_scheme::{Propagate, StepContext};
///
/// struct Hold {
///     shape: GridShape,
/// }
///
/// impl Propagate for Hold {
///     fn name(&self) -> &str { "hold" }
///     fn history_depth(&self) -> usize { 2 }
///     fn shape(&self) -> &GridShape { &self.shape }
///     fn courant(&self) -> f64 { 0.0 }
///
///     fn propagate(&self, ctx: &mut StepContext<'_>) -> Result<(), StepError> {
///         let (prev, next) = ctx.two_level(&self.shape)?;
///         next.copy_from_slice(prev);
///         Ok(())
///     }
/// }
///
/// let hold = Hold { shape: GridShape::line(4).unwrap() };
/// assert_eq!(hold.history_depth(), 2);
/// ```
pub trait Propagate: Send + Sync {
    /// Human-readable name for logs and error reporting.
    fn name(&self) -> &str;

    /// Number of time slices the scheme needs: 2 for two-level schemes,
    /// 3 for three-level ones.
    fn history_depth(&self) -> usize;

    /// Grid shape the scheme was built for.
    fn shape(&self) -> &GridShape;

    /// Courant number of the configured parameters. Advisory only.
    fn courant(&self) -> f64;

    /// Worker threads used per step. Default: 1.
    fn workers(&self) -> usize {
        1
    }

    /// Fill `ctx.next()` from the previous slices.
    fn propagate(&self, ctx: &mut StepContext<'_>) -> Result<(), StepError>;
}
