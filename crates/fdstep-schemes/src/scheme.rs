//! The closed set of update schemes.

use crate::{LaxAdvection1D, Leapfrog1D, ThreadedLeapfrog, Wave2D};
use fdstep_core::{GridShape, StepError};
use fdstep_scheme::{Propagate, StepContext};

/// Any of the built-in schemes, dispatched by exhaustive `match`.
///
/// Adding a variant is a compile error at every dispatch site until it is
/// handled.
#[derive(Clone, Debug)]
pub enum Scheme {
    /// Two-level 1-D advection.
    Advection(LaxAdvection1D),
    /// Three-level 1-D leapfrog.
    Leapfrog(Leapfrog1D),
    /// Three-level 2-D leapfrog.
    Wave2D(Wave2D),
    /// Fork-join 1-D leapfrog.
    ThreadedLeapfrog(ThreadedLeapfrog),
}

impl Scheme {
    fn inner(&self) -> &dyn Propagate {
        match self {
            Self::Advection(s) => s,
            Self::Leapfrog(s) => s,
            Self::Wave2D(s) => s,
            Self::ThreadedLeapfrog(s) => s,
        }
    }
}

impl Propagate for Scheme {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn history_depth(&self) -> usize {
        self.inner().history_depth()
    }

    fn shape(&self) -> &GridShape {
        self.inner().shape()
    }

    fn courant(&self) -> f64 {
        self.inner().courant()
    }

    fn workers(&self) -> usize {
        self.inner().workers()
    }

    fn propagate(&self, ctx: &mut StepContext<'_>) -> Result<(), StepError> {
        match self {
            Self::Advection(s) => s.propagate(ctx),
            Self::Leapfrog(s) => s.propagate(ctx),
            Self::Wave2D(s) => s.propagate(ctx),
            Self::ThreadedLeapfrog(s) => s.propagate(ctx),
        }
    }
}

impl From<LaxAdvection1D> for Scheme {
    fn from(s: LaxAdvection1D) -> Self {
        Self::Advection(s)
    }
}

impl From<Leapfrog1D> for Scheme {
    fn from(s: Leapfrog1D) -> Self {
        Self::Leapfrog(s)
    }
}

impl From<Wave2D> for Scheme {
    fn from(s: Wave2D) -> Self {
        Self::Wave2D(s)
    }
}

impl From<ThreadedLeapfrog> for Scheme {
    fn from(s: ThreadedLeapfrog) -> Self {
        Self::ThreadedLeapfrog(s)
    }
}
