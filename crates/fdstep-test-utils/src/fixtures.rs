//! Reusable scheme fixtures.
//!
//! - [`HoldScheme`]: copies the newest previous slice forward.
//! - [`FailingScheme`]: fails deterministically after N calls.

use fdstep_core::{GridShape, StepError};
use fdstep_scheme::{Propagate, StepContext};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Copies the newest previous slice into the fresh slot.
///
/// Useful for testing history rotation: the result must always equal the
/// last thing seeded or produced.
pub struct HoldScheme {
    shape: GridShape,
    depth: usize,
}

impl HoldScheme {
    pub fn new(depth: usize, n: usize) -> Self {
        let shape = match GridShape::line(n) {
            Ok(shape) => shape,
            Err(e) => panic!("bad fixture grid: {e}"),
        };
        Self { shape, depth }
    }
}

impl Propagate for HoldScheme {
    fn name(&self) -> &str {
        "hold"
    }

    fn history_depth(&self) -> usize {
        self.depth
    }

    fn shape(&self) -> &GridShape {
        &self.shape
    }

    fn courant(&self) -> f64 {
        0.0
    }

    fn propagate(&self, ctx: &mut StepContext<'_>) -> Result<(), StepError> {
        let newest = ctx.newest().ok_or(StepError::HistoryMismatch {
            expected: self.depth - 1,
            got: 0,
        })?;
        ctx.next().copy_from_slice(newest);
        Ok(())
    }
}

/// Succeeds (holding the field) for `succeed_count` calls, then fails.
pub struct FailingScheme {
    inner: HoldScheme,
    call_count: AtomicUsize,
    succeed_count: usize,
}

impl FailingScheme {
    pub fn new(depth: usize, n: usize, succeed_count: usize) -> Self {
        Self {
            inner: HoldScheme::new(depth, n),
            call_count: AtomicUsize::new(0),
            succeed_count,
        }
    }

    /// Calls seen so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Propagate for FailingScheme {
    fn name(&self) -> &str {
        "failing"
    }

    fn history_depth(&self) -> usize {
        self.inner.depth
    }

    fn shape(&self) -> &GridShape {
        &self.inner.shape
    }

    fn courant(&self) -> f64 {
        0.0
    }

    fn propagate(&self, ctx: &mut StepContext<'_>) -> Result<(), StepError> {
        let count = self.call_count.fetch_add(1, Ordering::Relaxed);
        if count >= self.succeed_count {
            // Scribble over the fresh slot to prove a failed step is not published.
            ctx.next().fill(f64::NAN);
            return Err(StepError::WorkerPanicked {
                worker: 0,
                message: format!("failing after {} calls", self.succeed_count),
            });
        }
        self.inner.propagate(ctx)
    }
}
