//! Execution context passed to schemes during a step.
//!
//! [`StepContext`] lends the previous time slices read-only and the fresh
//! slot mutably, plus the grid shape and the step counter.

use fdstep_core::{GridShape, StepError};

/// Execution context passed to each scheme's `propagate()` method.
///
/// # Split-borrow semantics
///
/// - **`previous()`** returns the `k-1` previous slices, oldest first.
///   They are frozen for the whole step.
/// - **`next()`** returns the fresh slot. Its prior contents are stale;
///   the scheme must overwrite every cell.
///
/// The level accessors ([`two_level`](Self::two_level),
/// [`three_level`](Self::three_level)) take the shape the scheme was built
/// for and check the context's shape, slice count and slice lengths
/// against it before handing out the slices, so a scheme never indexes
/// out of bounds on a mismatched context.
pub struct StepContext<'a> {
    previous: &'a [&'a [f64]],
    next: &'a mut [f64],
    shape: &'a GridShape,
    step: u64,
}

impl<'a> StepContext<'a> {
    /// Construct a new step context.
    ///
    /// Typically called by the engine. For testing, build one over plain
    /// vectors.
    pub fn new(
        previous: &'a [&'a [f64]],
        next: &'a mut [f64],
        shape: &'a GridShape,
        step: u64,
    ) -> Self {
        Self {
            previous,
            next,
            shape,
            step,
        }
    }

    /// Previous slices, oldest first.
    pub fn previous(&self) -> &'a [&'a [f64]] {
        self.previous
    }

    /// The newest previous slice, if any.
    pub fn newest(&self) -> Option<&'a [f64]> {
        self.previous.last().copied()
    }

    /// The slot being written.
    pub fn next(&mut self) -> &mut [f64] {
        self.next
    }

    /// Grid shape shared by all slices.
    pub fn shape(&self) -> &'a GridShape {
        self.shape
    }

    /// Number of steps completed before this one.
    pub fn step(&self) -> u64 {
        self.step
    }

    fn check(&self, levels: usize, shape: &GridShape) -> Result<(), StepError> {
        if self.shape != shape {
            return Err(StepError::ShapeMismatch {
                expected: shape.extents().to_vec(),
                got: self.shape.extents().to_vec(),
            });
        }
        let expected = levels - 1;
        if self.previous.len() != expected {
            return Err(StepError::HistoryMismatch {
                expected,
                got: self.previous.len(),
            });
        }
        let len = self.shape.len();
        let lengths = self.previous.iter().map(|s| s.len());
        for got in lengths.chain(std::iter::once(self.next.len())) {
            if got != len {
                return Err(StepError::SliceLengthMismatch { expected: len, got });
            }
        }
        Ok(())
    }

    /// `(prev, next)` for a two-level scheme built for `shape`.
    pub fn two_level(&mut self, shape: &GridShape) -> Result<(&'a [f64], &mut [f64]), StepError> {
        self.check(2, shape)?;
        Ok((self.previous[0], &mut *self.next))
    }

    /// `(oldest, newest, next)` for a three-level scheme built for `shape`.
    pub fn three_level(
        &mut self,
        shape: &GridShape,
    ) -> Result<(&'a [f64], &'a [f64], &mut [f64]), StepError> {
        self.check(3, shape)?;
        Ok((self.previous[0], self.previous[1], &mut *self.next))
    }
}
