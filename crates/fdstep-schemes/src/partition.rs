//! Disjoint-write partition of a line's interior across worker threads.
//!
//! The interior `[1, n-1)` is cut into contiguous chunks of `⌈n/t⌉`
//! indices; worker `i` owns `[max(i·chunk, 1), min((i+1)·chunk, n-1))`.
//! Chunks are computed once at scheme construction. Workers whose range
//! clamps to nothing are dropped, so every listed range is non-empty and
//! the ranges tile the interior in order.

use std::any::Any;
use std::ops::Range;
use std::thread::ScopedJoinHandle;

use fdstep_core::StepError;
use smallvec::SmallVec;

/// The per-worker index ranges for one grid length and thread count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    chunk: usize,
    ranges: SmallVec<[(usize, Range<usize>); 8]>,
}

impl Partition {
    /// Partition the interior of an `n`-point line across `threads` workers.
    ///
    /// `threads` must be at least 1; the caller validates that. Work is
    /// proportional to `min(n, threads)`, so any thread count is cheap.
    pub fn new(n: usize, threads: usize) -> Self {
        let threads = threads.max(1);
        let chunk = n.div_ceil(threads);
        let upper = n.saturating_sub(1);
        // Workers at or past index n start beyond the interior.
        let ranges = (0..threads.min(n))
            .filter_map(|i| {
                let lo = (i * chunk).max(1);
                let hi = ((i + 1) * chunk).min(upper);
                (lo < hi).then_some((i, lo..hi))
            })
            .collect();
        Self { chunk, ranges }
    }

    /// Indices per chunk before clamping.
    pub fn chunk(&self) -> usize {
        self.chunk
    }

    /// `(worker index, owned range)` pairs, in index order.
    pub fn ranges(&self) -> &[(usize, Range<usize>)] {
        &self.ranges
    }

    /// Number of workers that receive a non-empty range.
    pub fn workers(&self) -> usize {
        self.ranges.len()
    }

    /// Total interior cells covered.
    pub fn covered(&self) -> usize {
        self.ranges.iter().map(|(_, r)| r.len()).sum()
    }
}

/// Join every worker, summing the cells each reports writing.
///
/// All handles are joined even after a failure; the first panic, in
/// worker order, is reported.
pub fn join_workers(
    handles: Vec<(usize, ScopedJoinHandle<'_, usize>)>,
) -> Result<usize, StepError> {
    let mut written = 0;
    let mut first_error = None;
    for (worker, handle) in handles {
        match handle.join() {
            Ok(cells) => written += cells,
            Err(payload) => {
                if first_error.is_none() {
                    first_error = Some(StepError::WorkerPanicked {
                        worker,
                        message: panic_message(&*payload),
                    });
                }
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(written),
    }
}

/// Join the workers that did start, then report `spawn_failure` if a
/// later spawn was refused.
///
/// Every started handle is joined before returning, so a panic in one of
/// them is captured here instead of being re-raised by the enclosing
/// scope.
pub fn settle_workers(
    handles: Vec<(usize, ScopedJoinHandle<'_, usize>)>,
    spawn_failure: Option<StepError>,
) -> Result<usize, StepError> {
    let joined = join_workers(handles);
    match spawn_failure {
        Some(e) => Err(e),
        None => joined,
    }
}

/// Text of a panic payload, when it carries one.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
