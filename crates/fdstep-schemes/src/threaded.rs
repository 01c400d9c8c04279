//! Fork-join leapfrog on a line with fixed ends.
//!
//! Each step the calling thread sets the two end cells, then spawns one
//! scoped worker per [`Partition`] range. Workers read the frozen
//! `last`/`b4last` slices and write only their own sub-slice of `next`,
//! handed out with `split_at_mut`, so no locking is needed. The step
//! returns only after every worker has been joined.

use std::thread;

use crate::partition::{settle_workers, Partition};
use crate::stencil::{leapfrog_cell, line_setup, warn_if_unstable};
use fdstep_core::{ConfigError, GridShape, SchemeParams, StepError};
use fdstep_scheme::{Propagate, StepContext};

/// Default worker count: half the available parallelism plus one.
pub fn default_threads() -> usize {
    let available = thread::available_parallelism().map_or(1, |n| n.get());
    (available / 2 + 1).max(1)
}

/// Multithreaded [`Leapfrog1D`](crate::Leapfrog1D) with a fixed boundary.
///
/// Produces output bit-identical to the sequential scheme for any worker
/// count: both evaluate the same cell function in the same order per cell.
#[derive(Clone, Debug)]
pub struct ThreadedLeapfrog {
    shape: GridShape,
    params: SchemeParams,
    rho2: f64,
    threads: usize,
    partition: Partition,
}

/// Builder for [`ThreadedLeapfrog`].
///
/// Required fields: `points`, `dt` and `dx`. Speed defaults to 1, the
/// thread count to [`default_threads()`].
pub struct ThreadedLeapfrogBuilder {
    points: Option<usize>,
    speed: f64,
    dt: Option<f64>,
    dx: Option<f64>,
    threads: Option<usize>,
}

impl ThreadedLeapfrog {
    /// Create a new builder.
    pub fn builder() -> ThreadedLeapfrogBuilder {
        ThreadedLeapfrogBuilder {
            points: None,
            speed: 1.0,
            dt: None,
            dx: None,
            threads: None,
        }
    }

    /// Configured thread count.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// The precomputed interior partition.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Physical parameters.
    pub fn params(&self) -> &SchemeParams {
        &self.params
    }
}

impl ThreadedLeapfrogBuilder {
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

    /// Worker threads per step. Must be at least 1.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Build the scheme and precompute its partition.
    pub fn build(self) -> Result<ThreadedLeapfrog, ConfigError> {
        let threads = match self.threads {
            Some(0) => return Err(ConfigError::ZeroThreads),
            Some(t) => t,
            None => default_threads(),
        };
        let (shape, params) = line_setup(self.points, self.speed, self.dt, self.dx)?;
        let rho = params.courant();
        warn_if_unstable("ThreadedLeapfrog", rho);
        let partition = Partition::new(shape.len(), threads);
        Ok(ThreadedLeapfrog {
            shape,
            params,
            rho2: rho * rho,
            threads,
            partition,
        })
    }
}

impl Propagate for ThreadedLeapfrog {
    fn name(&self) -> &str {
        "ThreadedLeapfrog"
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

    fn workers(&self) -> usize {
        self.partition.workers()
    }

    fn propagate(&self, ctx: &mut StepContext<'_>) -> Result<(), StepError> {
        let (b4last, last, next) = ctx.three_level(&self.shape)?;
        let n = next.len();
        let rho2 = self.rho2;

        next[0] = last[0];
        next[n - 1] = last[n - 1];

        log::trace!(
            "ThreadedLeapfrog: fork {} workers, chunk {}",
            self.partition.workers(),
            self.partition.chunk()
        );

        let mut chunks = Vec::with_capacity(self.partition.workers());
        let mut rest = &mut next[1..n - 1];
        for (worker, range) in self.partition.ranges() {
            let (own, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            chunks.push((*worker, range.start, own));
        }
        debug_assert!(rest.is_empty());

        let written = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(chunks.len());
            let mut spawn_failure = None;
            for (worker, start, own) in chunks {
                let spawned = thread::Builder::new()
                    .name(format!("fdstep-leapfrog-{worker}"))
                    .spawn_scoped(scope, move || {
                        for (k, cell) in own.iter_mut().enumerate() {
                            let j = start + k;
                            *cell = leapfrog_cell(rho2, b4last, last, j - 1, j, j + 1);
                        }
                        own.len()
                    });
                match spawned {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(e) => {
                        spawn_failure = Some(StepError::WorkerSpawnFailed {
                            worker,
                            reason: e.to_string(),
                        });
                        break;
                    }
                }
            }
            settle_workers(handles, spawn_failure)
        })?;

        debug_assert_eq!(written, n - 2);
        Ok(())
    }
}
