//! Lockstep stepping engine.
//!
//! [`Engine`] is the primary user-facing API. Each call to
//! [`step()`](Engine::step) rotates the history ring, runs the scheme over
//! the rotated view and publishes the fresh slice.
//!
//! # Ownership model
//!
//! The engine exclusively owns its history and its scheme. All mutating
//! methods take `&mut self`, and [`current_result()`](Engine::current_result)
//! borrows from `self`, so the borrow checker rules out stepping while a
//! result slice is held. Independent engines share nothing and may run on
//! different threads.

use std::time::Instant;

use fdstep_arena::{HistoryConfig, HistoryRing};
use fdstep_core::{ConfigError, GridShape, SeedError, StateError, StepError};
use fdstep_scheme::{Propagate, StepContext};
use fdstep_schemes::Scheme;

use crate::config::SchemeSpec;
use crate::metrics::StepMetrics;

// ── ResultView ──────────────────────────────────────────────────

/// Borrowed view of the current result for an external array layer.
///
/// `data` is flattened row by row (last extent fastest). Any display
/// reordering is up to the consumer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResultView<'e> {
    /// Flat grid values.
    pub data: &'e [f64],
    /// Per-axis extents, slowest first.
    pub extents: &'e [usize],
    /// Time index of this result.
    pub time: u64,
}

// ── Engine ──────────────────────────────────────────────────────

/// Explicit time-stepping driver for one scheme.
///
/// The type parameter defaults to the closed [`Scheme`] set; any
/// [`Propagate`] implementation can be driven directly.
///
/// # Example
///
/// ```
/// use fdstep_engine::Engine;
/// use fdstep_schemes::LaxAdvection1D;
///
/// let scheme = LaxAdvection1D::builder()
///     .points(5)
///     .speed(1.0)
///     .dt(0.1)
///     .dx(1.0)
///     .build()
///     .unwrap();
/// let mut engine = Engine::new(scheme).unwrap();
/// engine.seed(0, &[0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
/// engine.step().unwrap();
/// assert_eq!(engine.current_time().unwrap(), 1);
/// ```
pub struct Engine<P: Propagate = Scheme> {
    scheme: P,
    ring: HistoryRing,
    last_metrics: StepMetrics,
}

impl Engine<Scheme> {
    /// Build the scheme described by `spec` and wrap it in an engine.
    pub fn from_spec(spec: &SchemeSpec) -> Result<Self, ConfigError> {
        Self::new(spec.build()?)
    }
}

impl<P: Propagate> Engine<P> {
    /// Allocate a zeroed history sized for `scheme`.
    ///
    /// The history depth and grid come from the scheme, which has already
    /// validated them; the depth is checked again here for foreign
    /// [`Propagate`] implementations.
    pub fn new(scheme: P) -> Result<Self, ConfigError> {
        let config = HistoryConfig::new(scheme.history_depth(), scheme.shape().clone())?;
        log::debug!(
            "engine: scheme={} depth={} extents={:?} courant={:.4} workers={}",
            scheme.name(),
            config.depth(),
            config.shape().extents(),
            scheme.courant(),
            scheme.workers()
        );
        Ok(Self {
            ring: HistoryRing::new(config),
            scheme,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Copy `data` into history slot `slot` (`0..k-1`, oldest first).
    ///
    /// Seeding between steps is allowed: the slot is relative to the
    /// current rotation, so slot `k-2` is always the newest slice.
    pub fn seed(&mut self, slot: usize, data: &[f64]) -> Result<(), SeedError> {
        self.ring.seed(slot, data)
    }

    /// Seed from single-precision data, widening each value.
    pub fn seed_f32(&mut self, slot: usize, data: &[f32]) -> Result<(), SeedError> {
        self.ring.seed_f32(slot, data)
    }

    /// Seed from a little-endian byte buffer of `dtype` samples
    /// (`"float32"` or `"float64"`).
    pub fn seed_bytes(&mut self, slot: usize, dtype: &str, bytes: &[u8]) -> Result<(), SeedError> {
        self.ring.seed_bytes(slot, dtype, bytes)
    }

    /// Advance by one time step.
    ///
    /// # Errors
    ///
    /// Returns the scheme's [`StepError`]. A failed step is discarded: the
    /// time counter and the current result are unchanged.
    pub fn step(&mut self) -> Result<(), StepError> {
        let started = Instant::now();

        let mut frame = self.ring.begin_step();
        let counter = frame.counter();
        let shape = frame.shape();
        let (previous, next) = frame.parts();
        let mut ctx = StepContext::new(previous, next, shape, counter);

        let propagate_started = Instant::now();
        let outcome = self.scheme.propagate(&mut ctx);
        let propagate_us = propagate_started.elapsed().as_micros() as u64;
        drop(frame);

        if let Err(e) = outcome {
            self.ring.abandon();
            log::debug!("{}: step {} failed: {e}", self.scheme.name(), counter + 1);
            return Err(e);
        }
        self.ring.publish()?;
        let time = self.ring.result_time()?;

        self.last_metrics = StepMetrics {
            total_us: started.elapsed().as_micros() as u64,
            propagate_us,
            workers: self.scheme.workers(),
            memory_bytes: self.ring.memory_bytes(),
        };
        log::trace!(
            "{}: t={time} in {}us",
            self.scheme.name(),
            self.last_metrics.total_us
        );
        Ok(())
    }

    /// Step `n` times, stopping at the first failure.
    pub fn run(&mut self, n: u64) -> Result<(), StepError> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// The most recently computed slice.
    pub fn current_result(&self) -> Result<&[f64], StateError> {
        self.ring.latest()
    }

    /// Time index of the current result: `k + steps - 2`.
    pub fn current_time(&self) -> Result<u64, StateError> {
        self.ring.result_time()
    }

    /// Current result together with its extents and time.
    pub fn snapshot(&self) -> Result<ResultView<'_>, StateError> {
        Ok(ResultView {
            data: self.ring.latest()?,
            extents: self.ring.shape().extents(),
            time: self.ring.result_time()?,
        })
    }

    /// Successful steps since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.ring.counter()
    }

    /// Zero the history and rewind to the unseeded state.
    pub fn reset(&mut self) {
        self.ring.reset();
        self.last_metrics = StepMetrics::default();
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Courant number of the scheme. Never enforced.
    pub fn courant(&self) -> f64 {
        self.scheme.courant()
    }

    /// History depth `k`.
    pub fn history_depth(&self) -> usize {
        self.ring.depth()
    }

    /// Grid shape.
    pub fn shape(&self) -> &GridShape {
        self.ring.shape()
    }

    /// The scheme being driven.
    pub fn scheme(&self) -> &P {
        &self.scheme
    }
}

impl<P: Propagate> std::fmt::Debug for Engine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("scheme", &self.scheme.name())
            .field("depth", &self.ring.depth())
            .field("extents", &self.ring.shape().extents())
            .field("steps", &self.ring.counter())
            .finish()
    }
}
