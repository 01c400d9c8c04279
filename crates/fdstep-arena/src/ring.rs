//! The k-slice history ring and its per-step borrow view.
//!
//! The lifecycle per step is:
//! 1. `begin_step()`: rotate the logical view, borrow previous + fresh slices
//! 2. The scheme fills the fresh slice through the [`StepFrame`]
//! 3. `publish()`: advance the counter; the fresh slice becomes the result
//!
//! If the scheme fails, `abandon()` discards the in-progress step and the
//! counter stays put, so the next `begin_step()` hands out the same slots.

use fdstep_core::{decode_samples, ConfigError, GridShape, SeedError, StateError};
use smallvec::SmallVec;

use crate::config::HistoryConfig;

/// Borrow view over the history for the duration of one step.
///
/// Holds shared borrows of the `depth - 1` previous slices (oldest first)
/// and the only mutable borrow of the fresh slice. Created by
/// [`HistoryRing::begin_step()`]; must be dropped before
/// [`HistoryRing::publish()`].
#[must_use]
pub struct StepFrame<'a> {
    previous: SmallVec<[&'a [f64]; 2]>,
    next: &'a mut [f64],
    shape: &'a GridShape,
    counter: u64,
}

impl<'a> StepFrame<'a> {
    /// Previous slices, oldest first; the last entry is the newest.
    pub fn previous(&self) -> &[&'a [f64]] {
        &self.previous
    }

    /// The slot being written this step.
    pub fn next(&mut self) -> &mut [f64] {
        self.next
    }

    /// Split into the previous slices and the fresh slot at once.
    pub fn parts(&mut self) -> (&[&'a [f64]], &mut [f64]) {
        (self.previous.as_slice(), &mut *self.next)
    }

    /// Grid shape shared by every slice.
    pub fn shape(&self) -> &'a GridShape {
        self.shape
    }

    /// Number of steps published before this one.
    pub fn counter(&self) -> u64 {
        self.counter
    }
}

/// Contiguous arena of `depth` time slices with a rotating logical view.
///
/// Allocated once at construction and never resized. The ring exclusively
/// owns its memory; previous-slice views are only ever lent out through a
/// [`StepFrame`], which the borrow checker confines to a single step.
#[derive(Debug)]
pub struct HistoryRing {
    memory: Vec<f64>,
    config: HistoryConfig,
    /// Published steps so far.
    counter: u64,
    /// Physical slice holding the most recent result.
    latest: Option<usize>,
    step_in_progress: bool,
}

impl HistoryRing {
    /// Allocate a zero-filled ring for a validated configuration.
    pub fn new(config: HistoryConfig) -> Self {
        let memory = vec![0.0; config.depth() * config.slice_len()];
        Self {
            memory,
            config,
            counter: 0,
            latest: None,
            step_in_progress: false,
        }
    }

    /// Validate `depth` and `extents`, then allocate.
    ///
    /// Nothing is allocated if validation fails.
    pub fn with_extents(depth: usize, extents: &[usize]) -> Result<Self, ConfigError> {
        Ok(Self::new(HistoryConfig::from_extents(depth, extents)?))
    }

    /// The validated configuration.
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// History depth `k`.
    pub fn depth(&self) -> usize {
        self.config.depth()
    }

    /// Grid shape of each slice.
    pub fn shape(&self) -> &GridShape {
        self.config.shape()
    }

    /// Number of published steps.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Physical slice of logical slot `logical` under the current rotation.
    fn physical(&self, logical: usize) -> usize {
        let depth = self.config.depth();
        ((self.counter % depth as u64) as usize + logical) % depth
    }

    fn slice(&self, physical: usize) -> &[f64] {
        let len = self.config.slice_len();
        &self.memory[physical * len..(physical + 1) * len]
    }

    /// Copy `data` into seedable slot `slot` (`0..depth-1`, oldest first).
    ///
    /// Slots are interpreted relative to the current rotation, so slot
    /// `depth - 2` is always the newest previous slice. On error the
    /// history is untouched.
    pub fn seed(&mut self, slot: usize, data: &[f64]) -> Result<(), SeedError> {
        let range = self.seed_range(slot, data.len())?;
        self.memory[range].copy_from_slice(data);
        Ok(())
    }

    /// Like [`seed`](Self::seed), widening single-precision input.
    pub fn seed_f32(&mut self, slot: usize, data: &[f32]) -> Result<(), SeedError> {
        let range = self.seed_range(slot, data.len())?;
        for (dst, &src) in self.memory[range].iter_mut().zip(data) {
            *dst = f64::from(src);
        }
        Ok(())
    }

    /// Seed from a little-endian byte buffer tagged with a dtype name.
    pub fn seed_bytes(&mut self, slot: usize, dtype: &str, bytes: &[u8]) -> Result<(), SeedError> {
        self.check_slot(slot)?;
        let samples = decode_samples(dtype, bytes, self.config.slice_len())?;
        self.seed(slot, &samples)
    }

    fn check_slot(&self, slot: usize) -> Result<(), SeedError> {
        let slots = self.config.depth() - 1;
        if slot >= slots {
            return Err(SeedError::SlotOutOfRange { slot, slots });
        }
        Ok(())
    }

    fn seed_range(&self, slot: usize, got: usize) -> Result<std::ops::Range<usize>, SeedError> {
        self.check_slot(slot)?;
        let len = self.config.slice_len();
        if got != len {
            return Err(SeedError::SizeMismatch { expected: len, got });
        }
        let physical = self.physical(slot);
        Ok(physical * len..(physical + 1) * len)
    }

    /// Rotate the logical view and borrow the slices for one step.
    ///
    /// The fresh slot is the physical slice that held the oldest data; its
    /// previous contents are stale and must be fully overwritten.
    pub fn begin_step(&mut self) -> StepFrame<'_> {
        self.step_in_progress = true;
        let depth = self.config.depth();
        let len = self.config.slice_len();
        let base = (self.counter % depth as u64) as usize;
        let fresh = (base + depth - 1) % depth;

        let (head, rest) = self.memory.split_at_mut(fresh * len);
        let (next, tail) = rest.split_at_mut(len);
        let (head, tail): (&[f64], &[f64]) = (head, tail);

        let previous = (0..depth - 1)
            .map(move |logical| {
                let physical = (base + logical) % depth;
                if physical < fresh {
                    &head[physical * len..(physical + 1) * len]
                } else {
                    let offset = (physical - fresh - 1) * len;
                    &tail[offset..offset + len]
                }
            })
            .collect();

        StepFrame {
            previous,
            next,
            shape: self.config.shape(),
            counter: self.counter,
        }
    }

    /// Publish the step begun by [`begin_step()`](Self::begin_step).
    ///
    /// The fresh slot becomes the current result and the counter advances.
    pub fn publish(&mut self) -> Result<(), StateError> {
        if !self.step_in_progress {
            return Err(StateError::NoStepInProgress);
        }
        self.latest = Some(self.physical(self.config.depth() - 1));
        self.counter += 1;
        self.step_in_progress = false;
        Ok(())
    }

    /// Discard an in-progress step without advancing.
    pub fn abandon(&mut self) {
        self.step_in_progress = false;
    }

    /// The most recently published slice.
    pub fn latest(&self) -> Result<&[f64], StateError> {
        self.latest
            .map(|physical| self.slice(physical))
            .ok_or(StateError::NotReady)
    }

    /// Time index of the latest result: `depth + counter - 2`.
    pub fn result_time(&self) -> Result<u64, StateError> {
        if self.latest.is_none() {
            return Err(StateError::NotReady);
        }
        Ok(self.config.depth() as u64 + self.counter - 2)
    }

    /// The seedable slices under the current rotation, oldest first.
    pub fn previous(&self) -> SmallVec<[&[f64]; 2]> {
        (0..self.config.depth() - 1)
            .map(|logical| self.slice(self.physical(logical)))
            .collect()
    }

    /// Zero every slice and rewind to the pre-step state.
    pub fn reset(&mut self) {
        self.memory.fill(0.0);
        self.counter = 0;
        self.latest = None;
        self.step_in_progress = false;
    }

    /// Bytes held by the arena.
    pub fn memory_bytes(&self) -> usize {
        self.memory.len() * std::mem::size_of::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ring(depth: usize, n: usize) -> HistoryRing {
        HistoryRing::with_extents(depth, &[n]).unwrap()
    }

    #[test]
    fn construction_rejects_bad_config() {
        assert!(matches!(
            HistoryRing::with_extents(1, &[4]),
            Err(ConfigError::HistoryDepthTooSmall { depth: 1 })
        ));
        assert!(matches!(
            HistoryRing::with_extents(2, &[]),
            Err(ConfigError::NoDimensions)
        ));
        assert!(matches!(
            HistoryRing::with_extents(2, &[0]),
            Err(ConfigError::EmptyExtent { axis: 0 })
        ));
    }

    #[test]
    fn result_not_ready_before_first_step() {
        let r = ring(3, 4);
        assert_eq!(r.latest().unwrap_err(), StateError::NotReady);
        assert_eq!(r.result_time().unwrap_err(), StateError::NotReady);
    }

    #[test]
    fn seed_validates_slot_and_size() {
        let mut r = ring(3, 4);
        assert_eq!(
            r.seed(2, &[0.0; 4]),
            Err(SeedError::SlotOutOfRange { slot: 2, slots: 2 })
        );
        assert_eq!(
            r.seed(0, &[0.0; 5]),
            Err(SeedError::SizeMismatch {
                expected: 4,
                got: 5
            })
        );
        assert!(r.previous().iter().all(|s| s.iter().all(|&v| v == 0.0)));
    }

    #[test]
    fn seeded_slots_arrive_oldest_first() {
        let mut r = ring(3, 2);
        r.seed(0, &[1.0, 1.0]).unwrap();
        r.seed(1, &[2.0, 2.0]).unwrap();
        let frame = r.begin_step();
        assert_eq!(frame.previous().len(), 2);
        assert_eq!(frame.previous()[0], &[1.0, 1.0]);
        assert_eq!(frame.previous()[1], &[2.0, 2.0]);
    }

    #[test]
    fn seed_f32_widens() {
        let mut r = ring(2, 3);
        r.seed_f32(0, &[0.5, 1.5, -2.0]).unwrap();
        assert_eq!(r.previous()[0], &[0.5, 1.5, -2.0]);
    }

    #[test]
    fn seed_bytes_checks_slot_before_decoding() {
        let mut r = ring(2, 1);
        assert_eq!(
            r.seed_bytes(1, "int8", &[0]),
            Err(SeedError::SlotOutOfRange { slot: 1, slots: 1 })
        );
        assert!(matches!(
            r.seed_bytes(0, "int8", &[0]),
            Err(SeedError::TypeMismatch { .. })
        ));
        r.seed_bytes(0, "float64", &3.0f64.to_le_bytes()).unwrap();
        assert_eq!(r.previous()[0], &[3.0]);
    }

    #[test]
    fn published_slot_becomes_newest_previous() {
        let mut r = ring(3, 2);
        r.seed(0, &[1.0, 1.0]).unwrap();
        r.seed(1, &[2.0, 2.0]).unwrap();
        {
            let mut frame = r.begin_step();
            frame.next().copy_from_slice(&[3.0, 3.0]);
        }
        r.publish().unwrap();
        assert_eq!(r.latest().unwrap(), &[3.0, 3.0]);

        let frame = r.begin_step();
        assert_eq!(frame.previous()[0], &[2.0, 2.0]);
        assert_eq!(frame.previous()[1], &[3.0, 3.0]);
    }

    #[test]
    fn rotation_recycles_oldest_without_copying() {
        let mut r = ring(3, 8);
        let oldest_ptr = r.begin_step().previous()[0].as_ptr();
        r.publish().unwrap();
        // After one step the slice that was oldest is now the fresh slot.
        let fresh_ptr = r.begin_step().next().as_ptr();
        assert_eq!(fresh_ptr, oldest_ptr);
    }

    #[test]
    fn publish_without_begin_is_an_error() {
        let mut r = ring(2, 3);
        assert_eq!(r.publish(), Err(StateError::NoStepInProgress));
        let _ = r.begin_step();
        r.publish().unwrap();
        assert_eq!(r.publish(), Err(StateError::NoStepInProgress));
    }

    #[test]
    fn abandon_keeps_counter() {
        let mut r = ring(2, 3);
        let _ = r.begin_step();
        r.abandon();
        assert_eq!(r.counter(), 0);
        assert_eq!(r.publish(), Err(StateError::NoStepInProgress));
        assert!(r.latest().is_err());
    }

    #[test]
    fn reset_rewinds() {
        let mut r = ring(2, 3);
        r.seed(0, &[1.0, 2.0, 3.0]).unwrap();
        let _ = r.begin_step();
        r.publish().unwrap();
        r.reset();
        assert_eq!(r.counter(), 0);
        assert!(r.latest().is_err());
        assert!(r.previous()[0].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn memory_is_depth_times_grid() {
        let r = HistoryRing::with_extents(3, &[5, 6]).unwrap();
        assert_eq!(r.memory_bytes(), 3 * 30 * 8);
    }

    proptest! {
        #[test]
        fn result_time_is_depth_plus_steps_minus_two(depth in 2usize..6, steps in 1u64..40) {
            let mut r = ring(depth, 3);
            for _ in 0..steps {
                let _ = r.begin_step();
                r.publish().unwrap();
            }
            prop_assert_eq!(r.result_time().unwrap(), depth as u64 + steps - 2);
            prop_assert_eq!(r.counter(), steps);
        }

        #[test]
        fn frame_slices_are_distinct(depth in 2usize..6, steps in 0u64..12) {
            let mut r = ring(depth, 4);
            for _ in 0..steps {
                let _ = r.begin_step();
                r.publish().unwrap();
            }
            let mut frame = r.begin_step();
            let mut ptrs: Vec<*const f64> =
                frame.previous().iter().map(|s| s.as_ptr()).collect();
            ptrs.push(frame.next().as_ptr());
            ptrs.sort();
            ptrs.dedup();
            prop_assert_eq!(ptrs.len(), depth);
        }
    }
}
