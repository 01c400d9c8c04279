//! Per-step performance metrics for the engine.
//!
//! [`StepMetrics`] captures timing and memory data for a single step.

/// Timing and memory metrics collected during a single step.
///
/// All durations are in microseconds. The engine populates these fields
/// after each successful `step()` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent inside the scheme's update, in microseconds.
    pub propagate_us: u64,
    /// Worker threads the scheme used.
    pub workers: usize,
    /// Memory held by the history ring, in bytes.
    pub memory_bytes: usize,
}
