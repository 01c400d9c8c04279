//! Error types for the fdstep engine.
//!
//! Organized by subsystem: construction (config), seeding, query state,
//! and step execution. Construction errors are fatal for the object being
//! built; the rest are recoverable and leave engine state unchanged.

use std::error::Error;
use std::fmt;

/// Errors detected while constructing a history arena, scheme, or engine.
///
/// Every check runs before any grid buffer is allocated.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// History depth below the two-slice minimum.
    HistoryDepthTooSmall {
        /// The configured depth.
        depth: usize,
    },
    /// Grid shape with no dimensions.
    NoDimensions,
    /// Grid shape with more dimensions than supported.
    TooManyDimensions {
        /// The configured dimensionality.
        dim: usize,
        /// The supported maximum.
        max: usize,
    },
    /// An axis with zero points (the grid would be empty).
    EmptyExtent {
        /// Index of the offending axis.
        axis: usize,
    },
    /// The product of the extents overflows `usize`.
    CellCountOverflow {
        /// The axis at which the running product overflowed.
        axis: usize,
    },
    /// An axis below the scheme's stencil minimum.
    ExtentTooSmall {
        /// Index of the offending axis.
        axis: usize,
        /// The configured number of points.
        extent: usize,
        /// The minimum the scheme requires.
        min: usize,
    },
    /// A scheme was given a grid of the wrong dimensionality.
    RankMismatch {
        /// Dimensionality the scheme works in.
        expected: usize,
        /// Dimensionality that was supplied.
        got: usize,
    },
    /// A time or space step that is zero, negative, or not finite.
    NonPositiveStep {
        /// Parameter name (`dt`, `dx`, `dy`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A propagation speed that is NaN or infinite.
    NonFiniteSpeed {
        /// The rejected value.
        value: f64,
    },
    /// A boundary selector outside the known policy set.
    UnknownBoundary {
        /// The rejected selector, as supplied.
        selector: String,
    },
    /// A scheme name outside the built-in set.
    UnknownScheme {
        /// The rejected name, as supplied.
        name: String,
    },
    /// A threaded scheme configured with zero workers.
    ZeroThreads,
    /// A builder was finished without a required parameter.
    MissingParameter {
        /// Name of the missing parameter.
        name: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HistoryDepthTooSmall { depth } => {
                write!(f, "history depth {depth} is below minimum of 2")
            }
            Self::NoDimensions => write!(f, "grid must have at least one dimension"),
            Self::TooManyDimensions { dim, max } => {
                write!(f, "grid dimensionality {dim} exceeds maximum of {max}")
            }
            Self::EmptyExtent { axis } => write!(f, "axis {axis} has zero points"),
            Self::CellCountOverflow { axis } => {
                write!(f, "grid length overflows usize at axis {axis}")
            }
            Self::ExtentTooSmall { axis, extent, min } => {
                write!(f, "axis {axis} has {extent} points, scheme needs at least {min}")
            }
            Self::RankMismatch { expected, got } => {
                write!(f, "scheme works on {expected}-d grids, got {got}-d")
            }
            Self::NonPositiveStep { name, value } => {
                write!(f, "{name} must be finite and > 0, got {value}")
            }
            Self::NonFiniteSpeed { value } => write!(f, "speed must be finite, got {value}"),
            Self::UnknownBoundary { selector } => {
                write!(f, "unknown boundary selector '{selector}'")
            }
            Self::UnknownScheme { name } => write!(f, "unknown scheme '{name}'"),
            Self::ZeroThreads => write!(f, "thread count must be at least 1"),
            Self::MissingParameter { name } => write!(f, "{name} is required"),
        }
    }
}

impl Error for ConfigError {}

/// Errors from seeding initial conditions into the history.
///
/// On any of these the history is left untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedError {
    /// Slot index not in `0..depth-1`.
    SlotOutOfRange {
        /// The requested slot.
        slot: usize,
        /// Number of seedable slots (`depth - 1`).
        slots: usize,
    },
    /// Input length differs from the grid length.
    SizeMismatch {
        /// Grid length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },
    /// Input sample representation is not supported.
    TypeMismatch {
        /// The rejected dtype name.
        dtype: String,
    },
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlotOutOfRange { slot, slots } => {
                write!(f, "time slot {slot} is out of range (0..{slots})")
            }
            Self::SizeMismatch { expected, got } => {
                write!(f, "incompatible array size: expected {expected}, got {got}")
            }
            Self::TypeMismatch { dtype } => write!(f, "incompatible array type '{dtype}'"),
        }
    }
}

impl Error for SeedError {}

/// Errors from querying or publishing engine state at the wrong time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateError {
    /// No step has completed yet, so there is no result to read.
    NotReady,
    /// `publish()` called without a preceding `begin_step()`.
    NoStepInProgress,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "run at least one solver step first"),
            Self::NoStepInProgress => write!(f, "publish called without begin_step"),
        }
    }
}

impl Error for StateError {}

/// Errors from executing a single `step()`.
///
/// A failed step does not advance the time counter; the previously
/// published result stays current.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The step context carried a different number of previous slices
    /// than the scheme consumes.
    HistoryMismatch {
        /// Slices the scheme expects.
        expected: usize,
        /// Slices the context carried.
        got: usize,
    },
    /// The step context was built for a different grid than the scheme.
    ShapeMismatch {
        /// Extents the scheme was built for.
        expected: Vec<usize>,
        /// Extents of the supplied context.
        got: Vec<usize>,
    },
    /// A slice in the step context does not match the scheme's grid length.
    SliceLengthMismatch {
        /// Grid length of the scheme.
        expected: usize,
        /// Length of the offending slice.
        got: usize,
    },
    /// The OS refused to start a worker thread.
    WorkerSpawnFailed {
        /// Worker index.
        worker: usize,
        /// The OS error text.
        reason: String,
    },
    /// A worker thread panicked before finishing its range.
    WorkerPanicked {
        /// Worker index.
        worker: usize,
        /// Panic payload, when it was a string.
        message: String,
    },
    /// The history was not in a state that allows the step to publish.
    State(StateError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HistoryMismatch { expected, got } => {
                write!(f, "scheme needs {expected} previous slices, got {got}")
            }
            Self::ShapeMismatch { expected, got } => {
                write!(f, "context grid {got:?} does not match scheme grid {expected:?}")
            }
            Self::SliceLengthMismatch { expected, got } => {
                write!(f, "slice has {got} cells, scheme grid has {expected}")
            }
            Self::WorkerSpawnFailed { worker, reason } => {
                write!(f, "failed to spawn worker {worker}: {reason}")
            }
            Self::WorkerPanicked { worker, message } => {
                write!(f, "worker {worker} panicked: {message}")
            }
            Self::State(e) => write!(f, "history state: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::State(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StateError> for StepError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}
