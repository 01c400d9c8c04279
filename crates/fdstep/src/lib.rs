//! fdstep: explicit finite-difference time stepping.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all fdstep sub-crates. For most users, adding `fdstep` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use fdstep::prelude::*;
//!
//! let spec = SchemeSpec::new(SchemeKind::Leapfrog, vec![5], 0.5, 1.0);
//! let mut engine = Engine::from_spec(&spec).unwrap();
//! let pulse = [0.0, 0.0, 1.0, 0.0, 0.0];
//! engine.seed(0, &pulse).unwrap();
//! engine.seed(1, &pulse).unwrap();
//! engine.step().unwrap();
//!
//! assert_eq!(engine.current_time().unwrap(), 2);
//! assert_eq!(engine.current_result().unwrap(), &[0.0, 0.25, 0.5, 0.25, 0.0]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fdstep-core` | Errors, boundary policies, grid shapes, parameters |
//! | [`arena`] | `fdstep-arena` | History ring and per-step frames |
//! | [`scheme`] | `fdstep-scheme` | `Propagate` trait and `StepContext` |
//! | [`schemes`] | `fdstep-schemes` | Built-in schemes, partitioner, wave profiles |
//! | [`engine`] | `fdstep-engine` | Stepping engine, declarative config, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Errors, boundary policies, grid shapes and parameters (`fdstep-core`).
pub use fdstep_core as types;

/// History storage (`fdstep-arena`).
///
/// [`arena::HistoryRing`] keeps `k` slices and hands out a rotated
/// [`arena::StepFrame`] per step. The engine owns one; use it directly
/// only when driving a scheme by hand.
pub use fdstep_arena as arena;

/// The scheme extension point (`fdstep-scheme`).
pub use fdstep_scheme as scheme;

/// Built-in schemes (`fdstep-schemes`).
///
/// [`schemes::LaxAdvection1D`], [`schemes::Leapfrog1D`],
/// [`schemes::Wave2D`] and [`schemes::ThreadedLeapfrog`], plus initial
/// conditions in [`schemes::profiles`].
pub use fdstep_schemes as schemes;

/// Stepping engine (`fdstep-engine`).
pub use fdstep_engine as engine;

/// Common imports for typical fdstep usage.
///
/// ```rust
/// use fdstep::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use fdstep_core::{Boundary, GridShape, SchemeParams};

    // Errors
    pub use fdstep_core::{ConfigError, SeedError, StateError, StepError};

    // Scheme trait
    pub use fdstep_scheme::{Propagate, StepContext};

    // Schemes
    pub use fdstep_schemes::{LaxAdvection1D, Leapfrog1D, Scheme, ThreadedLeapfrog, Wave2D};

    // Engine
    pub use fdstep_engine::{Engine, ResultView, SchemeKind, SchemeSpec, StepMetrics};
}
