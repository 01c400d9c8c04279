//! Time-stepping engine driving fdstep finite-difference schemes.
//!
//! [`Engine`] composes a history ring with one scheme: the caller seeds
//! the first `k-1` slices, then each [`step()`](Engine::step) rotates the
//! ring, runs the scheme over the rotated view and publishes the fresh
//! slice as the current result. [`SchemeSpec`] builds a scheme from the
//! flat configuration surface an array-marshalling layer supplies.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod metrics;

pub use config::{SchemeKind, SchemeSpec};
pub use engine::{Engine, ResultView};
pub use metrics::StepMetrics;
