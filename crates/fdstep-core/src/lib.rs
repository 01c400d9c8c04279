//! Core types and error enums for the fdstep finite-difference engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the history arena, the update schemes and the
//! engine: grid shapes, boundary policies, scheme parameters, seed sample
//! decoding, and the error types for each subsystem.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod params;
pub mod sample;
pub mod shape;

pub use boundary::Boundary;
pub use error::{ConfigError, SeedError, StateError, StepError};
pub use params::SchemeParams;
pub use sample::{decode_samples, Dtype};
pub use shape::{Extents, GridShape};
