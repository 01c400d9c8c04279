//! Finite-difference update schemes for the fdstep engine.
//!
//! Every scheme fills the fresh history slot from the previous slices:
//!
//! | Scheme | Levels | Grid | Boundaries |
//! |--------|--------|------|------------|
//! | [`LaxAdvection1D`] | 2 | line | fixed, periodic, free ends |
//! | [`Leapfrog1D`] | 3 | line | fixed, periodic, free ends |
//! | [`Wave2D`] | 3 | plane | fixed |
//! | [`ThreadedLeapfrog`] | 3 | line | fixed |
//!
//! [`Scheme`] closes the set for exhaustive dispatch. The [`profiles`]
//! module builds initial conditions.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod advection;
pub mod leapfrog;
pub mod partition;
pub mod profiles;
pub mod scheme;
mod stencil;
pub mod threaded;
pub mod wave2d;

pub use advection::LaxAdvection1D;
pub use leapfrog::Leapfrog1D;
pub use partition::Partition;
pub use scheme::Scheme;
pub use stencil::MIN_POINTS_1D;
pub use threaded::{default_threads, ThreadedLeapfrog};
pub use wave2d::Wave2D;
