//! Propagation scheme trait and step context for the fdstep engine.
//!
//! The [`Propagate`] trait defines the `&self` update function that fills
//! the fresh history slot from a split-borrow [`StepContext`] holding the
//! previous slices read-only.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod propagate;

pub use context::StepContext;
pub use propagate::Propagate;
