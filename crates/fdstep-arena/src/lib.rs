//! Rotating time-history arena for the fdstep engine.
//!
//! An explicit scheme of history depth `k` needs the `k - 1` most recent
//! time slices to produce the next one. [`HistoryRing`] owns all `k`
//! slices in a single contiguous allocation and hands out a
//! [`StepFrame`] per step: shared borrows of the previous slices, oldest
//! first, plus a mutable borrow of the slot being written.
//!
//! # Rotation
//!
//! ```text
//! memory: [ slice 0 | slice 1 | slice 2 ]      (k = 3, one Vec<f64>)
//!
//! logical slot l  →  physical slice (l + counter) mod k
//!   l = 0 .. k-2    previous slices, oldest → newest
//!   l = k-1         fresh slot (recycles the oldest slice)
//! ```
//!
//! Advancing the counter is the only thing a rotation does; no grid data
//! is ever copied between slices.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod ring;

pub use config::HistoryConfig;
pub use ring::{HistoryRing, StepFrame};
