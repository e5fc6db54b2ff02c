//! # tp-core
//!
//! Per-jet record model for flavor-tagging performance studies.
//!
//! A [`JetRecord`] is built from one jet of a buffered event, in either the
//! full or the reduced raw schema. The [`discriminant`] functions turn a
//! [`TagTriple`] into log-likelihood ratios, and [`PtBinTable`] partitions jet
//! momentum into the bins the per-momentum histograms are keyed on.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod discriminant;
pub mod error;
pub mod pt_bins;
pub mod traits;
pub mod types;

pub use buffer::{FullBuffer, MAX_JETS, ReducedBuffer, TagArrays};
pub use error::{Error, Result};
pub use pt_bins::PtBinTable;
pub use traits::{EventBuffer, EventSource};
pub use types::{Flavor, INVALID, JetRecord, TagTriple};
