//! # tp-perf
//!
//! Flavor-conditioned histogram aggregation for flavor-tagging performance.
//!
//! Jets are routed by truth flavor to a bucket that fills inclusive b- and
//! c-tagging histogram groups and a b-tagging group for the jet's pt bin.
//! The filled tree is written once, at the end of the run.
//!
//! ```no_run
//! use std::path::Path;
//! use tp_perf::{PerfConfig, build_hists};
//!
//! let summary = build_hists(&["events.jsonl"], Path::new("perf.json"), PerfConfig::default())
//!     .unwrap();
//! println!("{} of {} jets selected", summary.selected_jets, summary.total_jets);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod btag;
pub mod by_flavor;
pub mod config;
pub mod ctag;
pub mod efficiency;
pub mod flavored;
pub mod peter;
pub mod perf_hists;
pub mod pipeline;

pub use btag::BtagHists;
pub use by_flavor::ByFlavor;
pub use config::{JetSelection, JvfCut, PerfConfig};
pub use ctag::CtagHists;
pub use efficiency::PtEfficiency;
pub use flavored::FlavoredHists;
pub use perf_hists::JetPerfHists;
pub use pipeline::{RunSummary, build_hists, fill_peters_hists};
