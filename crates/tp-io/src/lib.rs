//! # tp-io
//!
//! Storage-side collaborators of the aggregation core: the weighted
//! [`Histogram`] primitive, the hierarchical [`OutputFile`] sink, and the
//! [`JsonLinesSource`] event source with its flat [`JetStream`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod histogram;
pub mod output;
pub mod source;
pub mod stream;

pub use histogram::{Axis, Histogram, MAX_SLOTS, NanPolicy};
pub use output::{Dataset, Group, Node, OutputFile};
pub use source::JsonLinesSource;
pub use stream::{JetConverter, JetStream};
