//! Error types for tagperf

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Flavor;

/// tagperf error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Jet index outside the jets of the current event
    #[error("bad jet index {index} in event {event} ({n_jets} jets)")]
    BadJetIndex {
        /// Event (entry) the buffer currently holds.
        event: usize,
        /// Requested jet index.
        index: usize,
        /// Number of jets the event reports.
        n_jets: usize,
    },

    /// A flavor without an output slot reached the serializer
    #[error("unsupported flavor at serialization: {0:?}")]
    UnsupportedFlavor(Flavor),

    /// Output destination already exists
    #[error("{} exists", .0.display())]
    OutputExists(PathBuf),

    /// Histogram construction or fill error
    #[error("Histogram error: {0}")]
    Histogram(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
