//! Raw per-event buffers for the two supported source schemas.
//!
//! Field names follow the branch names of the flavor-tagging ntuples the
//! buffers are read from (prefixes stripped).

use serde::Deserialize;

use crate::traits::EventBuffer;

/// Capacity of the fixed-size reduced-schema arrays.
pub const MAX_JETS: usize = 1000;

/// Per-jet light/charm/bottom probability columns of one tagger.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagArrays {
    /// Light probabilities
    pub pu: Vec<f64>,
    /// Charm probabilities
    pub pc: Vec<f64>,
    /// Bottom probabilities
    pub pb: Vec<f64>,
}

/// Full schema: variable-length jet columns, six scalar taggers and three triples.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FullBuffer {
    /// Entry currently loaded, set by the source on seek.
    #[serde(skip)]
    pub entry: usize,
    /// Jet pt (MeV)
    pub jet_pt: Vec<f64>,
    /// Jet eta
    pub jet_eta: Vec<f64>,
    /// MV1 weight
    #[serde(rename = "jet_MV1")]
    pub jet_mv1: Vec<f64>,
    /// MV1c weight
    #[serde(rename = "jet_MV1c")]
    pub jet_mv1c: Vec<f64>,
    /// MV2c00 weight
    #[serde(rename = "jet_MV2c00")]
    pub jet_mv2c00: Vec<f64>,
    /// MV2c10 weight
    #[serde(rename = "jet_MV2c10")]
    pub jet_mv2c10: Vec<f64>,
    /// MV2c20 weight
    #[serde(rename = "jet_MV2c20")]
    pub jet_mv2c20: Vec<f64>,
    /// MVb weight
    #[serde(rename = "jet_MVb")]
    pub jet_mvb: Vec<f64>,
    /// Raw truth label codes
    pub jet_flavor_truth_label: Vec<i32>,
    /// GAIA components
    pub gaia: TagArrays,
    /// JetFitter components
    pub jfit: TagArrays,
    /// JetFitterCharm components
    pub jfc: TagArrays,
    /// Nonzero where GAIA ran
    #[serde(rename = "jet_gaia_isValid")]
    pub jet_gaia_is_valid: Vec<i32>,
}

impl EventBuffer for FullBuffer {
    const FIELDS: &'static [&'static str] = &[
        "jet_pt",
        "jet_eta",
        "jet_MV1",
        "jet_MV1c",
        "jet_MV2c00",
        "jet_MV2c10",
        "jet_MV2c20",
        "jet_MVb",
        "jet_flavor_truth_label",
        "gaia",
        "jfit",
        "jfc",
        "jet_gaia_isValid",
    ];

    fn set_entry(&mut self, entry: usize) {
        self.entry = entry;
    }

    fn entry(&self) -> usize {
        self.entry
    }

    fn n_jets(&self) -> usize {
        self.jet_pt.len()
    }
}

/// Reduced schema: explicit jet count, JVF, and the two JetFitter triples only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReducedBuffer {
    /// Entry currently loaded, set by the source on seek.
    #[serde(skip)]
    pub entry: usize,
    /// Number of jets filled in the arrays
    #[serde(rename = "nJets")]
    pub n_jets: usize,
    /// Jet pt (MeV)
    pub jet_pt: Vec<f64>,
    /// Jet eta
    pub jet_eta: Vec<f64>,
    /// Jet vertex fraction
    #[serde(rename = "jet_JVF")]
    pub jvf: Vec<f64>,
    /// Raw truth label codes
    pub jet_flavor_truth_label: Vec<i32>,
    /// JetFitter components
    pub jfit: TagArrays,
    /// JetFitterCharm components
    pub jfc: TagArrays,
}

impl EventBuffer for ReducedBuffer {
    const FIELDS: &'static [&'static str] =
        &["nJets", "jet_pt", "jet_eta", "jet_JVF", "jet_flavor_truth_label", "jfit", "jfc"];

    fn set_entry(&mut self, entry: usize) {
        self.entry = entry;
    }

    fn entry(&self) -> usize {
        self.entry
    }

    fn n_jets(&self) -> usize {
        self.n_jets
    }
}
