//! Run configuration and the reference histogram constants.

use std::path::Path;

use serde::{Deserialize, Deserializer};
use tp_core::{JetRecord, PtBinTable, Result};

/// Bins of every 1-D discriminant and score histogram.
pub const N_BINS: usize = 10_000;
/// Bins per axis of the c-tagging 2-D histograms.
pub const N_2AX_BINS: usize = 1_000;
/// Bins per axis of the JetFitterCharm study 2-D histograms.
pub const PETER_N_2AX_BINS: usize = 2_000;
/// Lower edge of log-ratio discriminant axes.
pub const DISC_LOW: f64 = -10.0;
/// Upper edge of log-ratio discriminant axes.
pub const DISC_HIGH: f64 = 10.0;

/// JetFitterCharm working point: `ln(pc / pb)` must exceed this.
///
/// Working-point thresholds are single precision; comparisons widen them
/// exactly, so `0.95` means `0.949999988...`.
pub const JFC_ANTI_B_MIN: f32 = -0.9;
/// JetFitterCharm working point: `ln(pc / pu)` must exceed this.
pub const JFC_ANTI_U_MIN: f32 = 0.95;

/// Bins of the efficiency pt histograms.
pub const EFF_PT_BINS: usize = 1_000;
/// Upper edge of the efficiency pt histograms (MeV).
pub const EFF_PT_MAX: f64 = 1e6;

/// JVF requirement, waived for forward or hard jets.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JvfCut {
    /// Minimum JVF.
    pub min_jvf: f64,
    /// Jets with larger `|eta|` pass regardless.
    pub exempt_abs_eta: f64,
    /// Jets with larger pt (MeV) pass regardless.
    pub exempt_pt: f64,
}

impl Default for JvfCut {
    fn default() -> Self {
        Self { min_jvf: 0.5, exempt_abs_eta: 2.4, exempt_pt: 50e3 }
    }
}

impl JvfCut {
    /// True if the jet satisfies the cut or is exempt from it.
    pub fn passes(&self, jet: &JetRecord) -> bool {
        jet.jvf > self.min_jvf || jet.eta.abs() > self.exempt_abs_eta || jet.pt > self.exempt_pt
    }
}

/// Jet selection applied by the run drivers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JetSelection {
    /// Minimum pt (MeV).
    pub min_pt: f64,
    /// Maximum `|eta|`.
    pub max_abs_eta: f64,
    /// JVF cut, applied only where the schema provides JVF.
    pub jvf: JvfCut,
}

impl Default for JetSelection {
    fn default() -> Self {
        Self { min_pt: 20e3, max_abs_eta: 2.5, jvf: JvfCut::default() }
    }
}

impl JetSelection {
    /// pt and eta requirements.
    pub fn passes_kinematics(&self, jet: &JetRecord) -> bool {
        !(jet.pt < self.min_pt || jet.eta.abs() > self.max_abs_eta)
    }
}

/// Configuration passed by value to the aggregation roots and run drivers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerfConfig {
    /// Short run on the first `test_events` events with extra diagnostics.
    pub test_mode: bool,
    /// Bins of 1-D discriminant and score histograms.
    pub n_bins: usize,
    /// Bins per axis of the c-tagging 2-D histograms.
    pub n_2d_bins: usize,
    /// Bins per axis of the JetFitterCharm study 2-D histograms.
    pub peter_n_2d_bins: usize,
    /// Lower edge of discriminant axes.
    pub disc_low: f64,
    /// Upper edge of discriminant axes.
    pub disc_high: f64,
    /// Momentum bin edges (MeV); `null` in JSON stands for +infinity.
    #[serde(deserialize_with = "edges_with_infinity")]
    pub pt_edges: Vec<f64>,
    /// Divisor applied to edges in bin names.
    pub pt_label_scale: f64,
    /// Event cap for a full run.
    pub max_events: usize,
    /// Event cap in test mode.
    pub test_events: usize,
    /// Jet selection.
    pub selection: JetSelection,
}

impl Default for PerfConfig {
    fn default() -> Self {
        let reference = PtBinTable::reference();
        Self {
            test_mode: false,
            n_bins: N_BINS,
            n_2d_bins: N_2AX_BINS,
            peter_n_2d_bins: PETER_N_2AX_BINS,
            disc_low: DISC_LOW,
            disc_high: DISC_HIGH,
            pt_edges: reference.edges().to_vec(),
            pt_label_scale: 1e3,
            max_events: 1_000_000,
            test_events: 100,
            selection: JetSelection::default(),
        }
    }
}

fn edges_with_infinity<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<f64>, D::Error> {
    let raw: Vec<Option<f64>> = Vec::deserialize(d)?;
    Ok(raw.into_iter().map(|e| e.unwrap_or(f64::INFINITY)).collect())
}

impl PerfConfig {
    /// Load a JSON config; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Validated momentum bin table.
    pub fn pt_bins(&self) -> Result<PtBinTable> {
        PtBinTable::new(self.pt_edges.clone(), self.pt_label_scale)
    }

    /// Number of events a run may read.
    pub fn event_limit(&self) -> usize {
        if self.test_mode { self.test_events.min(self.max_events) } else { self.max_events }
    }
}
