//! Ordered momentum bins with an open-ended last bin.

use crate::error::{Error, Result};

/// Reference bin edges in GeV; the table stores them in MeV.
const REFERENCE_EDGES_GEV: [f64; 13] =
    [0.0, 20.0, 30.0, 40.0, 50.0, 60.0, 75.0, 90.0, 110.0, 150.0, 200.0, 600.0, f64::INFINITY];

/// Partition of jet momentum into half-open intervals `[edge[i], edge[i + 1])`.
///
/// Lookup picks the first edge strictly greater than the momentum, so a value
/// equal to an edge belongs to the bin that edge opens. Values below the
/// first edge land in bin 0.
#[derive(Debug, Clone, PartialEq)]
pub struct PtBinTable {
    edges: Vec<f64>,
    label_scale: f64,
}

impl PtBinTable {
    /// Build from ascending edges. `label_scale` divides edges when naming bins
    /// (1000 turns MeV edges into GeV labels).
    pub fn new(edges: Vec<f64>, label_scale: f64) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::Validation(format!(
                "pt binning needs at least two edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| e.is_nan()) {
            return Err(Error::Validation("pt bin edge is NaN".into()));
        }
        if let Some(w) = edges.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::Validation(format!(
                "pt bin edges must be strictly increasing ({} >= {})",
                w[0], w[1]
            )));
        }
        if label_scale <= 0.0 || !label_scale.is_finite() {
            return Err(Error::Validation(format!("invalid pt label scale {label_scale}")));
        }
        Ok(Self { edges, label_scale })
    }

    /// Reference binning in MeV, labelled in GeV.
    pub fn reference() -> Self {
        Self { edges: REFERENCE_EDGES_GEV.iter().map(|e| e * 1e3).collect(), label_scale: 1e3 }
    }

    /// Bin edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins (one fewer than the edges).
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Bin holding `pt`, or `None` for non-finite momenta and momenta at or
    /// beyond a finite last edge.
    ///
    /// Bins are the intervals between consecutive edges, so with an infinite
    /// last edge the open-ended bin is `n_bins() - 1` (11 for the reference
    /// table).
    pub fn bin_for(&self, pt: f64) -> Option<usize> {
        if !pt.is_finite() {
            return None;
        }
        let upper = self.edges.partition_point(|&e| e <= pt);
        if upper == self.edges.len() {
            return None;
        }
        Some(upper.saturating_sub(1))
    }

    /// Name of bin `bin` as `<lower>-<upper>`, with `INF` for an infinite edge.
    pub fn bin_name(&self, bin: usize) -> Option<String> {
        let lo = self.edges.get(bin)?;
        let hi = self.edges.get(bin + 1)?;
        Some(format!("{}-{}", self.edge_label(*lo), self.edge_label(*hi)))
    }

    fn edge_label(&self, edge: f64) -> String {
        if edge == f64::INFINITY {
            "INF".to_string()
        } else if edge == f64::NEG_INFINITY {
            "-INF".to_string()
        } else {
            ((edge / self.label_scale).trunc() as i64).to_string()
        }
    }
}

impl Default for PtBinTable {
    fn default() -> Self {
        Self::reference()
    }
}
