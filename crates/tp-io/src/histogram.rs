//! Fixed-binned weighted histogram with explicit under/overflow slots.

use serde::{Deserialize, Serialize};
use tp_core::{Error, Result};

use crate::output::{Dataset, Group};

/// Largest number of storage slots (flows included) a histogram may allocate.
pub const MAX_SLOTS: usize = 1 << 28;

/// One histogram axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis name.
    pub name: String,
    /// Number of in-range bins.
    pub n_bins: usize,
    /// Lower edge of the first bin.
    pub low: f64,
    /// Upper edge of the last bin.
    pub high: f64,
    /// Unit label, may be empty.
    pub units: String,
}

impl Axis {
    /// Create an axis.
    pub fn new(name: impl Into<String>, n_bins: usize, low: f64, high: f64) -> Self {
        Self { name: name.into(), n_bins, low, high, units: String::new() }
    }

    /// Set the unit label.
    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Same binning under another name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self { name: name.into(), ..self.clone() }
    }

    /// Storage slots along this axis, including underflow and overflow.
    fn n_slots(&self) -> usize {
        self.n_bins + 2
    }

    /// Slot index for `x`: 0 is underflow, `n_bins + 1` is overflow.
    fn slot(&self, x: f64) -> usize {
        if x < self.low {
            return 0;
        }
        if x >= self.high {
            return self.n_bins + 1;
        }
        let frac = (x - self.low) / (self.high - self.low);
        // rounding can push frac * n_bins to n_bins just below `high`
        ((frac * self.n_bins as f64) as usize).min(self.n_bins - 1) + 1
    }
}

/// What to do with a NaN coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NanPolicy {
    /// Silently drop the fill (counted in `nan_dropped`).
    Drop,
    /// Reject the fill with an error.
    Error,
}

/// Weighted 1-D or 2-D histogram.
///
/// Infinite coordinates land in the flow slots; NaN coordinates follow the
/// [`NanPolicy`].
#[derive(Debug, Clone)]
pub struct Histogram {
    axes: Vec<Axis>,
    nan_policy: NanPolicy,
    values: Vec<f64>,
    sumw2: Vec<f64>,
    entries: u64,
    nan_dropped: u64,
}

impl Histogram {
    /// Create a histogram over one or two axes.
    pub fn new(axes: Vec<Axis>, nan_policy: NanPolicy) -> Result<Self> {
        if axes.is_empty() || axes.len() > 2 {
            return Err(Error::Histogram(format!("expected 1 or 2 axes, got {}", axes.len())));
        }
        for ax in &axes {
            if ax.n_bins == 0 {
                return Err(Error::Histogram(format!("axis '{}' has no bins", ax.name)));
            }
            if !ax.low.is_finite() || !ax.high.is_finite() || ax.low >= ax.high {
                return Err(Error::Histogram(format!(
                    "axis '{}' has invalid range [{}, {})",
                    ax.name, ax.low, ax.high
                )));
            }
        }
        let n = axes
            .iter()
            .try_fold(1usize, |acc, ax| ax.n_bins.checked_add(2)?.checked_mul(acc))
            .filter(|&n| n <= MAX_SLOTS)
            .ok_or_else(|| {
                let bins: Vec<usize> = axes.iter().map(|ax| ax.n_bins).collect();
                Error::Histogram(format!("binning {bins:?} exceeds {MAX_SLOTS} slots"))
            })?;
        Ok(Self {
            axes,
            nan_policy,
            values: vec![0.0; n],
            sumw2: vec![0.0; n],
            entries: 0,
            nan_dropped: 0,
        })
    }

    /// One-axis histogram named `x`.
    pub fn new_1d(n_bins: usize, low: f64, high: f64, nan_policy: NanPolicy) -> Result<Self> {
        Self::new(vec![Axis::new("x", n_bins, low, high)], nan_policy)
    }

    /// Add `weight` at the point `coords` (one value per axis).
    pub fn fill(&mut self, coords: &[f64], weight: f64) -> Result<()> {
        if coords.len() != self.axes.len() {
            return Err(Error::Histogram(format!(
                "fill with {} coordinates on a {}-d histogram",
                coords.len(),
                self.axes.len()
            )));
        }
        if coords.iter().any(|c| c.is_nan()) {
            return match self.nan_policy {
                NanPolicy::Drop => {
                    self.nan_dropped += 1;
                    Ok(())
                }
                NanPolicy::Error => Err(Error::Histogram("NaN fill".into())),
            };
        }

        let idx = self.flat_index(coords);
        self.values[idx] += weight;
        self.sumw2[idx] += weight * weight;
        self.entries += 1;
        Ok(())
    }

    fn flat_index(&self, coords: &[f64]) -> usize {
        self.axes.iter().zip(coords).fold(0, |acc, (ax, &c)| acc * ax.n_slots() + ax.slot(c))
    }

    /// Axes.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Slot contents, row-major over `shape()`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Per-slot sum of squared weights.
    pub fn sumw2(&self) -> &[f64] {
        &self.sumw2
    }

    /// Slots per axis, flow slots included.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(Axis::n_slots).collect()
    }

    /// Accepted fills.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Fills dropped for NaN coordinates.
    pub fn nan_dropped(&self) -> u64 {
        self.nan_dropped
    }

    /// Sum of all slot contents, flows included.
    pub fn sum_of_weights(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Content of the slot holding `coords`, or `None` on dimension mismatch or NaN.
    pub fn value_at(&self, coords: &[f64]) -> Option<f64> {
        if coords.len() != self.axes.len() || coords.iter().any(|c| c.is_nan()) {
            return None;
        }
        Some(self.values[self.flat_index(coords)])
    }

    /// Snapshot as an output dataset.
    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            axes: self.axes.clone(),
            shape: self.shape(),
            values: self.values.clone(),
            sumw2: self.sumw2.clone(),
            entries: self.entries,
        }
    }

    /// Write under `name` in `group`.
    pub fn write_to(&self, group: &mut Group, name: &str) -> Result<()> {
        group.write_dataset(name, self.to_dataset())
    }
}
