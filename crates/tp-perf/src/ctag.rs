//! c-tagging histogram group: joint (anti-light, anti-bottom) planes per tagger.

use tp_core::discriminant::{ctag_anti_bottom, ctag_anti_light};
use tp_core::{JetRecord, Result, TagTriple};
use tp_io::{Axis, Group, Histogram, NanPolicy};

use crate::config::PerfConfig;

/// `antiU` (x) by `antiB` (y) plane for one tagger.
pub(crate) fn ctag_plane(n_bins: usize, low: f64, high: f64) -> Result<Histogram> {
    let axis = Axis::new("x", n_bins, low, high);
    Histogram::new(vec![axis.renamed("antiU"), axis.renamed("antiB")], NanPolicy::Drop)
}

/// Fill a c-tagging plane from one triple.
pub(crate) fn fill_plane(hist: &mut Histogram, triple: &TagTriple, weight: f64) -> Result<()> {
    hist.fill(&[ctag_anti_light(triple), ctag_anti_bottom(triple)], weight)
}

/// 2-D c-tagging planes for GAIA, JetFitterCharm and JetFitter, plus the raw GAIA `pc`.
#[derive(Debug, Clone)]
pub struct CtagHists {
    gaia: Histogram,
    jfc: Histogram,
    jfit: Histogram,
    gaia_c: Histogram,
}

impl CtagHists {
    /// Allocate every histogram with the binning from `config`.
    pub fn new(config: &PerfConfig) -> Result<Self> {
        let plane = || ctag_plane(config.n_2d_bins, config.disc_low, config.disc_high);
        Ok(Self {
            gaia: plane()?,
            jfc: plane()?,
            jfit: plane()?,
            gaia_c: Histogram::new_1d(config.n_bins, 0.0, 1.0, NanPolicy::Drop)?,
        })
    }

    /// Add one jet to every histogram.
    pub fn fill(&mut self, jet: &JetRecord, weight: f64) -> Result<()> {
        fill_plane(&mut self.gaia, &jet.gaia, weight)?;
        fill_plane(&mut self.jfc, &jet.jfc, weight)?;
        fill_plane(&mut self.jfit, &jet.jfit, weight)?;
        self.gaia_c.fill(&[jet.gaia.pc], weight)
    }

    /// Histograms with their output names.
    pub fn histograms(&self) -> [(&'static str, &Histogram); 4] {
        [("gaia", &self.gaia), ("jfc", &self.jfc), ("jfit", &self.jfit), ("gaiaC", &self.gaia_c)]
    }

    /// Write every histogram into `group`.
    pub fn write_to(&self, group: &mut Group) -> Result<()> {
        for (name, hist) in self.histograms() {
            hist.write_to(group, name)?;
        }
        Ok(())
    }
}
