//! b-tagging histogram group: raw tagger scores and GAIA log ratios.

use tp_core::discriminant::{anti_charm, anti_light, gr1};
use tp_core::{JetRecord, Result};
use tp_io::{Group, Histogram, NanPolicy};

use crate::config::PerfConfig;

/// One histogram per b-tagging quantity.
#[derive(Debug, Clone)]
pub struct BtagHists {
    mv1: Histogram,
    mv1c: Histogram,
    mv2c00: Histogram,
    mv2c10: Histogram,
    mv2c20: Histogram,
    mvb: Histogram,
    gaia_anti_u: Histogram,
    gaia_anti_c: Histogram,
    gaia_gr1: Histogram,
}

impl BtagHists {
    /// Allocate every histogram with the binning from `config`.
    pub fn new(config: &PerfConfig) -> Result<Self> {
        let score = || Histogram::new_1d(config.n_bins, 0.0, 1.0, NanPolicy::Drop);
        let disc =
            || Histogram::new_1d(config.n_bins, config.disc_low, config.disc_high, NanPolicy::Drop);
        Ok(Self {
            mv1: score()?,
            mv1c: score()?,
            mv2c00: score()?,
            mv2c10: score()?,
            mv2c20: score()?,
            mvb: score()?,
            gaia_anti_u: disc()?,
            gaia_anti_c: disc()?,
            gaia_gr1: disc()?,
        })
    }

    /// Add one jet to every histogram.
    pub fn fill(&mut self, jet: &JetRecord, weight: f64) -> Result<()> {
        self.mv1.fill(&[jet.mv1], weight)?;
        self.mv1c.fill(&[jet.mv1c], weight)?;
        self.mv2c00.fill(&[jet.mv2c00], weight)?;
        self.mv2c10.fill(&[jet.mv2c10], weight)?;
        self.mv2c20.fill(&[jet.mv2c20], weight)?;
        self.mvb.fill(&[jet.mvb], weight)?;
        self.gaia_anti_u.fill(&[anti_light(&jet.gaia)], weight)?;
        self.gaia_anti_c.fill(&[anti_charm(&jet.gaia)], weight)?;
        self.gaia_gr1.fill(&[gr1(&jet.gaia)], weight)?;
        Ok(())
    }

    /// Histograms with their output names.
    pub fn histograms(&self) -> [(&'static str, &Histogram); 9] {
        [
            ("mv1", &self.mv1),
            ("mv1c", &self.mv1c),
            ("mv2c00", &self.mv2c00),
            ("mv2c10", &self.mv2c10),
            ("mv2c20", &self.mv2c20),
            ("mvb", &self.mvb),
            ("gaiaAntiU", &self.gaia_anti_u),
            ("gaiaAntiC", &self.gaia_anti_c),
            ("gaiaGr1", &self.gaia_gr1),
        ]
    }

    /// Write every histogram into `group`.
    pub fn write_to(&self, group: &mut Group) -> Result<()> {
        for (name, hist) in self.histograms() {
            hist.write_to(group, name)?;
        }
        Ok(())
    }
}
