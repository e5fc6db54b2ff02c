//! JetFitterCharm study histograms for reduced-schema jets.

use tp_core::{Flavor, JetRecord, Result};
use tp_io::{Group, Histogram};

use crate::by_flavor::ByFlavor;
use crate::config::{JFC_ANTI_B_MIN, JFC_ANTI_U_MIN, PerfConfig};
use crate::ctag::{ctag_plane, fill_plane};
use crate::efficiency::PtEfficiency;

/// Per-flavor JetFitter/JetFitterCharm planes and the JetFitterCharm efficiency.
#[derive(Debug, Clone)]
pub struct Hists {
    jfc_efficiency: PtEfficiency,
    jfc: Histogram,
    jfit: Histogram,
}

impl Hists {
    /// Allocate with the binning from `config`.
    pub fn new(config: &PerfConfig) -> Result<Self> {
        let plane = || ctag_plane(config.peter_n_2d_bins, config.disc_low, config.disc_high);
        Ok(Self {
            jfc_efficiency: PtEfficiency::new(JFC_ANTI_B_MIN, JFC_ANTI_U_MIN)?,
            jfc: plane()?,
            jfit: plane()?,
        })
    }

    /// Add one jet.
    pub fn fill(&mut self, jet: &JetRecord, weight: f64) -> Result<()> {
        fill_plane(&mut self.jfc, &jet.jfc, weight)?;
        fill_plane(&mut self.jfit, &jet.jfit, weight)?;
        self.jfc_efficiency.fill(jet.pt, &jet.jfc, weight)
    }

    /// JetFitterCharm plane.
    pub fn jfc(&self) -> &Histogram {
        &self.jfc
    }

    /// JetFitter plane.
    pub fn jfit(&self) -> &Histogram {
        &self.jfit
    }

    /// JetFitterCharm working-point efficiency.
    pub fn jfc_efficiency(&self) -> &PtEfficiency {
        &self.jfc_efficiency
    }

    /// Write `jfc`, `jfit` and `efficiency/{pass,fail}`.
    pub fn write_to(&self, group: &mut Group) -> Result<()> {
        self.jfc.write_to(group, "jfc")?;
        self.jfit.write_to(group, "jfit")?;
        self.jfc_efficiency.write_to(group.create_group("efficiency")?)
    }
}

/// Aggregation root for reduced-schema jets.
#[derive(Debug, Clone)]
pub struct FlavoredHists {
    flavors: ByFlavor<Hists>,
}

impl FlavoredHists {
    /// Allocate one [`Hists`] per simulated flavor.
    pub fn new(config: PerfConfig) -> Result<Self> {
        Ok(Self { flavors: ByFlavor::try_new(|_| Hists::new(&config))? })
    }

    /// Route `jet` to its flavor; data and error jets are dropped.
    pub fn fill(&mut self, jet: &JetRecord, weight: f64) -> Result<()> {
        match self.flavors.get_mut(jet.truth_label) {
            Some(hists) => hists.fill(jet, weight),
            None => Ok(()),
        }
    }

    /// Histograms for `flavor`.
    pub fn flavor(&self, flavor: Flavor) -> Option<&Hists> {
        self.flavors.get(flavor)
    }

    /// Write `B`, `C`, `U` and `T` groups into `group`.
    pub fn write_to(&self, group: &mut Group) -> Result<()> {
        self.flavors.write_to(group, Hists::write_to)
    }
}
