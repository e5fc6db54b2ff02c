//! Top-level b/c-tagging performance histograms, one bucket per truth flavor.

use tp_core::{Flavor, JetRecord, Result};
use tp_io::Group;

use crate::by_flavor::ByFlavor;
use crate::config::PerfConfig;
use crate::flavored::FlavoredHists;

/// Aggregation root for full-schema jets.
///
/// Data and error jets are dropped on fill.
#[derive(Debug, Clone)]
pub struct JetPerfHists {
    flavors: ByFlavor<FlavoredHists>,
}

impl JetPerfHists {
    /// Allocate every bucket with the binning from `config`.
    pub fn new(config: PerfConfig) -> Result<Self> {
        let pt_bins = config.pt_bins()?;
        let flavors = ByFlavor::try_new(|_| FlavoredHists::new(&config, pt_bins.clone()))?;
        log::debug!("allocated jet performance histograms ({} pt bins)", pt_bins.n_bins());
        Ok(Self { flavors })
    }

    /// Route `jet` to its flavor bucket.
    pub fn fill(&mut self, jet: &JetRecord, weight: f64) -> Result<()> {
        match self.flavors.get_mut(jet.truth_label) {
            Some(bucket) => bucket.fill(jet, weight),
            None => Ok(()),
        }
    }

    /// Bucket for `flavor`.
    pub fn flavor(&self, flavor: Flavor) -> Option<&FlavoredHists> {
        self.flavors.get(flavor)
    }

    /// Write `B`, `C`, `U` and `T` groups into `group`.
    pub fn write_to(&self, group: &mut Group) -> Result<()> {
        self.flavors.write_to(group, FlavoredHists::write_to)
    }
}
