//! Per-flavor bucket: inclusive b/c-tagging groups plus b-tagging per pt bin.

use tp_core::{Error, JetRecord, PtBinTable, Result};
use tp_io::Group;

use crate::btag::BtagHists;
use crate::config::PerfConfig;
use crate::ctag::CtagHists;

/// Histograms for one truth flavor.
///
/// Only b-tagging is split by pt; c-tagging is kept inclusive.
#[derive(Debug, Clone)]
pub struct FlavoredHists {
    btag: BtagHists,
    ctag: CtagHists,
    btag_pt: Vec<BtagHists>,
    pt_bins: PtBinTable,
}

impl FlavoredHists {
    /// Allocate the inclusive groups and one b-tagging group per bin of `pt_bins`.
    pub fn new(config: &PerfConfig, pt_bins: PtBinTable) -> Result<Self> {
        let btag_pt =
            (0..pt_bins.n_bins()).map(|_| BtagHists::new(config)).collect::<Result<Vec<_>>>()?;
        Ok(Self { btag: BtagHists::new(config)?, ctag: CtagHists::new(config)?, btag_pt, pt_bins })
    }

    /// Fill the inclusive groups, then the b-tagging group of the jet's pt bin if it has one.
    pub fn fill(&mut self, jet: &JetRecord, weight: f64) -> Result<()> {
        self.btag.fill(jet, weight)?;
        self.ctag.fill(jet, weight)?;
        if let Some(bin) = self.pt_bins.bin_for(jet.pt) {
            self.btag_pt[bin].fill(jet, weight)?;
        }
        Ok(())
    }

    /// Inclusive b-tagging group.
    pub fn btag(&self) -> &BtagHists {
        &self.btag
    }

    /// Inclusive c-tagging group.
    pub fn ctag(&self) -> &CtagHists {
        &self.ctag
    }

    /// b-tagging group of pt bin `bin`.
    pub fn btag_pt_bin(&self, bin: usize) -> Option<&BtagHists> {
        self.btag_pt.get(bin)
    }

    /// Lays out `btag/all`, `btag/ptBins/<lo>-<hi>` and `ctag/all`.
    pub fn write_to(&self, group: &mut Group) -> Result<()> {
        let btag = group.create_group("btag")?;
        self.btag.write_to(btag.create_group("all")?)?;
        let pt_group = btag.create_group("ptBins")?;
        for (bin, hists) in self.btag_pt.iter().enumerate() {
            let name = self.pt_bins.bin_name(bin).ok_or_else(|| {
                Error::Validation(format!("no name for pt bin {bin}"))
            })?;
            hists.write_to(pt_group.create_group(&name)?)?;
        }

        let ctag = group.create_group("ctag")?;
        self.ctag.write_to(ctag.create_group("all")?)
    }
}
