//! Jet record model: truth flavor, tagging triples and the per-jet record.

use crate::buffer::{FullBuffer, MAX_JETS, ReducedBuffer, TagArrays};
use crate::error::{Error, Result};
use crate::traits::EventBuffer;

/// Sentinel for quantities a source did not provide (or an algorithm that did not run).
pub const INVALID: f64 = -999.0;

/// True origin of a jet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Bottom
    B,
    /// Charm
    C,
    /// Light (u, d, s, gluon)
    U,
    /// Hadronic tau
    T,
    /// Collision data, no truth available
    Data,
    /// Unmapped truth label
    Error,
}

impl Flavor {
    /// The flavors that own histograms, in output order.
    pub const SIMULATED: [Flavor; 4] = [Flavor::B, Flavor::C, Flavor::U, Flavor::T];

    /// Map a raw `flavor_truth_label` code. Anything unknown is [`Flavor::Error`].
    pub fn from_truth_label(code: i32) -> Self {
        match code {
            5 => Flavor::B,
            4 => Flavor::C,
            0 => Flavor::U,
            15 => Flavor::T,
            _ => Flavor::Error,
        }
    }

    /// Dispatch slot for the simulated flavors, `None` for data and error jets.
    pub fn slot(self) -> Option<usize> {
        match self {
            Flavor::B => Some(0),
            Flavor::C => Some(1),
            Flavor::U => Some(2),
            Flavor::T => Some(3),
            Flavor::Data | Flavor::Error => None,
        }
    }

    /// Output group name.
    pub fn group_name(self) -> Result<&'static str> {
        match self {
            Flavor::B => Ok("B"),
            Flavor::C => Ok("C"),
            Flavor::U => Ok("U"),
            Flavor::T => Ok("T"),
            other => Err(Error::UnsupportedFlavor(other)),
        }
    }
}

/// Light/charm/bottom pseudo-probabilities from one tagging algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagTriple {
    /// Light probability
    pub pu: f64,
    /// Charm probability
    pub pc: f64,
    /// Bottom probability
    pub pb: f64,
}

impl Default for TagTriple {
    fn default() -> Self {
        Self { pu: INVALID, pc: INVALID, pb: INVALID }
    }
}

impl TagTriple {
    /// Create a triple.
    pub fn new(pu: f64, pc: f64, pb: f64) -> Self {
        Self { pu, pc, pb }
    }

    /// True if no component is zero, i.e. every log ratio is finite for valid inputs.
    pub fn all_nonzero(&self) -> bool {
        self.pu != 0.0 && self.pc != 0.0 && self.pb != 0.0
    }

    fn from_arrays(arrays: &TagArrays, index: usize) -> Option<Self> {
        Some(Self {
            pu: *arrays.pu.get(index)?,
            pc: *arrays.pc.get(index)?,
            pb: *arrays.pb.get(index)?,
        })
    }
}

/// One reconstructed jet.
///
/// The default value is the invalid sentinel record. Records built from a
/// buffer are always `valid`, even if some of their quantities are sentinels.
#[derive(Debug, Clone, PartialEq)]
pub struct JetRecord {
    /// Entry of the event the jet belongs to.
    pub event: usize,
    /// Transverse momentum (MeV).
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Jet vertex fraction, reduced schema only.
    pub jvf: f64,
    /// Built from a buffer.
    pub valid: bool,
    /// MV1 score
    pub mv1: f64,
    /// MV1c score
    pub mv1c: f64,
    /// MV2c00 score
    pub mv2c00: f64,
    /// MV2c10 score
    pub mv2c10: f64,
    /// MV2c20 score
    pub mv2c20: f64,
    /// MVb score
    pub mvb: f64,
    /// Truth flavor.
    pub truth_label: Flavor,
    /// GAIA probabilities, meaningful only when `gaia_valid`.
    pub gaia: TagTriple,
    /// JetFitter probabilities.
    pub jfit: TagTriple,
    /// JetFitterCharm probabilities.
    pub jfc: TagTriple,
    /// GAIA ran on this jet.
    pub gaia_valid: bool,
}

impl Default for JetRecord {
    fn default() -> Self {
        Self {
            event: 0,
            pt: INVALID,
            eta: INVALID,
            jvf: INVALID,
            valid: false,
            mv1: INVALID,
            mv1c: INVALID,
            mv2c00: INVALID,
            mv2c10: INVALID,
            mv2c20: INVALID,
            mvb: INVALID,
            truth_label: Flavor::Error,
            gaia: TagTriple::default(),
            jfit: TagTriple::default(),
            jfc: TagTriple::default(),
            gaia_valid: false,
        }
    }
}

impl JetRecord {
    /// Build jet `index` of the event held in a full-schema buffer.
    pub fn from_full_schema(buf: &FullBuffer, index: usize) -> Result<Self> {
        let bad = || Error::BadJetIndex { event: buf.entry(), index, n_jets: buf.n_jets() };
        if index >= buf.n_jets() {
            return Err(bad());
        }
        let at = |col: &[f64]| col.get(index).copied().ok_or_else(bad);

        let label = *buf.jet_flavor_truth_label.get(index).ok_or_else(bad)?;
        let gaia_valid = *buf.jet_gaia_is_valid.get(index).ok_or_else(bad)? != 0;

        Ok(Self {
            event: buf.entry(),
            pt: at(&buf.jet_pt)?,
            eta: at(&buf.jet_eta)?,
            jvf: INVALID,
            valid: true,
            mv1: at(&buf.jet_mv1)?,
            mv1c: at(&buf.jet_mv1c)?,
            mv2c00: at(&buf.jet_mv2c00)?,
            mv2c10: at(&buf.jet_mv2c10)?,
            mv2c20: at(&buf.jet_mv2c20)?,
            mvb: at(&buf.jet_mvb)?,
            truth_label: Flavor::from_truth_label(label),
            gaia: TagTriple::from_arrays(&buf.gaia, index).ok_or_else(bad)?,
            jfit: TagTriple::from_arrays(&buf.jfit, index).ok_or_else(bad)?,
            jfc: TagTriple::from_arrays(&buf.jfc, index).ok_or_else(bad)?,
            gaia_valid,
        })
    }

    /// Build jet `index` of the event held in a reduced-schema buffer.
    ///
    /// Fields the reduced schema does not carry are set to [`INVALID`] and
    /// `gaia_valid` is false.
    pub fn from_reduced_schema(buf: &ReducedBuffer, index: usize) -> Result<Self> {
        let bad = || Error::BadJetIndex { event: buf.entry(), index, n_jets: buf.n_jets() };
        if index >= buf.n_jets() || index >= MAX_JETS {
            return Err(bad());
        }
        let at = |col: &[f64]| col.get(index).copied().ok_or_else(bad);

        let label = *buf.jet_flavor_truth_label.get(index).ok_or_else(bad)?;

        Ok(Self {
            event: buf.entry(),
            pt: at(&buf.jet_pt)?,
            eta: at(&buf.jet_eta)?,
            jvf: at(&buf.jvf)?,
            valid: true,
            truth_label: Flavor::from_truth_label(label),
            jfit: TagTriple::from_arrays(&buf.jfit, index).ok_or_else(bad)?,
            jfc: TagTriple::from_arrays(&buf.jfc, index).ok_or_else(bad)?,
            gaia_valid: false,
            ..Self::default()
        })
    }
}
