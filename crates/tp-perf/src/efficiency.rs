//! Pass/fail pt spectra for a c-tagging working point.

use tp_core::discriminant::{ctag_anti_bottom, ctag_anti_light};
use tp_core::{Result, TagTriple};
use tp_io::{Axis, Group, Histogram, NanPolicy};

use crate::config::{EFF_PT_BINS, EFF_PT_MAX};

/// Splits jets into pass/fail pt histograms by a double threshold on the
/// c-tagging discriminants. The efficiency itself is `pass / (pass + fail)`
/// per bin, computed downstream.
#[derive(Debug, Clone)]
pub struct PtEfficiency {
    pass: Histogram,
    fail: Histogram,
    anti_b: f64,
    anti_u: f64,
}

impl PtEfficiency {
    /// Working point requiring `ln(pc/pb) > anti_b` and `ln(pc/pu) > anti_u`.
    pub fn new(anti_b: f32, anti_u: f32) -> Result<Self> {
        let pt = || {
            let axis = Axis::new("x", EFF_PT_BINS, 0.0, EFF_PT_MAX).units("MeV");
            Histogram::new(vec![axis], NanPolicy::Drop)
        };
        Ok(Self { pass: pt()?, fail: pt()?, anti_b: f64::from(anti_b), anti_u: f64::from(anti_u) })
    }

    /// True if `triple` passes the working point. Any NaN discriminant fails.
    pub fn passes(&self, triple: &TagTriple) -> bool {
        ctag_anti_light(triple) > self.anti_u && ctag_anti_bottom(triple) > self.anti_b
    }

    /// Add `pt` to the pass or fail histogram.
    pub fn fill(&mut self, pt: f64, triple: &TagTriple, weight: f64) -> Result<()> {
        if self.passes(triple) {
            self.pass.fill(&[pt], weight)
        } else {
            self.fail.fill(&[pt], weight)
        }
    }

    /// Jets passing.
    pub fn pass(&self) -> &Histogram {
        &self.pass
    }

    /// Jets failing.
    pub fn fail(&self) -> &Histogram {
        &self.fail
    }

    /// Write `pass` and `fail` into `group`.
    pub fn write_to(&self, group: &mut Group) -> Result<()> {
        self.pass.write_to(group, "pass")?;
        self.fail.write_to(group, "fail")
    }
}
