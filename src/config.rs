use crate::condensation::Strategy;
use crate::coords::CoordinateMode;
use crate::error::{Error, Result};
use crate::selection::{AtomSelection, FrameSelection, Species};

/// Everything that determines the outcome of an analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Pairs at most this far apart are condensed.
    pub cutoff: f64,
    /// Frames with a 1-based index below this value are left out of the statistic.
    pub skip: u64,
    pub beads: Species,
    pub ions: Species,
    pub valency: i32,
    pub mode: CoordinateMode,
    pub strategy: Strategy,
}

impl Analysis {
    /// Check that this configuration makes sense before any trajectory is touched.
    pub fn validate(&self) -> Result<()> {
        if self.cutoff.is_nan() || self.cutoff < 0.0 {
            return Err(Error::Argument(format!(
                "the cutoff must be a non-negative distance, found {}",
                self.cutoff
            )));
        }
        for (name, species) in [("bead", self.beads), ("counterion", self.ions)] {
            if species.atom_type == 0 {
                return Err(Error::Argument(format!("the {name} atom type must be positive")));
            }
            if species.count == 0 {
                return Err(Error::Argument(format!("the {name} count must be positive")));
            }
        }
        if self.beads.atom_type == self.ions.atom_type {
            return Err(Error::Argument(format!(
                "beads and counterions cannot share atom type {}",
                self.beads.atom_type
            )));
        }
        Ok(())
    }

    pub fn atom_selection(&self) -> AtomSelection {
        AtomSelection::new(self.beads, self.ions)
    }

    pub fn frame_selection(&self) -> FrameSelection {
        FrameSelection::new(self.skip)
    }
}
