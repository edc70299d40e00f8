/// The two classes of atoms the analysis cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomClass {
    /// A monomer site on the chain.
    Bead,
    /// A mobile counterion.
    CounterIon,
}

/// An atom type together with the number of atoms of that type expected in every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Species {
    pub atom_type: u32,
    pub count: usize,
}

impl Species {
    pub fn new(atom_type: u32, count: usize) -> Self {
        Self { atom_type, count }
    }
}

// Invariant: `beads.atom_type != ions.atom_type`. If both were the same, every atom of that type
// would classify as a bead and the ion sequence could never fill up. `Analysis::validate` rejects
// such a configuration before a selection is ever used.
/// A selection of the atoms in a frame, by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomSelection {
    pub beads: Species,
    pub ions: Species,
}

impl AtomSelection {
    pub fn new(beads: Species, ions: Species) -> Self {
        Self { beads, ions }
    }

    /// Determine which class an atom of type `atom_type` belongs to.
    ///
    /// Will return [`None`] for atom types that are not part of this [`AtomSelection`].
    pub fn classify(&self, atom_type: u32) -> Option<AtomClass> {
        if atom_type == self.beads.atom_type {
            Some(AtomClass::Bead)
        } else if atom_type == self.ions.atom_type {
            Some(AtomClass::CounterIon)
        } else {
            None
        }
    }

    /// The number of atoms of some class expected per frame.
    pub fn expected(&self, class: AtomClass) -> usize {
        match class {
            AtomClass::Bead => self.beads.count,
            AtomClass::CounterIon => self.ions.count,
        }
    }

    /// The number of atom lines in a frame.
    pub fn natoms(&self) -> usize {
        self.beads.count + self.ions.count
    }
}

/// A selection of frames that take part in the statistic.
///
/// Frame indices are 1-based. A frame is included once its index reaches the `skip` threshold,
/// so a threshold of 0 or 1 includes every frame, and a threshold of 3 leaves out the first two.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameSelection {
    pub skip: u64,
}

impl FrameSelection {
    pub fn new(skip: u64) -> Self {
        Self { skip }
    }

    /// Determine whether the frame with 1-based index `idx` is included in this [`FrameSelection`].
    pub fn is_included(&self, idx: u64) -> bool {
        idx >= self.skip
    }
}
