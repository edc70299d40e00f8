//! Counting of condensed (bead, counterion) pairs.
//!
//! A pair is condensed when the distance between the bead and the counterion is at most the
//! cutoff. Counting is non-exclusive: a counterion close to three beads counts three times.
//! Distances are taken as they are, without any periodic wrapping.
use std::collections::HashMap;

use glam::{DVec3, I64Vec3};

use crate::Frame;

/// The way pairs are enumerated. Both produce exactly the same counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Check every (bead, counterion) pair.
    #[default]
    BruteForce,
    /// Bin the counterions into cells the size of the cutoff, and only check neighbouring cells.
    CellList,
}

/// Count the condensed pairs of a frame.
pub fn count(frame: &Frame, cutoff: f64, strategy: Strategy) -> u64 {
    match strategy {
        Strategy::BruteForce => count_pairs(&frame.beads, &frame.ions, cutoff),
        Strategy::CellList => count_pairs_cells(&frame.beads, &frame.ions, cutoff),
    }
}

/// Whether a pair at squared distance `d2` lies within `cutoff`.
///
/// Both strategies must decide through this one function for their counts to agree exactly.
#[inline]
fn within(d2: f64, cutoff: f64) -> bool {
    d2 <= cutoff * cutoff
}

/// Count the pairs within `cutoff` by checking all of them.
pub fn count_pairs(beads: &[DVec3], ions: &[DVec3], cutoff: f64) -> u64 {
    let mut n = 0;
    for bead in beads {
        for ion in ions {
            if within(bead.distance_squared(*ion), cutoff) {
                n += 1;
            }
        }
    }
    n
}

/// Count the pairs within `cutoff` using a cell list over the counterions.
///
/// Falls back to [`count_pairs`] when the cutoff does not make for a sensible grid: a zero or
/// non-finite cutoff, or one that is tiny compared to the spread of the positions.
pub fn count_pairs_cells(beads: &[DVec3], ions: &[DVec3], cutoff: f64) -> u64 {
    match CellList::new(ions, cutoff) {
        Some(cells) => beads.iter().map(|&bead| cells.count_within(bead)).sum(),
        None => count_pairs(beads, ions, cutoff),
    }
}

/// A grid of cubic cells with an edge length of the cutoff, holding the indices of the positions
/// that fall within each of them.
///
/// Any position within the cutoff of some point lies in the cell of that point or in one of its
/// 26 neighbours.
pub struct CellList<'p> {
    positions: &'p [DVec3],
    origin: DVec3,
    cutoff: f64,
    cells: HashMap<I64Vec3, Vec<usize>>,
}

impl<'p> CellList<'p> {
    /// The largest number of cells allowed along a single axis.
    pub const MAX_CELLS_PER_AXIS: f64 = (1u64 << 20) as f64;

    /// Bin `positions` into cells of edge `cutoff`.
    ///
    /// Returns [`None`] if the cutoff is not a positive finite number, if any position is not
    /// finite, or if the grid would exceed [`Self::MAX_CELLS_PER_AXIS`] along some axis.
    pub fn new(positions: &'p [DVec3], cutoff: f64) -> Option<Self> {
        if !(cutoff.is_finite() && cutoff > 0.0) {
            return None;
        }
        if !positions.iter().all(|p| p.is_finite()) {
            return None;
        }
        let origin = positions.iter().copied().reduce(DVec3::min)?;
        let extent = positions.iter().copied().reduce(DVec3::max)? - origin;
        if extent.max_element() / cutoff >= Self::MAX_CELLS_PER_AXIS {
            return None;
        }

        let mut list = Self {
            positions,
            origin,
            cutoff,
            cells: HashMap::new(),
        };
        for (idx, &pos) in positions.iter().enumerate() {
            let key = list.cell_index(pos);
            list.cells.entry(key).or_default().push(idx);
        }
        Some(list)
    }

    fn cell_index(&self, pos: DVec3) -> I64Vec3 {
        ((pos - self.origin) / self.cutoff).floor().as_i64vec3()
    }

    /// Call `f` with the index of every position in the cell of `pos` and its neighbours.
    pub fn for_each_neighbor<F>(&self, pos: DVec3, mut f: F)
    where
        F: FnMut(usize),
    {
        // A bead far outside the grid has no neighbouring cells. Bail out before the cell index
        // saturates and wraps around.
        let reach = (pos - self.origin) / self.cutoff;
        if !reach.is_finite() || reach.abs().max_element() > 2.0 * Self::MAX_CELLS_PER_AXIS {
            return;
        }

        let center = self.cell_index(pos);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = center + I64Vec3::new(dx, dy, dz);
                    if let Some(indices) = self.cells.get(&key) {
                        indices.iter().for_each(|&idx| f(idx));
                    }
                }
            }
        }
    }

    /// Count the positions within the cutoff of `pos`.
    pub fn count_within(&self, pos: DVec3) -> u64 {
        let mut n = 0;
        self.for_each_neighbor(pos, |idx| {
            if within(pos.distance_squared(self.positions[idx]), self.cutoff) {
                n += 1;
            }
        });
        n
    }
}
