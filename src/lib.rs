//! Average degree of ionization of a polyelectrolyte chain, from a LAMMPS-style dump.
//!
//! The trajectory is read one frame at a time with a [`DumpReader`]. For each [`Frame`], the
//! number of (bead, counterion) pairs within a cutoff is counted by [`condensation::count`], and
//! the counts are gathered by an [`IonizationAccumulator`] into the final alpha value.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::DVec3;

use crate::buffer::LineBuffer;
use crate::reader::{parse_atom, parse_bounds, parse_natoms, parse_timestep, Framer, LineRole};

pub use crate::accumulator::IonizationAccumulator;
pub use crate::analysis::{analyze, Summary};
pub use crate::config::Analysis;
pub use crate::coords::{CoordinateMode, SimulationBox};
pub use crate::error::{Error, Result};
pub use crate::report::Reporter;
pub use crate::selection::{AtomClass, AtomSelection, FrameSelection, Species};

pub mod accumulator;
pub mod analysis;
pub mod buffer;
pub mod condensation;
pub mod config;
pub mod coords;
mod error;
pub mod reader;
pub mod report;
pub mod selection;

/// The bead and counterion positions of a single timestep.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frame {
    /// The timestep from the frame header, if it holds one.
    pub timestep: Option<u64>,
    pub boxvec: SimulationBox,
    /// Cartesian bead positions, in the order in which they appear in the dump.
    pub beads: Vec<DVec3>,
    /// Cartesian counterion positions, in the order in which they appear in the dump.
    pub ions: Vec<DVec3>,
}

impl Frame {
    fn clear(&mut self) {
        self.timestep = None;
        self.boxvec = SimulationBox::default();
        self.beads.clear();
        self.ions.clear();
    }
}

/// A streaming reader for the frames of a text dump.
///
/// Frames can only be read front to back, once.
pub struct DumpReader<R> {
    lines: LineBuffer<R>,
    framer: Framer,
    selection: AtomSelection,
    mode: CoordinateMode,
    /// The number of frames read so far.
    nframes: u64,
    /// Set after the first error, so iteration stops there.
    failed: bool,
}

impl DumpReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(
        path: P,
        selection: AtomSelection,
        mode: CoordinateMode,
    ) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), selection, mode))
    }
}

impl<R: BufRead> DumpReader<R> {
    pub fn new(reader: R, selection: AtomSelection, mode: CoordinateMode) -> Self {
        Self {
            lines: LineBuffer::new(reader),
            framer: Framer::new(selection.natoms()),
            selection,
            mode,
            nframes: 0,
            failed: false,
        }
    }

    /// The number of frames that have been read completely.
    pub fn nframes(&self) -> u64 {
        self.nframes
    }

    /// Reads the next frame into `frame`, reusing its allocations.
    ///
    /// Returns `Ok(false)` once the end of the stream is reached cleanly, between two frames. If
    /// the stream ends in the middle of a frame, a [`Error::Format`] is returned and the contents
    /// of `frame` should not be depended upon.
    pub fn read_frame(&mut self, frame: &mut Frame) -> Result<bool> {
        frame.clear();
        // The frame that is being read, 1-based, for error reporting.
        let index = self.nframes + 1;
        let mut lo = DVec3::ZERO;
        let mut hi = DVec3::ZERO;

        loop {
            let (line_number, line) = match self.lines.next_line()? {
                Some(numbered) => numbered,
                None if self.framer.is_mid_frame() => {
                    return Err(Error::Format {
                        frame: index,
                        message: format!(
                            "input ended in the middle of a frame ({:?})",
                            self.framer.state()
                        ),
                    })
                }
                None => return Ok(false),
            };
            // Blank lines in between frames, typically trailing ones, are not a frame.
            if !self.framer.is_mid_frame() && line.trim().is_empty() {
                continue;
            }

            let parse_error = |message| Error::Parse {
                frame: index,
                line: line_number,
                message,
            };
            match self.framer.advance() {
                LineRole::Label => {}
                LineRole::Timestep => frame.timestep = parse_timestep(line),
                LineRole::AtomCount => {
                    let expected = self.selection.natoms();
                    match parse_natoms(line) {
                        Some(natoms) if natoms != expected => {
                            return Err(Error::Format {
                                frame: index,
                                message: format!(
                                    "header declares {natoms} atoms, but {expected} are expected \
                                     ({} beads and {} counterions)",
                                    self.selection.beads.count, self.selection.ions.count
                                ),
                            })
                        }
                        _ => {}
                    }
                }
                LineRole::Bounds(axis) => {
                    let (axis_lo, axis_hi) = parse_bounds(line).map_err(parse_error)?;
                    if !(axis_hi > axis_lo) {
                        return Err(Error::Format {
                            frame: index,
                            message: format!(
                                "degenerate box along axis {}: lo {axis_lo} is not below hi {axis_hi}",
                                ["x", "y", "z"][axis]
                            ),
                        });
                    }
                    lo[axis] = axis_lo;
                    hi[axis] = axis_hi;
                    frame.boxvec = SimulationBox::new(lo, hi);
                }
                LineRole::Atom(_) => {
                    let atom = parse_atom(line).map_err(parse_error)?;
                    // Atoms of other types, and atoms in excess of what is expected for their
                    // class, are ignored.
                    if let Some(class) = self.selection.classify(atom.atom_type) {
                        let positions = match class {
                            AtomClass::Bead => &mut frame.beads,
                            AtomClass::CounterIon => &mut frame.ions,
                        };
                        if positions.len() < self.selection.expected(class) {
                            let position =
                                frame.boxvec.position(self.mode, atom.coords, atom.image);
                            positions.push(position);
                        }
                    }
                }
            }

            if !self.framer.is_mid_frame() {
                break;
            }
        }

        self.nframes = index;
        self.check_counts(frame)?;
        Ok(true)
    }

    /// Verify that a completed frame holds exactly the expected number of beads and counterions.
    fn check_counts(&self, frame: &Frame) -> Result<()> {
        let found = [
            (AtomClass::Bead, frame.beads.len()),
            (AtomClass::CounterIon, frame.ions.len()),
        ];
        for (class, n) in found {
            let expected = self.selection.expected(class);
            if n != expected {
                return Err(Error::Format {
                    frame: self.nframes,
                    message: format!(
                        "found {n} atoms of the {class:?} type (type {}), but {expected} are expected",
                        match class {
                            AtomClass::Bead => self.selection.beads.atom_type,
                            AtomClass::CounterIon => self.selection.ions.atom_type,
                        }
                    ),
                });
            }
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for DumpReader<R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mut frame = Frame::default();
        match self.read_frame(&mut frame) {
            Ok(true) => Some(Ok(frame)),
            Ok(false) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
