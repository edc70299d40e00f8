#![allow(dead_code)]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use condensate::condensation::Strategy;
use condensate::{analyze, Analysis, CoordinateMode, Reporter, Species, Summary};

pub mod trajectories {
    /// Two frames of a single bead and a single counterion in a 10×10×10 box.
    pub const TWO: &str = "tests/trajectories/two_frames.lammpstrj";
    /// [`TWO`], with absolute coordinates instead of fractional ones.
    pub const TWO_ABSOLUTE: &str = "tests/trajectories/two_frames_absolute.lammpstrj";
    /// [`TWO`], missing the very last atom line.
    pub const TRUNCATED: &str = "tests/trajectories/truncated.lammpstrj";
    /// Three frames of a 4-bead chain and 3 counterions with image flags, in a 20×20×20 box.
    pub const CHAIN: &str = "tests/trajectories/chain.lammpstrj";
    /// [`TWO`], with a trailing charge column on every atom line.
    pub const EXTRA_COLUMNS: &str = "tests/trajectories/extra_columns.lammpstrj";
}

/// The configuration belonging to [`trajectories::TWO`].
pub fn two_frames() -> Analysis {
    Analysis {
        cutoff: 2.0,
        skip: 0,
        beads: Species::new(1, 1),
        ions: Species::new(2, 1),
        valency: 1,
        mode: CoordinateMode::Scaled,
        strategy: Strategy::BruteForce,
    }
}

/// The configuration belonging to [`trajectories::CHAIN`].
pub fn chain() -> Analysis {
    Analysis {
        cutoff: 2.5,
        skip: 0,
        beads: Species::new(1, 4),
        ions: Species::new(2, 3),
        valency: 1,
        mode: CoordinateMode::Scaled,
        strategy: Strategy::BruteForce,
    }
}

/// Everything a run produced.
pub struct Outcome {
    pub summary: Summary,
    pub console: String,
    pub log: String,
    pub result: String,
}

/// Run a complete analysis on the trajectory at `path`, capturing all output in memory.
pub fn run(path: impl AsRef<Path>, analysis: &Analysis) -> condensate::Result<Outcome> {
    let file = BufReader::new(File::open(path)?);
    let mut reporter = Reporter::new(Vec::new(), Vec::new());
    let summary = analyze(file, analysis, &mut reporter)?;
    let mut result = Vec::new();
    reporter.finish(summary.alpha, &mut result)?;
    let (console, log) = reporter.into_inner()?;
    Ok(Outcome {
        summary,
        console: String::from_utf8(console).expect("console output is utf-8"),
        log: String::from_utf8(log).expect("log output is utf-8"),
        result: String::from_utf8(result).expect("result output is utf-8"),
    })
}
