//! Average degree of ionization of a polyelectrolyte chain, from a LAMMPS dump.
//!
//! Counterions are counted as condensed against every bead they lie within the cutoff of
//! (non-exclusion counting).
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use condensate::condensation::Strategy;
use condensate::{analyze, Analysis, CoordinateMode, Error, Reporter, Result, Species};

fn cutoff_parser(cutoff: &str) -> std::result::Result<f64, String> {
    let cutoff = cutoff.parse::<f64>().map_err(|err| format!("{err}"))?;
    if cutoff > 0.0 {
        Ok(cutoff)
    } else {
        Err(format!("the cutoff must be a positive distance, found {cutoff}"))
    }
}

/// Compute the average degree of ionization of a polyelectrolyte chain from a LAMMPS dump.
///
/// Each frame of the dump consists of 9 header lines, followed by exactly one line per bead and
/// counterion (`id type x y z`, optionally followed by the image flags `ix iy iz`).
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input path (LAMMPS dump).
    #[arg(long)]
    trajectory: PathBuf,

    /// Cutoff distance for a counterion to be condensed onto a bead, in box units.
    #[arg(long, value_parser=cutoff_parser)]
    cutoff: f64,

    /// Number of leading frames to leave out of the statistic, as an equilibration period.
    ///
    /// Frames are counted from 1, and frames with an index below this value are skipped. Both 0
    /// and 1 include every frame.
    #[arg(long, default_value_t = 0)]
    skip: u64,

    /// Atom type of the beads (monomers) in the chain.
    #[arg(long)]
    bead_type: NonZeroU32,

    /// Number of beads in each frame.
    #[arg(long)]
    monomers: NonZeroUsize,

    /// Atom type of the counterions.
    #[arg(long)]
    ion_type: NonZeroU32,

    /// Number of counterions in each frame.
    #[arg(long)]
    ions: NonZeroUsize,

    /// Valency of the counterions.
    #[arg(long, default_value_t = 1)]
    valency: i32,

    /// How to interpret the coordinate columns.
    #[arg(long, value_enum, default_value_t)]
    coordinates: CoordinateMode,

    /// How to enumerate (bead, counterion) pairs. Both strategies give identical counts.
    ///
    /// The cell list is faster for large numbers of counterions.
    #[arg(long, value_enum, default_value_t)]
    strategy: Strategy,

    /// Output path for the final alpha value.
    #[arg(long, default_value = "nonexclusion.output")]
    output: PathBuf,

    /// Output path for the per-frame log.
    #[arg(long, default_value = "nonexclusion.logs")]
    log: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(args: Args) -> Result<()> {
    let analysis = Analysis {
        cutoff: args.cutoff,
        skip: args.skip,
        beads: Species::new(args.bead_type.get(), args.monomers.get()),
        ions: Species::new(args.ion_type.get(), args.ions.get()),
        valency: args.valency,
        mode: args.coordinates,
        strategy: args.strategy,
    };
    analysis.validate()?;

    let trajectory = File::open(&args.trajectory).map_err(|err| {
        Error::Argument(format!("cannot open {}: {err}", args.trajectory.display()))
    })?;
    log::info!("reading {}", args.trajectory.display());

    let log = BufWriter::new(File::create(&args.log)?);
    let mut reporter = Reporter::new(std::io::stdout().lock(), log);
    let summary = analyze(BufReader::new(trajectory), &analysis, &mut reporter)?;

    // Only now that there is a result, create the file to hold it.
    let mut output = BufWriter::new(File::create(&args.output)?);
    reporter.finish(summary.alpha, &mut output)?;
    Ok(())
}
