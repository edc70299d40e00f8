use std::io::{BufRead, Write};

use crate::accumulator::IonizationAccumulator;
use crate::condensation;
use crate::config::Analysis;
use crate::error::Result;
use crate::report::Reporter;
use crate::{DumpReader, Frame};

/// The outcome of a complete pass over a trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of frames read.
    pub frames: u64,
    /// Number of frames that took part in the statistic.
    pub frames_counted: u64,
    /// Sum of the condensed pair counts over the counted frames.
    pub total_condensed: u64,
    pub alpha: f64,
}

/// Run the analysis over a trajectory in a single pass.
///
/// The running average is reported after every counted frame. The final alpha is returned, and
/// left to the caller to hand to [`Reporter::finish`] together with a result sink.
///
/// # Errors
///
/// Any error aborts the pass. In particular, no alpha is computed when a frame is malformed or
/// when the equilibration skip leaves no frames to count.
pub fn analyze<R, C, L>(
    reader: R,
    analysis: &Analysis,
    reporter: &mut Reporter<C, L>,
) -> Result<Summary>
where
    R: BufRead,
    C: Write,
    L: Write,
{
    analysis.validate()?;
    if analysis.valency < 1 {
        log::warn!(
            "counterion valency {} is below 1, alpha will not be meaningful",
            analysis.valency
        );
    }

    let mut reader = DumpReader::new(reader, analysis.atom_selection(), analysis.mode);
    let mut accumulator = IonizationAccumulator::new(analysis.frame_selection());
    let mut frame = Frame::default();
    while reader.read_frame(&mut frame)? {
        let idx = reader.nframes();
        let condensed = condensation::count(&frame, analysis.cutoff, analysis.strategy);
        log::debug!(
            "frame {idx} (timestep {:?}): {condensed} condensed pairs",
            frame.timestep
        );
        if let Some(running_average) = accumulator.observe(idx, condensed) {
            reporter.frame(idx, running_average)?;
        }
    }

    let alpha = accumulator.alpha(analysis.beads.count, analysis.valency)?;
    log::info!(
        "read {} frames, counted {}, {} condensed pairs in total",
        reader.nframes(),
        accumulator.frames_counted(),
        accumulator.total_condensed()
    );
    Ok(Summary {
        frames: reader.nframes(),
        frames_counted: accumulator.frames_counted(),
        total_condensed: accumulator.total_condensed(),
        alpha,
    })
}
