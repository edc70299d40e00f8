use std::io::{self, Write};

use crate::accumulator::is_physical;

/// Writes per-frame progress and the final result to its sinks.
///
/// The console sink receives everything. The log sink receives one line per counted frame. The
/// result sink is handed in only once the final value is known, so a failed run never produces a
/// result.
pub struct Reporter<C, L> {
    console: C,
    log: L,
}

impl<C: Write, L: Write> Reporter<C, L> {
    pub fn new(console: C, log: L) -> Self {
        Self { console, log }
    }

    /// Report the running average of condensed pairs after the frame with 1-based index `idx`.
    pub fn frame(&mut self, idx: u64, running_average: f64) -> io::Result<()> {
        let line = format!(
            "Timeframe: {idx}; Number of condensed ions (per timeframe): {running_average:.6}"
        );
        writeln!(self.console, "{line}")?;
        writeln!(self.log, "{line}")?;
        Ok(())
    }

    /// Report the final alpha value to the console and to `result`.
    ///
    /// An alpha outside `[0, 1]` is still reported, preceded by a warning on the console.
    pub fn finish<W: Write>(&mut self, alpha: f64, result: &mut W) -> io::Result<()> {
        if !is_physical(alpha) {
            log::warn!("alpha value {alpha} lies outside of [0, 1]");
            writeln!(
                self.console,
                "Warning: alpha value {alpha:.6} lies outside of [0, 1]"
            )?;
        }
        let line = format!("alpha value: {alpha:.6}");
        writeln!(self.console, "{line}")?;
        writeln!(result, "{line}")?;
        self.console.flush()?;
        self.log.flush()?;
        result.flush()
    }

    /// Flush the sinks and give them back.
    pub fn into_inner(mut self) -> io::Result<(C, L)> {
        self.console.flush()?;
        self.log.flush()?;
        Ok((self.console, self.log))
    }
}
