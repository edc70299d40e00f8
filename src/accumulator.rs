use crate::error::{Error, Result};
use crate::selection::FrameSelection;

/// Gathers the per-frame condensed counts into the average degree of ionization.
///
/// The accumulator is an ordinary value. Each trajectory gets its own, so several trajectories
/// can be analysed in a single process without their statistics mixing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IonizationAccumulator {
    frames: FrameSelection,
    /// Sum of the condensed counts of all included frames.
    total_condensed: u64,
    /// Number of included frames.
    frames_counted: u64,
    /// Number of frames observed, included or not.
    frames_seen: u64,
}

impl IonizationAccumulator {
    pub fn new(frames: FrameSelection) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    /// Record the condensed count of the frame with 1-based index `idx`.
    ///
    /// If the frame is past the equilibration skip, returns the running average of condensed
    /// counts per included frame. Returns [`None`] for skipped frames.
    pub fn observe(&mut self, idx: u64, condensed: u64) -> Option<f64> {
        self.frames_seen = self.frames_seen.max(idx);
        if !self.frames.is_included(idx) {
            return None;
        }
        self.total_condensed += condensed;
        self.frames_counted += 1;
        self.running_average()
    }

    /// The average number of condensed pairs per included frame so far.
    pub fn running_average(&self) -> Option<f64> {
        match self.frames_counted {
            0 => None,
            n => Some(self.total_condensed as f64 / n as f64),
        }
    }

    pub fn total_condensed(&self) -> u64 {
        self.total_condensed
    }

    pub fn frames_counted(&self) -> u64 {
        self.frames_counted
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Compute the degree of ionization,
    ///
    /// ```text
    /// alpha = (nmonomers - valency * total_condensed) / frames_counted / nmonomers
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFramesCounted`] if not a single frame was included.
    pub fn alpha(&self, nmonomers: usize, valency: i32) -> Result<f64> {
        if self.frames_counted == 0 {
            return Err(Error::NoFramesCounted {
                skip: self.frames.skip,
                frames: self.frames_seen,
            });
        }
        let nmonomers = nmonomers as f64;
        let neutralized = valency as f64 * self.total_condensed as f64;
        Ok((nmonomers - neutralized) / self.frames_counted as f64 / nmonomers)
    }
}

/// Whether an alpha value lies in the physically meaningful range `[0, 1]`.
pub fn is_physical(alpha: f64) -> bool {
    (0.0..=1.0).contains(&alpha)
}
