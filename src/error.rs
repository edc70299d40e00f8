use thiserror::Error;

/// Everything that can end a run early.
///
/// Every variant is fatal. The only non-fatal condition, an alpha value outside `[0, 1]`, is not
/// an error and is reported as a warning instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the trajectory or writing an output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The run configuration is unusable. Raised before any trajectory line is read.
    #[error("invalid argument: {0}")]
    Argument(String),
    /// A header or atom line did not yield the expected tokens.
    #[error("parse error in frame {frame} (line {line}): {message}")]
    Parse {
        frame: u64,
        line: u64,
        message: String,
    },
    /// The structure of a frame disagrees with the configuration, or the input ended mid-frame.
    #[error("format error in frame {frame}: {message}")]
    Format { frame: u64, message: String },
    /// Not a single frame made it past the equilibration skip, so there is nothing to average.
    #[error("no frames counted: skipping {skip} frame(s) leaves nothing of the {frames} read")]
    NoFramesCounted { skip: u64, frames: u64 },
}

impl Error {
    /// The process exit code associated with this kind of error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Argument(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
