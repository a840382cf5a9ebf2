use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the pitching pipeline.
///
/// Every variant is fatal: the run stops on the first one and no output
/// file is written.
#[derive(Error, Debug)]
pub enum PitchError {
    #[error("karaoke file not found: {}", .0.display())]
    ChartNotFound(PathBuf),

    #[error("audio file not found: {}", .0.display())]
    AudioNotFound(PathBuf),

    #[error("failed to read karaoke file {}: {source}", path.display())]
    ChartRead { path: PathBuf, source: io::Error },

    #[error("failed to read audio file {}: {source}", path.display())]
    AudioRead {
        path: PathBuf,
        source: hound::Error,
    },

    /// A chart line tokenized to an unexpected shape.
    #[error("invalid chart line '{line}': {reason}")]
    Format { line: String, reason: String },

    #[error("no #{0}-tag found in chart header")]
    MissingTag(&'static str),

    #[error("failed to set up resampler: {0}")]
    ResamplerConstruction(#[from] rubato::ResamplerConstructionError),

    #[error("failed to resample audio: {0}")]
    Resample(#[from] rubato::ResampleError),

    #[error("pitch model failure: {0}")]
    Inference(#[from] ort::Error),

    #[error("unexpected pitch model output: {0}")]
    ModelOutput(String),

    #[error("failed to write pitched chart {}: {source}", path.display())]
    ChartWrite { path: PathBuf, source: io::Error },
}

impl PitchError {
    pub fn format(line: &str, reason: impl Into<String>) -> Self {
        PitchError::Format {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
