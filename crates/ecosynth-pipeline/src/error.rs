//! Stage-tagged pipeline errors.

use thiserror::Error;

use ecosynth_env::EnvError;
use ecosynth_gen::GenError;
use ecosynth_music::MusicError;
use ecosynth_render::RenderError;
use ecosynth_spec::RunState;

/// A run-aborting failure, tagged with the stage it originated in.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The mandatory weather reading was unavailable after retries.
    #[error("environment fetch failed: {0}")]
    Fetch(#[from] EnvError),

    /// The generative service failed or produced empty output.
    #[error("audio generation failed: {0}")]
    Generation(#[from] GenError),

    /// Writing the symbolic score failed.
    #[error("score generation failed: {0}")]
    Score(#[from] MusicError),

    /// The external renderer failed, timed out, or produced no output.
    #[error("waveform rendering failed: {0}")]
    Render(#[from] RenderError),

    /// A durable write failed.
    #[error("failed to persist run artifacts: {0}")]
    Persistence(#[source] std::io::Error),

    /// Serializing the metadata record failed.
    #[error("failed to serialize run metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// The caller cancelled the run.
    #[error("run cancelled during {stage}")]
    Cancelled { stage: RunState },
}

impl PipelineError {
    /// The stage this error aborted the run in.
    pub fn stage(&self) -> RunState {
        match self {
            PipelineError::Fetch(_) => RunState::Fetching,
            PipelineError::Generation(_) | PipelineError::Score(_) => RunState::Generating,
            PipelineError::Render(_) => RunState::Rendering,
            PipelineError::Persistence(_) | PipelineError::Metadata(_) => RunState::Persisting,
            PipelineError::Cancelled { stage } => *stage,
        }
    }
}
