//! Error types for the waveform renderer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a score to a waveform.
#[derive(Debug, Error)]
pub enum RenderError {
    /// FluidSynth executable not found.
    #[error("FluidSynth executable not found. Ensure FluidSynth is installed and in PATH, or set the FLUIDSYNTH_PATH environment variable")]
    SynthNotFound,

    /// An input file (score or soundfont) is missing.
    #[error("input file not found: {path}")]
    MissingInput { path: PathBuf },

    /// Failed to spawn the FluidSynth process.
    #[error("failed to spawn FluidSynth: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// The FluidSynth process timed out.
    #[error("FluidSynth timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The FluidSynth process exited with a non-zero status.
    #[error("FluidSynth exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// Rendering finished but produced no usable output file.
    #[error("FluidSynth produced no output at {path}")]
    EmptyOutput { path: PathBuf },

    /// The render was cancelled by the caller.
    #[error("render cancelled")]
    Cancelled,

    /// I/O error during rendering.
    #[error("I/O error during rendering: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Creates a `ProcessFailed` error, trimming the captured stderr to a
    /// digestible tail.
    pub fn process_failed(exit_code: i32, stderr: String) -> Self {
        const MAX_STDERR: usize = 1000;
        let stderr = if stderr.len() > MAX_STDERR {
            let mut tail_start = stderr.len() - MAX_STDERR;
            while !stderr.is_char_boundary(tail_start) {
                tail_start += 1;
            }
            format!("...{}", &stderr[tail_start..])
        } else {
            stderr
        };
        RenderError::ProcessFailed {
            exit_code,
            stderr: stderr.trim().to_string(),
        }
    }
}
