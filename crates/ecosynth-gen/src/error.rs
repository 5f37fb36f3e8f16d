//! Error types for the generative audio service.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur during audio generation.
#[derive(Debug, Error)]
pub enum GenError {
    /// The service handle was used before `init()`.
    #[error("generation service has not been initialized")]
    NotInitialized,

    /// The inference request failed.
    #[error("generation request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The inference call exceeded its bounded timeout.
    #[error("generation timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The service answered with a non-success status.
    #[error("generation service returned HTTP status {status}")]
    BadStatus { status: u16 },

    /// The service returned no audio samples.
    #[error("generation service returned no audio samples")]
    EmptyOutput,

    /// Building the HTTP client failed.
    #[error("failed to initialize generation service: {0}")]
    InitFailed(#[source] reqwest::Error),

    /// Writing the waveform file failed.
    #[error("failed to write waveform {path}: {source}")]
    WriteWav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
}
