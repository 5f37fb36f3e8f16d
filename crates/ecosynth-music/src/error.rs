//! Error types for score generation and MIDI writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the symbolic score path.
#[derive(Debug, Error)]
pub enum MusicError {
    /// MIDI serialization failed.
    #[error("failed to encode MIDI data: {0}")]
    MidiEncode(#[source] std::io::Error),

    /// Writing the score file failed.
    #[error("failed to write score file {path}: {source}")]
    WriteScore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
