//! The durable per-run metadata record.
//!
//! Written exactly once per run, after the waveform artifact exists on
//! durable storage. One run produces at most one record.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::params::MusicParameters;
use crate::sample::{EnvironmentalSample, Location};

/// Durable projection of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// The run's unique identifier.
    pub run_id: String,
    /// RFC 3339 timestamp of the run start.
    pub timestamp: String,
    /// The location the environmental data was fetched for.
    pub location: Location,
    /// The environmental sample the run was derived from.
    pub environment: EnvironmentalSample,
    /// The musical parameters derived from the sample.
    pub music_parameters: MusicParameters,
    /// Path to the symbolic score, present only on the symbolic path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbolic_file: Option<PathBuf>,
    /// Path to the waveform artifact.
    pub waveform_file: PathBuf,
}

impl RunMetadata {
    /// Serializes the record to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the record to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a record from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
