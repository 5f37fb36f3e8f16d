//! Run identity, state machine states, and the live run record.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::params::MusicParameters;
use crate::prompt::GenerationPrompt;
use crate::sample::EnvironmentalSample;

/// Length of the random suffix appended to the timestamp portion of a run id.
const RUN_ID_SUFFIX_LEN: usize = 6;

/// Opaque identifier for a single pipeline run.
///
/// Derived from the wall-clock timestamp at run start plus a random
/// alphanumeric suffix, so runs started within the same clock second still
/// get distinct artifact names without any cross-run locking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Generates a fresh run id from the current wall-clock time.
    pub fn generate() -> Self {
        Self::from_time(Utc::now())
    }

    /// Generates a run id for an explicit timestamp.
    pub fn from_time(time: DateTime<Utc>) -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RUN_ID_SUFFIX_LEN)
            .map(char::from)
            .collect();
        RunId(format!(
            "eco_{}_{}",
            time.format("%Y%m%d_%H%M%S"),
            suffix.to_lowercase()
        ))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename for the run's symbolic score artifact.
    pub fn score_filename(&self) -> String {
        format!("{}.mid", self.0)
    }

    /// Filename for the run's waveform artifact.
    pub fn waveform_filename(&self) -> String {
        format!("{}.wav", self.0)
    }

    /// Filename for the run's metadata record.
    pub fn metadata_filename(&self) -> String {
        format!("{}.json", self.0)
    }

    /// Derives a deterministic RNG seed from this id (FNV-1a over the id
    /// bytes), so a run's symbolic score can be reproduced from its record.
    pub fn seed(&self) -> u64 {
        self.0.bytes().fold(0xcbf2_9ce4_8422_2325u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// States of the per-run pipeline state machine.
///
/// A run moves strictly forward through `Init` to `Done`; `Aborted` is
/// reachable from the fetching, generating, and rendering stages. The
/// rendering stage only occurs on the symbolic generation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Init,
    Fetching,
    Mapping,
    Generating,
    Rendering,
    Persisting,
    Done,
    Aborted,
}

impl RunState {
    /// Returns the string identifier for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Init => "init",
            RunState::Fetching => "fetching",
            RunState::Mapping => "mapping",
            RunState::Generating => "generating",
            RunState::Rendering => "rendering",
            RunState::Persisting => "persisting",
            RunState::Done => "done",
            RunState::Aborted => "aborted",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The live record of one pipeline run.
///
/// Created at orchestration start and mutated only by the orchestrator as
/// stages complete; never shared across runs.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub id: RunId,
    pub state: RunState,
    pub created_at: DateTime<Utc>,
    pub sample: Option<EnvironmentalSample>,
    pub parameters: Option<MusicParameters>,
    pub prompt: Option<GenerationPrompt>,
    pub symbolic_path: Option<PathBuf>,
    pub waveform_path: Option<PathBuf>,
}

impl PipelineRun {
    /// Creates a new run in the `Init` state.
    pub fn new(id: RunId) -> Self {
        Self {
            id,
            state: RunState::Init,
            created_at: Utc::now(),
            sample: None,
            parameters: None,
            prompt: None,
            symbolic_path: None,
            waveform_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_shape() {
        let id = RunId::generate();
        assert!(id.as_str().starts_with("eco_"));
        // eco_YYYYMMDD_HHMMSS_xxxxxx
        assert_eq!(id.as_str().len(), "eco_".len() + 15 + 1 + RUN_ID_SUFFIX_LEN);
    }

    #[test]
    fn test_run_ids_distinct_within_same_tick() {
        let now = Utc::now();
        let a = RunId::from_time(now);
        let b = RunId::from_time(now);
        assert_ne!(a, b, "same-second runs must get distinct ids");
        assert_ne!(a.waveform_filename(), b.waveform_filename());
    }

    #[test]
    fn test_artifact_filenames() {
        let id = RunId::generate();
        assert_eq!(id.score_filename(), format!("{}.mid", id.as_str()));
        assert_eq!(id.waveform_filename(), format!("{}.wav", id.as_str()));
        assert_eq!(id.metadata_filename(), format!("{}.json", id.as_str()));
    }

    #[test]
    fn test_seed_is_stable_per_id() {
        let id = RunId::generate();
        assert_eq!(id.seed(), id.seed());

        let other = RunId::generate();
        assert_ne!(id.seed(), other.seed());
    }

    #[test]
    fn test_new_run_starts_in_init() {
        let run = PipelineRun::new(RunId::generate());
        assert_eq!(run.state, RunState::Init);
        assert!(run.sample.is_none());
        assert!(run.waveform_path.is_none());
    }
}
