//! Durable metadata record writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use ecosynth_spec::RunMetadata;

use crate::error::PipelineError;

/// Writes one metadata record per run into the output root.
///
/// The record is written to a temporary file in the same directory and then
/// renamed into place, so a crashed or aborted write never leaves a partial
/// record observable.
pub struct MetadataWriter {
    out_root: PathBuf,
}

impl MetadataWriter {
    /// Creates a writer targeting `out_root`.
    pub fn new(out_root: impl Into<PathBuf>) -> Self {
        Self {
            out_root: out_root.into(),
        }
    }

    /// Writes the record, returning its final path.
    pub fn write(&self, metadata: &RunMetadata) -> Result<PathBuf, PipelineError> {
        let path = self.out_root.join(format!("{}.json", metadata.run_id));
        let json = metadata.to_json_pretty()?;

        let mut file = tempfile::Builder::new()
            .prefix(".metadata_")
            .tempfile_in(&self.out_root)
            .map_err(PipelineError::Persistence)?;
        file.write_all(json.as_bytes())
            .map_err(PipelineError::Persistence)?;
        file.persist(&path)
            .map_err(|err| PipelineError::Persistence(err.error))?;

        debug!(path = %path.display(), "metadata record written");
        Ok(path)
    }

    /// The output root this writer targets.
    pub fn out_root(&self) -> &Path {
        &self.out_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosynth_spec::{EnvironmentalSample, Instrument, KeyMode, Location, MusicParameters};
    use pretty_assertions::assert_eq;

    fn metadata(run_id: &str) -> RunMetadata {
        RunMetadata {
            run_id: run_id.to_string(),
            timestamp: "2026-08-29T12:00:00+00:00".to_string(),
            location: Location::new("Delhi", "India"),
            environment: EnvironmentalSample {
                temperature: 30.0,
                humidity: 50.0,
                wind_speed: 2.0,
                aqi: 90,
            },
            music_parameters: MusicParameters {
                key_mode: KeyMode::Major,
                tempo_bpm: 120,
                instrument: Instrument::Piano,
                density: 4,
            },
            symbolic_file: None,
            waveform_file: PathBuf::from("eco_test.wav"),
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MetadataWriter::new(dir.path());

        let record = metadata("eco_20260829_120000_test01");
        let path = writer.write(&record).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "eco_20260829_120000_test01.json"
        );
        let back = RunMetadata::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_no_stray_temp_files_left() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MetadataWriter::new(dir.path());
        writer.write(&metadata("eco_run")).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["eco_run.json"]);
    }
}
