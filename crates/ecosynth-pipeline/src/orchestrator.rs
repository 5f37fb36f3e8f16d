//! The run state machine.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use ecosynth_env::{assemble_sample, EnvironmentClient};
use ecosynth_gen::{wav, AudioGenerator};
use ecosynth_music::{compose_prompt, generate_score, map_sample, write_midi, DEFAULT_BARS};
use ecosynth_render::{RenderError, WaveformRenderer};
use ecosynth_spec::{
    CancelToken, EnvironmentalSample, Location, MusicParameters, PipelineRun, RunId, RunMetadata,
    RunState,
};

use crate::error::PipelineError;
use crate::metadata::MetadataWriter;

/// Which of the two generation paths a run takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPath {
    /// Derive parameters, generate a symbolic score, render it externally.
    Symbolic,
    /// Compose a prompt and hand it to the generative inference service.
    Prompt,
}

impl GenerationPath {
    /// Returns the string identifier for this path.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationPath::Symbolic => "symbolic",
            GenerationPath::Prompt => "prompt",
        }
    }
}

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Directory that receives the waveform, score, and metadata files.
    pub out_root: PathBuf,
    /// Generation path for every run of this orchestrator.
    pub path: GenerationPath,
    /// Requested clip length in seconds (prompt path).
    pub duration_secs: u32,
    /// Number of bars in the generated score (symbolic path).
    pub bars: u32,
    /// Explicit score seed; defaults to a seed derived from the run id.
    pub seed: Option<u64>,
}

impl OrchestratorConfig {
    /// Creates a config for the given output root and path.
    pub fn new(out_root: impl Into<PathBuf>, path: GenerationPath) -> Self {
        Self {
            out_root: out_root.into(),
            path,
            duration_secs: 15,
            bars: DEFAULT_BARS,
            seed: None,
        }
    }
}

/// Sequences one run through fetching, mapping, generating, rendering, and
/// persisting. Collaborators are injected; the orchestrator owns only the
/// policy: what is mandatory, what degrades, and what aborts.
pub struct Orchestrator<'a> {
    env: &'a dyn EnvironmentClient,
    generator: &'a dyn AudioGenerator,
    renderer: &'a dyn WaveformRenderer,
    config: OrchestratorConfig,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator over the given collaborators.
    pub fn new(
        env: &'a dyn EnvironmentClient,
        generator: &'a dyn AudioGenerator,
        renderer: &'a dyn WaveformRenderer,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            env,
            generator,
            renderer,
            config,
        }
    }

    /// Executes one pipeline run for `location`.
    ///
    /// On success the returned metadata references artifacts that are fully
    /// persisted; on failure no artifact or record of this run is visible
    /// under the output root.
    pub fn run_pipeline(
        &self,
        location: &Location,
        cancel: &CancelToken,
    ) -> Result<RunMetadata, PipelineError> {
        let mut run = PipelineRun::new(RunId::generate());
        info!(
            run_id = %run.id,
            location = %location.label(),
            path = self.config.path.as_str(),
            "starting pipeline run"
        );

        // FETCHING: weather is mandatory, AQI degrades to the sentinel.
        run.state = RunState::Fetching;
        self.check_cancel(&run, cancel)?;
        let weather = self.env.fetch_weather(location)?;
        let aqi = self.env.fetch_aqi(location);
        if aqi.is_none() {
            warn!(run_id = %run.id, "no AQI reading, continuing with sentinel");
        }
        let sample = assemble_sample(weather, aqi);
        run.sample = Some(sample);

        // MAPPING: pure, cannot fail.
        run.state = RunState::Mapping;
        let params = map_sample(&sample);
        let prompt = compose_prompt(&sample);
        info!(run_id = %run.id, ?params, "derived musical parameters");
        run.parameters = Some(params);
        run.prompt = Some(prompt.clone());

        // Stage artifacts inside the output root so the final renames stay
        // on one filesystem.
        fs::create_dir_all(&self.config.out_root).map_err(PipelineError::Persistence)?;
        let staging = tempfile::Builder::new()
            .prefix(".run_")
            .tempdir_in(&self.config.out_root)
            .map_err(PipelineError::Persistence)?;
        let staged_wav = staging.path().join(run.id.waveform_filename());

        // GENERATING (and RENDERING on the symbolic path).
        run.state = RunState::Generating;
        self.check_cancel(&run, cancel)?;
        let staged_score = match self.config.path {
            GenerationPath::Prompt => {
                let text = prompt.render();
                info!(run_id = %run.id, prompt = %text, "generating audio from prompt");
                let clip = self.generator.generate(&text, self.config.duration_secs)?;
                wav::write_clip(&clip, &staged_wav)?;
                None
            }
            GenerationPath::Symbolic => {
                let seed = self.config.seed.unwrap_or_else(|| run.id.seed());
                let score = generate_score(&params, self.config.bars, seed);
                let staged_mid = staging.path().join(run.id.score_filename());
                write_midi(&score, &staged_mid)?;

                run.state = RunState::Rendering;
                self.check_cancel(&run, cancel)?;
                match self.renderer.render(&staged_mid, &staged_wav, cancel) {
                    Ok(()) => {}
                    Err(RenderError::Cancelled) => {
                        return Err(PipelineError::Cancelled {
                            stage: RunState::Rendering,
                        })
                    }
                    Err(err) => return Err(err.into()),
                }
                Some(staged_mid)
            }
        };

        // PERSISTING: move artifacts into the output root, then write the
        // metadata record. Nothing is observable until both succeed.
        run.state = RunState::Persisting;
        let metadata = self.persist(&run, location, sample, params, staged_score, &staged_wav)?;
        run.symbolic_path = metadata.symbolic_file.clone();
        run.waveform_path = Some(metadata.waveform_file.clone());

        run.state = RunState::Done;
        info!(
            run_id = %run.id,
            waveform = %metadata.waveform_file.display(),
            "pipeline run complete"
        );
        Ok(metadata)
    }

    fn persist(
        &self,
        run: &PipelineRun,
        location: &Location,
        sample: EnvironmentalSample,
        params: MusicParameters,
        staged_score: Option<PathBuf>,
        staged_wav: &Path,
    ) -> Result<RunMetadata, PipelineError> {
        let out_root = &self.config.out_root;
        let final_wav = out_root.join(run.id.waveform_filename());
        fs::rename(staged_wav, &final_wav).map_err(PipelineError::Persistence)?;

        let final_score = match staged_score {
            Some(staged) => {
                let target = out_root.join(run.id.score_filename());
                if let Err(err) = fs::rename(&staged, &target) {
                    let _ = fs::remove_file(&final_wav);
                    return Err(PipelineError::Persistence(err));
                }
                Some(target)
            }
            None => None,
        };

        let metadata = RunMetadata {
            run_id: run.id.to_string(),
            timestamp: run.created_at.to_rfc3339(),
            location: location.clone(),
            environment: sample,
            music_parameters: params,
            symbolic_file: final_score.clone(),
            waveform_file: final_wav.clone(),
        };

        let writer = MetadataWriter::new(out_root);
        if let Err(err) = writer.write(&metadata) {
            // Withdraw the already-renamed artifacts so the failed run
            // leaves nothing behind.
            let _ = fs::remove_file(&final_wav);
            if let Some(score) = &final_score {
                let _ = fs::remove_file(score);
            }
            return Err(err);
        }

        Ok(metadata)
    }

    fn check_cancel(&self, run: &PipelineRun, cancel: &CancelToken) -> Result<(), PipelineError> {
        if cancel.is_cancelled() {
            warn!(run_id = %run.id, stage = %run.state, "run cancelled");
            Err(PipelineError::Cancelled { stage: run.state })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosynth_env::{AqiReading, EnvError, EnvResult, WeatherReading};
    use ecosynth_gen::{AudioClip, GenError, GenResult};
    use ecosynth_render::RenderResult;
    use ecosynth_spec::{Instrument, KeyMode, AQI_UNKNOWN};
    use std::path::Path;

    struct FakeEnv {
        weather: Option<WeatherReading>,
        aqi: Option<i32>,
    }

    impl FakeEnv {
        fn mild() -> Self {
            Self {
                weather: Some(WeatherReading {
                    temperature: 25.0,
                    humidity: 50.0,
                    wind_speed: 3.0,
                }),
                aqi: Some(40),
            }
        }

        fn without_aqi() -> Self {
            Self {
                aqi: None,
                ..Self::mild()
            }
        }

        fn unavailable() -> Self {
            Self {
                weather: None,
                aqi: None,
            }
        }
    }

    impl EnvironmentClient for FakeEnv {
        fn fetch_weather(&self, _location: &Location) -> EnvResult<WeatherReading> {
            self.weather.ok_or(EnvError::BadStatus {
                source_name: "weather",
                status: 503,
            })
        }

        fn fetch_aqi(&self, _location: &Location) -> Option<AqiReading> {
            self.aqi.map(|aqi| AqiReading { aqi })
        }
    }

    struct FakeGenerator {
        fail: bool,
    }

    impl AudioGenerator for FakeGenerator {
        fn generate(&self, _prompt: &str, duration_secs: u32) -> GenResult<AudioClip> {
            if self.fail {
                return Err(GenError::EmptyOutput);
            }
            let sample_rate = 8000;
            let samples = vec![0.1; (sample_rate * duration_secs) as usize];
            Ok(AudioClip::new(samples, sample_rate))
        }
    }

    struct FakeRenderer {
        fail: bool,
    }

    impl WaveformRenderer for FakeRenderer {
        fn render(
            &self,
            score_path: &Path,
            wav_path: &Path,
            _cancel: &CancelToken,
        ) -> RenderResult<()> {
            if self.fail {
                return Err(RenderError::SynthNotFound);
            }
            assert!(score_path.exists(), "score must be written before render");
            std::fs::write(wav_path, b"RIFFfakewav").map_err(RenderError::Io)
        }
    }

    fn visible_entries(root: &Path) -> Vec<String> {
        let mut entries: Vec<String> = std::fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| !name.starts_with('.'))
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn test_prompt_path_persists_waveform_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let env = FakeEnv::mild();
        let generator = FakeGenerator { fail: false };
        let renderer = FakeRenderer { fail: false };
        let orchestrator = Orchestrator::new(
            &env,
            &generator,
            &renderer,
            OrchestratorConfig::new(dir.path(), GenerationPath::Prompt),
        );

        let metadata = orchestrator
            .run_pipeline(&Location::new("Delhi", "India"), &CancelToken::new())
            .unwrap();

        assert!(metadata.waveform_file.exists());
        assert!(metadata.symbolic_file.is_none());
        assert_eq!(metadata.environment.aqi, 40);
        assert_eq!(visible_entries(dir.path()).len(), 2); // wav + json
    }

    #[test]
    fn test_symbolic_path_persists_score_too() {
        let dir = tempfile::tempdir().unwrap();
        let env = FakeEnv::mild();
        let generator = FakeGenerator { fail: false };
        let renderer = FakeRenderer { fail: false };
        let orchestrator = Orchestrator::new(
            &env,
            &generator,
            &renderer,
            OrchestratorConfig::new(dir.path(), GenerationPath::Symbolic),
        );

        let metadata = orchestrator
            .run_pipeline(&Location::new("Delhi", "India"), &CancelToken::new())
            .unwrap();

        let score = metadata.symbolic_file.expect("symbolic path writes a score");
        assert!(score.exists());
        assert!(metadata.waveform_file.exists());
        assert_eq!(visible_entries(dir.path()).len(), 3); // mid + wav + json
    }

    #[test]
    fn test_missing_aqi_degrades_to_sentinel_and_major_key() {
        let dir = tempfile::tempdir().unwrap();
        let env = FakeEnv::without_aqi();
        let generator = FakeGenerator { fail: false };
        let renderer = FakeRenderer { fail: false };
        let orchestrator = Orchestrator::new(
            &env,
            &generator,
            &renderer,
            OrchestratorConfig::new(dir.path(), GenerationPath::Prompt),
        );

        let metadata = orchestrator
            .run_pipeline(&Location::new("Oslo", "Norway"), &CancelToken::new())
            .unwrap();

        assert_eq!(metadata.environment.aqi, AQI_UNKNOWN);
        assert_eq!(metadata.music_parameters.key_mode, KeyMode::Major);
        assert_eq!(metadata.music_parameters.instrument, Instrument::Piano);
    }

    #[test]
    fn test_weather_failure_aborts_in_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let env = FakeEnv::unavailable();
        let generator = FakeGenerator { fail: false };
        let renderer = FakeRenderer { fail: false };
        let orchestrator = Orchestrator::new(
            &env,
            &generator,
            &renderer,
            OrchestratorConfig::new(dir.path(), GenerationPath::Prompt),
        );

        let err = orchestrator
            .run_pipeline(&Location::new("Delhi", "India"), &CancelToken::new())
            .unwrap_err();
        assert_eq!(err.stage(), RunState::Fetching);
    }

    #[test]
    fn test_generation_failure_leaves_no_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let env = FakeEnv::mild();
        let generator = FakeGenerator { fail: true };
        let renderer = FakeRenderer { fail: false };
        let orchestrator = Orchestrator::new(
            &env,
            &generator,
            &renderer,
            OrchestratorConfig::new(dir.path(), GenerationPath::Prompt),
        );

        let err = orchestrator
            .run_pipeline(&Location::new("Delhi", "India"), &CancelToken::new())
            .unwrap_err();
        assert_eq!(err.stage(), RunState::Generating);
        assert!(visible_entries(dir.path()).is_empty());
    }

    #[test]
    fn test_render_failure_leaves_no_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let env = FakeEnv::mild();
        let generator = FakeGenerator { fail: false };
        let renderer = FakeRenderer { fail: true };
        let orchestrator = Orchestrator::new(
            &env,
            &generator,
            &renderer,
            OrchestratorConfig::new(dir.path(), GenerationPath::Symbolic),
        );

        let err = orchestrator
            .run_pipeline(&Location::new("Delhi", "India"), &CancelToken::new())
            .unwrap_err();
        assert_eq!(err.stage(), RunState::Rendering);
        assert!(visible_entries(dir.path()).is_empty());
    }

    #[test]
    fn test_pre_cancelled_run_aborts_before_fetching_work() {
        let dir = tempfile::tempdir().unwrap();
        let env = FakeEnv::mild();
        let generator = FakeGenerator { fail: false };
        let renderer = FakeRenderer { fail: false };
        let orchestrator = Orchestrator::new(
            &env,
            &generator,
            &renderer,
            OrchestratorConfig::new(dir.path(), GenerationPath::Prompt),
        );

        let cancel = CancelToken::new();
        cancel.cancel();
        let err = orchestrator
            .run_pipeline(&Location::new("Delhi", "India"), &cancel)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Cancelled { .. }));
        assert!(visible_entries(dir.path()).is_empty());
    }

    #[test]
    fn test_concurrent_style_runs_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let env = FakeEnv::mild();
        let generator = FakeGenerator { fail: false };
        let renderer = FakeRenderer { fail: false };
        let orchestrator = Orchestrator::new(
            &env,
            &generator,
            &renderer,
            OrchestratorConfig::new(dir.path(), GenerationPath::Prompt),
        );
        let location = Location::new("Delhi", "India");

        let first = orchestrator
            .run_pipeline(&location, &CancelToken::new())
            .unwrap();
        let second = orchestrator
            .run_pipeline(&location, &CancelToken::new())
            .unwrap();

        assert_ne!(first.run_id, second.run_id);
        assert_ne!(first.waveform_file, second.waveform_file);
        assert!(first.waveform_file.exists());
        assert!(second.waveform_file.exists());
    }

    #[test]
    fn test_explicit_seed_reproduces_score_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let env = FakeEnv::mild();
        let generator = FakeGenerator { fail: false };
        let renderer = FakeRenderer { fail: false };
        let mut config = OrchestratorConfig::new(dir.path(), GenerationPath::Symbolic);
        config.seed = Some(99);
        let orchestrator = Orchestrator::new(&env, &generator, &renderer, config);
        let location = Location::new("Delhi", "India");

        let first = orchestrator
            .run_pipeline(&location, &CancelToken::new())
            .unwrap();
        let second = orchestrator
            .run_pipeline(&location, &CancelToken::new())
            .unwrap();

        let a = std::fs::read(first.symbolic_file.unwrap()).unwrap();
        let b = std::fs::read(second.symbolic_file.unwrap()).unwrap();
        assert_eq!(a, b, "same seed and sample must reproduce the score");
    }
}
