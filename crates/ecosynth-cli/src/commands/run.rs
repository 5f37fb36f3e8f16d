//! Run command implementation
//!
//! Executes one full pipeline run: fetch the environmental reading for a
//! location, derive musical intent, generate audio, and persist the
//! artifacts plus a metadata record.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use std::time::Duration;

use ecosynth_env::{EnvConfig, HttpEnvironmentClient};
use ecosynth_gen::{MusicGenService, ServiceConfig};
use ecosynth_pipeline::{GenerationPath, Orchestrator, OrchestratorConfig, PipelineError};
use ecosynth_render::{Renderer, RendererConfig};
use ecosynth_spec::{CancelToken, Location};

/// Default inference endpoint for the prompt generation path.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/generate";

/// Run the run command.
#[allow(clippy::too_many_arguments)]
pub fn run(
    city: &str,
    state: Option<&str>,
    country: &str,
    out_root: &str,
    symbolic: bool,
    soundfont: Option<&str>,
    endpoint: &str,
    duration: u32,
    bars: u32,
    seed: Option<u64>,
    render_timeout: u64,
    json: bool,
) -> Result<ExitCode> {
    let mut location = Location::new(city, country);
    if let Some(state) = state {
        location = location.with_state(state);
    }

    let path = if symbolic {
        GenerationPath::Symbolic
    } else {
        GenerationPath::Prompt
    };

    let env_client = HttpEnvironmentClient::new(EnvConfig::default())
        .context("failed to build environment client")?;

    let mut service = MusicGenService::new(ServiceConfig::new(endpoint));
    if path == GenerationPath::Prompt {
        service
            .init()
            .context("failed to initialize generation service")?;
    }

    let renderer = match path {
        GenerationPath::Symbolic => {
            let Some(soundfont) = soundfont else {
                bail!("--symbolic requires --soundfont <path to .sf2 file>");
            };
            Renderer::with_config(
                RendererConfig::with_soundfont(soundfont)
                    .timeout(Duration::from_secs(render_timeout)),
            )
        }
        // Unused on the prompt path; the orchestrator never calls it.
        GenerationPath::Prompt => Renderer::with_config(RendererConfig::with_soundfont("")),
    };

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\ninterrupt received, aborting run");
        handler_token.cancel();
    })
    .context("failed to install interrupt handler")?;

    let mut config = OrchestratorConfig::new(out_root, path);
    config.duration_secs = duration;
    config.bars = bars;
    config.seed = seed;

    let result = {
        let orchestrator = Orchestrator::new(&env_client, &service, &renderer, config);
        orchestrator.run_pipeline(&location, &cancel)
    };
    service.shutdown();

    match result {
        Ok(metadata) => {
            if json {
                println!("{}", metadata.to_json_pretty()?);
            } else {
                println!("{} run {}", "ok".green(), metadata.run_id.bold());
                println!("  location    {}", location.label());
                println!(
                    "  environment {:.1}°C, {:.0}% humidity, {:.1} m/s wind, AQI {}",
                    metadata.environment.temperature,
                    metadata.environment.humidity,
                    metadata.environment.wind_speed,
                    if metadata.environment.has_aqi() {
                        metadata.environment.aqi.to_string()
                    } else {
                        "n/a".to_string()
                    }
                );
                println!(
                    "  parameters  {} key, {} bpm, {} (density {})",
                    metadata.music_parameters.key_mode.as_str(),
                    metadata.music_parameters.tempo_bpm,
                    metadata.music_parameters.instrument.as_str(),
                    metadata.music_parameters.density
                );
                if let Some(score) = &metadata.symbolic_file {
                    println!("  score       {}", score.display());
                }
                println!("  waveform    {}", metadata.waveform_file.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(PipelineError::Cancelled { stage }) => {
            eprintln!("{} run cancelled during {}", "!!".yellow(), stage);
            Ok(ExitCode::from(130))
        }
        Err(err) => {
            eprintln!("{} run failed during {}: {}", "!!".red(), err.stage(), err);
            Ok(ExitCode::from(1))
        }
    }
}
