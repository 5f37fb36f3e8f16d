//! Map command implementation
//!
//! Runs the derivation offline: takes an environmental reading from the
//! command line instead of the live APIs and prints the musical parameters
//! and generation prompt it maps to. Useful for inspecting the mapping
//! without API keys or network access.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use ecosynth_music::{compose_prompt, map_sample};
use ecosynth_spec::{EnvironmentalSample, AQI_UNKNOWN};

/// Run the map command.
pub fn run(
    temperature: f64,
    humidity: f64,
    wind_speed: f64,
    aqi: Option<i32>,
    json: bool,
) -> Result<ExitCode> {
    let sample = EnvironmentalSample {
        temperature,
        humidity,
        wind_speed,
        aqi: aqi.unwrap_or(AQI_UNKNOWN),
    };

    let params = map_sample(&sample);
    let prompt = compose_prompt(&sample);

    if json {
        let output = serde_json::json!({
            "environment": sample,
            "music_parameters": params,
            "prompt": prompt,
            "rendered_prompt": prompt.render(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", "Derived parameters:".bold());
        println!("  key        {}", params.key_mode.as_str());
        println!("  tempo      {} bpm", params.tempo_bpm);
        println!("  instrument {}", params.instrument.as_str());
        println!("  density    {} notes/bar", params.density);
        println!();
        println!("{}", "Prompt:".bold());
        println!("  {}", prompt.render());
    }

    Ok(ExitCode::SUCCESS)
}
