//! Ecosynth CLI - Command-line interface for environment-driven music
//!
//! This binary turns the live environmental conditions of a location into a
//! short piece of music: fetch, derive, generate, render, persist.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ecosynth_cli::commands;
use ecosynth_render::DEFAULT_TIMEOUT_SECS;

/// Ecosynth - Environment-Driven Music Generation
#[derive(Parser)]
#[command(name = "ecosynth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one pipeline run for a location
    Run {
        /// City name, as understood by the weather provider
        #[arg(short, long)]
        city: String,

        /// State or region (required for an AQI reading)
        #[arg(short, long)]
        state: Option<String>,

        /// Country name
        #[arg(long)]
        country: String,

        /// Output root directory for artifacts and metadata
        #[arg(short, long, default_value = "output")]
        out_root: String,

        /// Use the symbolic path (score + FluidSynth) instead of the
        /// prompt-driven inference service
        #[arg(long)]
        symbolic: bool,

        /// Path to the SoundFont (.sf2) file (symbolic path only)
        #[arg(long)]
        soundfont: Option<String>,

        /// Inference service endpoint (prompt path only)
        #[arg(long, default_value = commands::run::DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Requested clip length in seconds (prompt path only)
        #[arg(long, default_value = "15")]
        duration: u32,

        /// Number of bars in the generated score (symbolic path only)
        #[arg(long, default_value = "4")]
        bars: u32,

        /// Explicit score seed (default: derived from the run id)
        #[arg(long)]
        seed: Option<u64>,

        /// Timeout for FluidSynth execution in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        render_timeout: u64,

        /// Output the metadata record as JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Derive musical parameters from an explicit reading, without APIs
    Map {
        /// Temperature in degrees Celsius
        #[arg(short, long, allow_hyphen_values = true)]
        temperature: f64,

        /// Relative humidity percentage
        #[arg(long)]
        humidity: f64,

        /// Wind speed in meters per second
        #[arg(short, long)]
        wind_speed: f64,

        /// Air Quality Index (omit to model "no reading")
        #[arg(short, long)]
        aqi: Option<i32>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check system dependencies and configuration
    Doctor {
        /// SoundFont (.sf2) path to verify
        #[arg(long)]
        soundfont: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            city,
            state,
            country,
            out_root,
            symbolic,
            soundfont,
            endpoint,
            duration,
            bars,
            seed,
            render_timeout,
            json,
        } => commands::run::run(
            &city,
            state.as_deref(),
            &country,
            &out_root,
            symbolic,
            soundfont.as_deref(),
            &endpoint,
            duration,
            bars,
            seed,
            render_timeout,
            json,
        ),
        Commands::Map {
            temperature,
            humidity,
            wind_speed,
            aqi,
            json,
        } => commands::map::run(temperature, humidity, wind_speed, aqi, json),
        Commands::Doctor { soundfont } => commands::doctor::run(soundfont.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_map() {
        let cli = Cli::try_parse_from([
            "ecosynth",
            "map",
            "--temperature",
            "-5.5",
            "--humidity",
            "40",
            "--wind-speed",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Map {
                temperature,
                humidity,
                wind_speed,
                aqi,
                json,
            } => {
                assert_eq!(temperature, -5.5);
                assert_eq!(humidity, 40.0);
                assert_eq!(wind_speed, 3.0);
                assert!(aqi.is_none());
                assert!(!json);
            }
            _ => panic!("expected map command"),
        }
    }

    #[test]
    fn test_cli_parses_run_with_state() {
        let cli = Cli::try_parse_from([
            "ecosynth",
            "run",
            "--city",
            "Delhi",
            "--state",
            "Delhi",
            "--country",
            "India",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                city,
                state,
                country,
                symbolic,
                json,
                ..
            } => {
                assert_eq!(city, "Delhi");
                assert_eq!(state.as_deref(), Some("Delhi"));
                assert_eq!(country, "India");
                assert!(!symbolic);
                assert!(json);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_cli_parses_symbolic_run() {
        let cli = Cli::try_parse_from([
            "ecosynth",
            "run",
            "--city",
            "Oslo",
            "--country",
            "Norway",
            "--symbolic",
            "--soundfont",
            "gm.sf2",
            "--seed",
            "42",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                symbolic,
                soundfont,
                seed,
                ..
            } => {
                assert!(symbolic);
                assert_eq!(soundfont.as_deref(), Some("gm.sf2"));
                assert_eq!(seed, Some(42));
            }
            _ => panic!("expected run command"),
        }
    }
}
