//! Doctor command implementation
//!
//! Checks system dependencies and configuration.

use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::Path;
use std::process::ExitCode;

use ecosynth_env::{AQI_KEY_VAR, WEATHER_KEY_VAR};
use ecosynth_render::{Renderer, RendererConfig};

/// Run the doctor command.
///
/// Checks:
/// - FluidSynth installation (symbolic path)
/// - API key environment variables (live fetching)
/// - Output directory permissions
/// - Version information
///
/// # Returns
/// Exit code: 0 if all hard checks pass, 1 if any fail
pub fn run(soundfont: Option<&str>) -> Result<ExitCode> {
    println!("{}", "Ecosynth Doctor".cyan().bold());
    println!("{}", "===============".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!("  {} ecosynth-cli v{}", "->".green(), ecosynth_spec::VERSION);
    println!();

    println!("{}", "Dependencies:".bold());
    let renderer = Renderer::with_config(RendererConfig::with_soundfont(
        soundfont.unwrap_or_default(),
    ));
    match renderer.find_fluidsynth() {
        Ok(path) => {
            println!("  {} FluidSynth found at {}", "ok".green(), path.display());
        }
        Err(err) => {
            println!("  {} {}", "!!".yellow(), err);
            println!(
                "     {}",
                "FluidSynth is only required for --symbolic runs.".dimmed()
            );
        }
    }
    match soundfont {
        Some(sf2) if Path::new(sf2).is_file() => {
            println!("  {} SoundFont found at {}", "ok".green(), sf2);
        }
        Some(sf2) => {
            println!("  {} SoundFont not found at {}", "!!".red(), sf2);
            all_ok = false;
        }
        None => {
            println!(
                "  {} no SoundFont given (pass --soundfont to check one)",
                "->".green()
            );
        }
    }
    println!();

    println!("{}", "API keys:".bold());
    check_key("weather", WEATHER_KEY_VAR, true, &mut all_ok);
    check_key("air quality", AQI_KEY_VAR, false, &mut all_ok);
    println!();

    println!("{}", "Permissions:".bold());
    match env::current_dir() {
        Ok(dir) => {
            let test_file = dir.join(".ecosynth_write_test");
            match std::fs::write(&test_file, "test") {
                Ok(_) => {
                    let _ = std::fs::remove_file(&test_file);
                    println!(
                        "  {} Current directory is writable ({})",
                        "ok".green(),
                        dir.display()
                    );
                }
                Err(e) => {
                    println!("  {} Cannot write to current directory: {}", "!!".red(), e);
                    all_ok = false;
                }
            }
        }
        Err(e) => {
            println!("  {} Cannot determine current directory: {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    if all_ok {
        println!("{}", "All checks passed.".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", "Some checks failed.".red().bold());
        Ok(ExitCode::from(1))
    }
}

fn check_key(source: &str, var: &str, required: bool, all_ok: &mut bool) {
    match env::var(var) {
        Ok(value) if !value.is_empty() => {
            println!("  {} {} key set ({})", "ok".green(), source, var);
        }
        _ if required => {
            println!("  {} {} key missing: set {}", "!!".red(), source, var);
            *all_ok = false;
        }
        _ => {
            println!("  {} {} key missing: set {}", "!!".yellow(), source, var);
            println!(
                "     {}",
                "Runs continue without AQI when this key is absent.".dimmed()
            );
        }
    }
}
