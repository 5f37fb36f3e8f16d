//! FluidSynth subprocess renderer.
//!
//! This module handles spawning FluidSynth and supervising the conversion
//! of a MIDI score into a WAV file.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use ecosynth_spec::CancelToken;

use crate::error::{RenderError, RenderResult};

/// Default timeout for FluidSynth execution (60 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default output sample rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Converts a symbolic score file into a waveform file.
///
/// Implemented by the FluidSynth [`Renderer`] in production and by fakes in
/// tests; the pipeline only sees this trait.
pub trait WaveformRenderer {
    /// Renders `score_path` into `wav_path`.
    fn render(&self, score_path: &Path, wav_path: &Path, cancel: &CancelToken)
        -> RenderResult<()>;
}

/// Configuration for the FluidSynth renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Path to the FluidSynth executable.
    pub fluidsynth_path: Option<PathBuf>,
    /// Path to the SoundFont (.sf2) file.
    pub soundfont_path: PathBuf,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Timeout for FluidSynth execution.
    pub timeout: Duration,
    /// Whether to capture FluidSynth's stderr.
    pub capture_output: bool,
}

impl RendererConfig {
    /// Creates a new config with the given soundfont path.
    pub fn with_soundfont(soundfont_path: impl Into<PathBuf>) -> Self {
        Self {
            fluidsynth_path: None,
            soundfont_path: soundfont_path.into(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            capture_output: true,
        }
    }

    /// Sets the FluidSynth executable path.
    pub fn fluidsynth_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fluidsynth_path = Some(path.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Sets the output sample rate.
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }
}

/// The FluidSynth subprocess renderer.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    /// Creates a new renderer with the given configuration.
    pub fn with_config(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Finds the FluidSynth executable path.
    ///
    /// Resolution order: config override, `FLUIDSYNTH_PATH` environment
    /// variable, `PATH` lookup, common installation paths.
    pub fn find_fluidsynth(&self) -> RenderResult<PathBuf> {
        if let Some(ref path) = self.config.fluidsynth_path {
            if path.exists() {
                return Ok(path.clone());
            }
        }

        if let Ok(path) = std::env::var("FLUIDSYNTH_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        let names = if cfg!(windows) {
            vec!["fluidsynth.exe", "fluidsynth"]
        } else {
            vec!["fluidsynth"]
        };
        for name in names {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        let common_paths = if cfg!(target_os = "macos") {
            vec![
                "/opt/homebrew/bin/fluidsynth",
                "/usr/local/bin/fluidsynth",
            ]
        } else {
            vec!["/usr/bin/fluidsynth", "/usr/local/bin/fluidsynth"]
        };
        for path_str in common_paths {
            let path = PathBuf::from(path_str);
            if path.exists() {
                return Ok(path);
            }
        }

        Err(RenderError::SynthNotFound)
    }
}

impl WaveformRenderer for Renderer {
    /// Renders a MIDI score to a WAV file.
    ///
    /// Fails if the score or soundfont file is missing, if FluidSynth is
    /// unavailable, exits non-zero, or times out, or if the output file is
    /// missing or empty afterwards.
    fn render(
        &self,
        score_path: &Path,
        wav_path: &Path,
        cancel: &CancelToken,
    ) -> RenderResult<()> {
        if cancel.is_cancelled() {
            return Err(RenderError::Cancelled);
        }
        if !score_path.exists() {
            return Err(RenderError::MissingInput {
                path: score_path.to_path_buf(),
            });
        }
        if !self.config.soundfont_path.exists() {
            return Err(RenderError::MissingInput {
                path: self.config.soundfont_path.clone(),
            });
        }

        let synth_path = self.find_fluidsynth()?;

        // fluidsynth -ni -F <wav> -T wav -r <rate> <soundfont> <midi>
        let mut cmd = Command::new(&synth_path);
        cmd.arg("-ni")
            .arg("-F")
            .arg(wav_path)
            .arg("-T")
            .arg("wav")
            .arg("-r")
            .arg(self.config.sample_rate.to_string())
            .arg(&self.config.soundfont_path)
            .arg(score_path);

        if self.config.capture_output {
            // Keep stdout unpiped to avoid subprocess deadlocks from a
            // filled stdout pipe; only stderr is surfaced.
            cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        }

        info!(
            synth = %synth_path.display(),
            score = %score_path.display(),
            "rendering score to waveform"
        );
        let child = cmd.spawn().map_err(RenderError::SpawnFailed)?;

        let (status, stderr) = wait_with_timeout(
            child,
            self.config.timeout,
            self.config.capture_output,
            cancel,
        )?;

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(RenderError::process_failed(exit_code, stderr));
        }

        let rendered_size = std::fs::metadata(wav_path).map(|m| m.len()).unwrap_or(0);
        if rendered_size == 0 {
            return Err(RenderError::EmptyOutput {
                path: wav_path.to_path_buf(),
            });
        }

        debug!(bytes = rendered_size, "waveform rendered");
        Ok(())
    }
}

fn wait_with_timeout(
    mut child: Child,
    timeout: Duration,
    capture_output: bool,
    cancel: &CancelToken,
) -> RenderResult<(ExitStatus, String)> {
    let start = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if cancel.is_cancelled() {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RenderError::Cancelled);
                }
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RenderError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => return Err(RenderError::SpawnFailed(e)),
        }
    };

    let stderr = if capture_output {
        let mut buf = String::new();
        if let Some(mut err) = child.stderr.take() {
            let _ = err.read_to_string(&mut buf);
        }
        buf
    } else {
        String::new()
    };

    Ok((status, stderr))
}
