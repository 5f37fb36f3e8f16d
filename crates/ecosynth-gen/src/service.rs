//! The generative audio service handle.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clip::AudioClip;
use crate::error::{GenError, GenResult};

/// Default bounded timeout for one inference call.
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 120;

/// Consumes a prompt and produces audio.
///
/// Implemented by the HTTP inference handle in production and by fakes in
/// tests; the pipeline only sees this trait.
pub trait AudioGenerator {
    /// Generates a clip of roughly `duration_secs` seconds for `prompt`.
    fn generate(&self, prompt: &str, duration_secs: u32) -> GenResult<AudioClip>;
}

/// Configuration for the HTTP inference service handle.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Endpoint URL of the text-to-audio service.
    pub endpoint: String,
    /// Bounded timeout for one inference call.
    pub timeout: Duration,
}

impl ServiceConfig {
    /// Creates a config for an endpoint with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_INFERENCE_TIMEOUT_SECS),
        }
    }

    /// Sets the inference timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Handle to a text-to-audio inference service.
///
/// The caller owns the lifecycle: [`init`](Self::init) before the first
/// generation, [`shutdown`](Self::shutdown) when done. Using the handle
/// before `init()` fails with [`GenError::NotInitialized`].
pub struct MusicGenService {
    config: ServiceConfig,
    client: Option<reqwest::blocking::Client>,
}

impl MusicGenService {
    /// Creates an uninitialized handle.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Initializes the handle. Idempotent.
    pub fn init(&mut self) -> GenResult<()> {
        if self.client.is_some() {
            return Ok(());
        }
        info!(endpoint = %self.config.endpoint, "initializing generation service");
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(GenError::InitFailed)?;
        self.client = Some(client);
        Ok(())
    }

    /// Releases the handle's connection resources. Idempotent.
    pub fn shutdown(&mut self) {
        if self.client.take().is_some() {
            info!("generation service shut down");
        }
    }

    /// Whether `init()` has been called.
    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }
}

impl AudioGenerator for MusicGenService {
    fn generate(&self, prompt: &str, duration_secs: u32) -> GenResult<AudioClip> {
        let client = self.client.as_ref().ok_or(GenError::NotInitialized)?;

        info!(prompt, duration_secs, "requesting audio generation");
        let response = client
            .post(&self.config.endpoint)
            .json(&GenerateRequest {
                prompt,
                duration_seconds: duration_secs,
            })
            .send()
            .map_err(|err| {
                if err.is_timeout() {
                    GenError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    GenError::Http(err)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenError::BadStatus {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response.json().map_err(GenError::Http)?;
        if body.samples.is_empty() {
            return Err(GenError::EmptyOutput);
        }

        let clip = AudioClip::new(body.samples, body.sample_rate);
        debug!(
            samples = clip.samples.len(),
            sample_rate = clip.sample_rate,
            "generation complete"
        );
        Ok(clip)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    duration_seconds: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    samples: Vec<f32>,
    sample_rate: u32,
}
