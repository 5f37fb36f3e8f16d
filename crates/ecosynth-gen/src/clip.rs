//! In-memory audio clip returned by the generative service.

/// A mono audio clip: float samples in [-1.0, 1.0] plus a sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Sample values; out-of-range values are clamped at encoding time.
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioClip {
    /// Creates a clip.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Whether the clip has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the clip in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}
