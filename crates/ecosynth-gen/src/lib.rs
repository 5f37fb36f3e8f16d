//! Ecosynth Generative Audio Service
//!
//! The prompt generation path hands a composed natural-language prompt to a
//! text-to-audio inference service and receives raw audio samples back. The
//! service is a black box behind HTTP; this crate models it as an explicit
//! handle with an `init()`/`shutdown()` lifecycle owned by the caller and
//! injected into the pipeline, never a process-wide singleton loaded on
//! first use.
//!
//! The inference call carries a bounded timeout; exceeding it is a
//! generation failure, not a hang.
//!
//! # Modules
//!
//! - [`clip`]: In-memory audio clip
//! - [`service`]: The `AudioGenerator` trait and the HTTP service handle
//! - [`wav`]: 16-bit PCM WAV encoding

pub mod clip;
pub mod service;
pub mod wav;

mod error;

pub use clip::AudioClip;
pub use error::{GenError, GenResult};
pub use service::{AudioGenerator, MusicGenService, ServiceConfig};
pub use wav::write_clip;
