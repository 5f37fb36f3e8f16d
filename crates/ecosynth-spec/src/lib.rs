//! Ecosynth Core Data Model
//!
//! This crate provides the shared types for the ecosynth pipeline: the
//! environmental sample fetched for a location, the musical parameters and
//! generation prompt derived from it, and the run record that documents one
//! end-to-end pipeline execution.
//!
//! # Overview
//!
//! One pipeline run turns one `EnvironmentalSample` into exactly one
//! [`MusicParameters`] value and one [`GenerationPrompt`] (two independent
//! deterministic projections of the same input), produces a waveform
//! artifact, and finishes by writing a single [`RunMetadata`] record.
//!
//! # Modules
//!
//! - [`sample`]: Location and environmental sample types
//! - [`params`]: Derived musical parameter types
//! - [`prompt`]: Natural-language generation prompt
//! - [`run`]: Run identity, state machine states, and the live run record
//! - [`metadata`]: The durable per-run metadata record
//! - [`cancel`]: Cooperative cancellation token

pub mod cancel;
pub mod metadata;
pub mod params;
pub mod prompt;
pub mod run;
pub mod sample;

// Re-export commonly used types at the crate root
pub use cancel::CancelToken;
pub use metadata::RunMetadata;
pub use params::{Instrument, KeyMode, MusicParameters};
pub use prompt::GenerationPrompt;
pub use run::{PipelineRun, RunId, RunState};
pub use sample::{EnvironmentalSample, Location, AQI_UNKNOWN};

/// Crate version for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
