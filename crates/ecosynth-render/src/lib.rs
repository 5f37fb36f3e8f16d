//! Ecosynth Waveform Renderer
//!
//! Converts a symbolic score (MIDI) into a waveform by spawning FluidSynth
//! as a subprocess. The renderer verifies its inputs before spawning, waits
//! with a bounded timeout and a cancellation check, and treats a non-zero
//! exit or an empty/missing output file as a distinct error.

pub mod renderer;

mod error;

pub use error::{RenderError, RenderResult};
pub use renderer::{
    Renderer, RendererConfig, WaveformRenderer, DEFAULT_SAMPLE_RATE, DEFAULT_TIMEOUT_SECS,
};
