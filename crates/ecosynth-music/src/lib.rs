//! Ecosynth Music Derivation
//!
//! This crate turns an environmental sample into musical intent, along two
//! independent deterministic paths:
//!
//! - [`mapper`]: numeric derivation of [`ecosynth_spec::MusicParameters`]
//!   (key mode, tempo, instrument, density), total over all inputs via
//!   clamping
//! - [`compose`]: natural-language prompt composition from an ordered,
//!   last-writer-wins rule table
//!
//! For the symbolic generation path it also provides:
//!
//! - [`score`]: deterministic note-event generation from the parameters,
//!   seeded per run (PCG32, reproducible from the run record)
//! - [`midi`]: Standard MIDI File writing for generated scores
//!
//! The mapper and composer are pure: no side effects, identical results for
//! identical inputs, safe to call concurrently.

pub mod compose;
pub mod mapper;
pub mod midi;
pub mod score;

mod error;

pub use compose::compose_prompt;
pub use error::MusicError;
pub use mapper::map_sample;
pub use midi::write_midi;
pub use score::{generate_score, NoteEvent, Score, DEFAULT_BARS, TICKS_PER_BEAT};
