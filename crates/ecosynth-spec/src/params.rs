//! Musical parameter types derived from an environmental sample.
//!
//! Every field of [`MusicParameters`] always lies within its documented
//! closed range: derivation clamps extreme inputs instead of rejecting them.

use serde::{Deserialize, Serialize};

/// Tonal mode for the generated piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    Major,
    Minor,
}

impl KeyMode {
    /// Returns the string identifier for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMode::Major => "major",
            KeyMode::Minor => "minor",
        }
    }
}

/// Instrument used on the symbolic generation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    SynthBass,
    Piano,
    AmbientPad,
}

impl Instrument {
    /// Returns the string identifier for this instrument.
    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::SynthBass => "synth_bass",
            Instrument::Piano => "piano",
            Instrument::AmbientPad => "ambient_pad",
        }
    }

    /// General MIDI program number for this instrument.
    pub fn gm_program(&self) -> u8 {
        match self {
            Instrument::Piano => 0,
            Instrument::SynthBass => 38,
            Instrument::AmbientPad => 89,
        }
    }
}

/// Musical parameters derived from one environmental sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicParameters {
    /// Tonal mode: minor when the air quality is poor (AQI >= 100).
    pub key_mode: KeyMode,
    /// Tempo in beats per minute, always within [60, 180].
    pub tempo_bpm: u32,
    /// Instrument selected from the humidity band.
    pub instrument: Instrument,
    /// Rhythmic density in notes per bar, always within [2, 12].
    pub density: u32,
}

/// Inclusive tempo range in BPM.
pub const TEMPO_RANGE: (u32, u32) = (60, 180);

/// Inclusive density range in notes per bar.
pub const DENSITY_RANGE: (u32, u32) = (2, 12);
