//! Deterministic symbolic score generation.
//!
//! A score is a flat sequence of one-beat note events drawn from a scale
//! rooted at middle C. All randomness comes from a PCG32 seeded per run, so
//! the same parameters and seed always produce the identical score.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use ecosynth_spec::{KeyMode, MusicParameters};

/// MIDI ticks per quarter note.
pub const TICKS_PER_BEAT: u16 = 480;

/// Default number of bars in a generated score.
pub const DEFAULT_BARS: u32 = 4;

/// Middle C, the scale root.
const BASE_NOTE: u8 = 60;

/// Velocity range for generated notes (inclusive).
const VELOCITY_RANGE: (u8, u8) = (60, 100);

/// Semitone offsets of the major scale.
const MAJOR_SCALE: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Semitone offsets of the natural minor scale.
const MINOR_SCALE: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// One note event; every note lasts exactly one beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    /// MIDI note number.
    pub note: u8,
    /// MIDI velocity in [60, 100].
    pub velocity: u8,
}

/// A generated symbolic score, ready for MIDI serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// General MIDI program number for the single melody channel.
    pub program: u8,
    /// Tempo in beats per minute.
    pub tempo_bpm: u32,
    /// Note events, played back to back, one beat each.
    pub notes: Vec<NoteEvent>,
    /// MIDI ticks per quarter note.
    pub ticks_per_beat: u16,
}

impl Score {
    /// Total length of the score in beats.
    pub fn len_beats(&self) -> usize {
        self.notes.len()
    }
}

/// Generates a score of `density * bars` notes from the given parameters.
///
/// Notes are drawn uniformly from the major or natural minor scale depending
/// on the key mode; velocities are drawn uniformly from [60, 100].
pub fn generate_score(params: &MusicParameters, bars: u32, seed: u64) -> Score {
    let mut rng = Pcg32::seed_from_u64(seed);
    let scale = match params.key_mode {
        KeyMode::Major => &MAJOR_SCALE,
        KeyMode::Minor => &MINOR_SCALE,
    };

    let total_notes = (params.density * bars) as usize;
    let notes = (0..total_notes)
        .map(|_| NoteEvent {
            note: BASE_NOTE + scale[rng.gen_range(0..scale.len())],
            velocity: rng.gen_range(VELOCITY_RANGE.0..=VELOCITY_RANGE.1),
        })
        .collect();

    Score {
        program: params.instrument.gm_program(),
        tempo_bpm: params.tempo_bpm,
        notes,
        ticks_per_beat: TICKS_PER_BEAT,
    }
}
