//! Environment-to-parameter mapping.
//!
//! A total, pure function: every input maps to parameters whose fields lie
//! within their documented closed ranges. Extreme readings are clamped, never
//! rejected. Tempo is monotonic non-decreasing in temperature and density is
//! monotonic non-decreasing in wind speed.

use ecosynth_spec::{EnvironmentalSample, Instrument, KeyMode, MusicParameters};

/// AQI at or above which the piece switches to a minor key.
const MINOR_KEY_AQI: i32 = 100;

/// Temperature clamp bounds (degrees Celsius) for the tempo derivation.
const TEMP_BOUNDS: (f64, f64) = (-10.0, 60.0);

/// Derives musical parameters from an environmental sample.
///
/// Rules are applied independently; no field depends on another:
///
/// - key mode: minor when `aqi >= 100` (the unknown-AQI sentinel counts as
///   below the threshold, so missing air data stays major)
/// - tempo: `60 + 2 * temperature`, temperature clamped to [-10, 60] and the
///   result clamped to [60, 180] BPM
/// - instrument: synth bass below 30% humidity, piano below 60%, ambient
///   pad otherwise
/// - density: `2 * wind_speed` notes per bar, clamped to [2, 12]
pub fn map_sample(sample: &EnvironmentalSample) -> MusicParameters {
    let key_mode = if sample.aqi >= MINOR_KEY_AQI {
        KeyMode::Minor
    } else {
        KeyMode::Major
    };

    let temp = sample.temperature.clamp(TEMP_BOUNDS.0, TEMP_BOUNDS.1);
    let tempo_bpm = ((60.0 + temp * 2.0) as i64).clamp(60, 180) as u32;

    let instrument = if sample.humidity < 30.0 {
        Instrument::SynthBass
    } else if sample.humidity < 60.0 {
        Instrument::Piano
    } else {
        Instrument::AmbientPad
    };

    let density = ((sample.wind_speed.max(0.0) * 2.0) as i64).clamp(2, 12) as u32;

    MusicParameters {
        key_mode,
        tempo_bpm,
        instrument,
        density,
    }
}
