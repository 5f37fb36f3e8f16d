//! Environment-to-prompt composition.
//!
//! The composer evaluates one rule per category in a fixed order
//! (temperature, humidity, wind, air quality) against mutable accumulators
//! for mood, tone, and instrument, plus an ordered descriptor list. Within a
//! category only one branch fires; across categories a later rule may
//! overwrite mood, tone, or instrument set by an earlier one
//! (last-writer-wins). The ordering is contract: air quality dominates tone
//! and instrument whenever its rule fires, and wind dominates mood over
//! temperature.

use ecosynth_spec::{EnvironmentalSample, GenerationPrompt};

/// The effect of one fired rule on the prompt accumulators.
///
/// `None` leaves the corresponding accumulator untouched; `Some` overwrites
/// it. The descriptor, when present, is appended in firing order.
#[derive(Debug, Clone, Copy, Default)]
struct RuleEffect {
    mood: Option<&'static str>,
    tone: Option<&'static str>,
    instrument: Option<&'static str>,
    descriptor: Option<&'static str>,
}

/// Category rules, evaluated in this exact order.
const CATEGORY_RULES: [fn(&EnvironmentalSample) -> RuleEffect; 4] = [
    temperature_rule,
    humidity_rule,
    wind_rule,
    air_quality_rule,
];

/// Composes the generation prompt for an environmental sample.
///
/// Pure and total: every sample composes to a prompt, and the mood is never
/// empty (it defaults to "ambient").
pub fn compose_prompt(sample: &EnvironmentalSample) -> GenerationPrompt {
    let mut prompt = GenerationPrompt::default();
    for rule in CATEGORY_RULES {
        apply_effect(&mut prompt, rule(sample));
    }
    prompt
}

fn apply_effect(prompt: &mut GenerationPrompt, effect: RuleEffect) {
    if let Some(mood) = effect.mood {
        prompt.mood = mood.to_string();
    }
    if let Some(tone) = effect.tone {
        prompt.tone = tone.to_string();
    }
    if let Some(instrument) = effect.instrument {
        prompt.instrument = instrument.to_string();
    }
    if let Some(descriptor) = effect.descriptor {
        prompt.descriptors.push(descriptor.to_string());
    }
}

fn temperature_rule(sample: &EnvironmentalSample) -> RuleEffect {
    let t = sample.temperature;
    if t >= 40.0 {
        RuleEffect {
            mood: Some("intense"),
            instrument: Some("synths"),
            descriptor: Some("sweltering heat"),
            ..Default::default()
        }
    } else if t >= 30.0 {
        RuleEffect {
            descriptor: Some("warm breeze"),
            ..Default::default()
        }
    } else if t <= 10.0 {
        RuleEffect {
            mood: Some("cold and slow"),
            instrument: Some("strings"),
            descriptor: Some("frosty air"),
            ..Default::default()
        }
    } else {
        RuleEffect {
            descriptor: Some("mild climate"),
            ..Default::default()
        }
    }
}

fn humidity_rule(sample: &EnvironmentalSample) -> RuleEffect {
    let h = sample.humidity;
    if h > 85.0 {
        RuleEffect {
            tone: Some("uneasy and heavy"),
            descriptor: Some("dense humidity"),
            ..Default::default()
        }
    } else if h > 70.0 {
        RuleEffect {
            descriptor: Some("sticky atmosphere"),
            ..Default::default()
        }
    } else if h < 30.0 {
        RuleEffect {
            tone: Some("crisp and sharp"),
            descriptor: Some("dry winds"),
            ..Default::default()
        }
    } else {
        RuleEffect::default()
    }
}

fn wind_rule(sample: &EnvironmentalSample) -> RuleEffect {
    let w = sample.wind_speed;
    if w > 20.0 {
        RuleEffect {
            mood: Some("stormy"),
            instrument: Some("brass"),
            descriptor: Some("howling gusts"),
            ..Default::default()
        }
    } else if w > 12.0 {
        RuleEffect {
            mood: Some("chaotic"),
            instrument: Some("percussion-heavy"),
            descriptor: Some("strong breeze"),
            ..Default::default()
        }
    } else if w > 6.0 {
        RuleEffect {
            descriptor: Some("light breeze"),
            ..Default::default()
        }
    } else {
        RuleEffect {
            descriptor: Some("calm air"),
            ..Default::default()
        }
    }
}

fn air_quality_rule(sample: &EnvironmentalSample) -> RuleEffect {
    let aqi = sample.aqi;
    if aqi > 300 {
        RuleEffect {
            tone: Some("apocalyptic"),
            instrument: Some("distorted synthesizers"),
            descriptor: Some("toxic smog"),
            ..Default::default()
        }
    } else if aqi > 200 {
        RuleEffect {
            tone: Some("dystopian"),
            instrument: Some("distorted guitar"),
            descriptor: Some("polluted skies"),
            ..Default::default()
        }
    } else if aqi > 100 {
        RuleEffect {
            tone: Some("hazy and somber"),
            descriptor: Some("urban fog"),
            ..Default::default()
        }
    } else if aqi <= 50 {
        // The unknown-AQI sentinel (-1) lands here as well, matching the
        // observed behavior of the derivation.
        RuleEffect {
            tone: Some("peaceful and clear"),
            descriptor: Some("fresh air"),
            ..Default::default()
        }
    } else {
        RuleEffect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosynth_spec::AQI_UNKNOWN;
    use pretty_assertions::assert_eq;

    fn sample(temperature: f64, humidity: f64, wind_speed: f64, aqi: i32) -> EnvironmentalSample {
        EnvironmentalSample {
            temperature,
            humidity,
            wind_speed,
            aqi,
        }
    }

    #[test]
    fn test_category_precedence_extreme_sample() {
        let prompt = compose_prompt(&sample(45.0, 20.0, 25.0, 350));

        // Wind overwrote temperature's mood; air quality overwrote wind's
        // instrument and humidity's tone.
        assert_eq!(prompt.mood, "stormy");
        assert_eq!(prompt.tone, "apocalyptic");
        assert_eq!(prompt.instrument, "distorted synthesizers");
        assert_eq!(
            prompt.descriptors,
            vec!["sweltering heat", "dry winds", "howling gusts", "toxic smog"]
        );
    }

    #[test]
    fn test_mild_sample_keeps_defaults() {
        let prompt = compose_prompt(&sample(20.0, 50.0, 2.0, 60));
        assert_eq!(prompt.mood, "ambient");
        assert_eq!(prompt.tone, "");
        assert_eq!(prompt.instrument, "piano");
        assert_eq!(prompt.descriptors, vec!["mild climate", "calm air"]);
    }

    #[test]
    fn test_cold_sample() {
        let prompt = compose_prompt(&sample(5.0, 40.0, 1.0, 30));
        assert_eq!(prompt.mood, "cold and slow");
        assert_eq!(prompt.tone, "peaceful and clear");
        assert_eq!(prompt.instrument, "strings");
        assert_eq!(prompt.descriptors, vec!["frosty air", "calm air", "fresh air"]);
    }

    #[test]
    fn test_unknown_aqi_composes_clear_air() {
        let prompt = compose_prompt(&sample(20.0, 50.0, 2.0, AQI_UNKNOWN));
        assert_eq!(prompt.tone, "peaceful and clear");
        assert!(prompt.descriptors.contains(&"fresh air".to_string()));
    }

    #[test]
    fn test_moderate_aqi_leaves_tone_untouched() {
        // 50 < aqi <= 100 fires no air-quality branch
        let prompt = compose_prompt(&sample(20.0, 90.0, 2.0, 80));
        assert_eq!(prompt.tone, "uneasy and heavy");
    }

    #[test]
    fn test_rendered_sentence() {
        let prompt = compose_prompt(&sample(20.0, 50.0, 2.0, 60));
        assert_eq!(
            prompt.render(),
            "A ambient, mild climate, calm air piano melody \
             reflecting current environmental conditions."
        );
    }

    #[test]
    fn test_wind_band_boundaries() {
        assert_eq!(compose_prompt(&sample(20.0, 50.0, 6.0, 60)).descriptors[1], "calm air");
        assert_eq!(compose_prompt(&sample(20.0, 50.0, 6.1, 60)).descriptors[1], "light breeze");
        assert_eq!(compose_prompt(&sample(20.0, 50.0, 12.1, 60)).mood, "chaotic");
        assert_eq!(compose_prompt(&sample(20.0, 50.0, 20.1, 60)).mood, "stormy");
    }
}
