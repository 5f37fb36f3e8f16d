//! Natural-language generation prompt.
//!
//! The prompt is the alternate projection of an environmental sample, fed to
//! a text-to-audio inference service instead of the symbolic score path. It
//! carries a mood, an optional tone, an ordered list of descriptor phrases,
//! and an instrument token.

use serde::{Deserialize, Serialize};

/// A composed generation prompt.
///
/// The mood defaults to `"ambient"` and the instrument to `"piano"`; the
/// tone starts empty and is omitted from the rendered sentence while empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPrompt {
    pub mood: String,
    pub tone: String,
    pub descriptors: Vec<String>,
    pub instrument: String,
}

impl Default for GenerationPrompt {
    fn default() -> Self {
        Self {
            mood: "ambient".to_string(),
            tone: String::new(),
            descriptors: Vec::new(),
            instrument: "piano".to_string(),
        }
    }
}

impl GenerationPrompt {
    /// Renders the prompt as the sentence handed to the inference service.
    ///
    /// Mood, tone (when non-empty), and the descriptors are joined with
    /// commas, in that order.
    pub fn render(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(2 + self.descriptors.len());
        parts.push(&self.mood);
        if !self.tone.is_empty() {
            parts.push(&self.tone);
        }
        parts.extend(self.descriptors.iter().map(String::as_str));
        let sentence = parts.join(", ");
        format!(
            "A {} {} melody reflecting current environmental conditions.",
            sentence, self.instrument
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt() {
        let prompt = GenerationPrompt::default();
        assert_eq!(prompt.mood, "ambient");
        assert!(prompt.tone.is_empty());
        assert_eq!(prompt.instrument, "piano");
    }

    #[test]
    fn test_render_skips_empty_tone() {
        let prompt = GenerationPrompt {
            mood: "ambient".into(),
            tone: String::new(),
            descriptors: vec!["mild climate".into(), "calm air".into()],
            instrument: "piano".into(),
        };
        assert_eq!(
            prompt.render(),
            "A ambient, mild climate, calm air piano melody \
             reflecting current environmental conditions."
        );
    }

    #[test]
    fn test_render_includes_tone() {
        let prompt = GenerationPrompt {
            mood: "stormy".into(),
            tone: "apocalyptic".into(),
            descriptors: vec!["toxic smog".into()],
            instrument: "distorted synthesizers".into(),
        };
        assert_eq!(
            prompt.render(),
            "A stormy, apocalyptic, toxic smog distorted synthesizers melody \
             reflecting current environmental conditions."
        );
    }
}
