//! Wizard state and the inter-step query-string protocol.
//!
//! Every step boundary serializes the cumulative [`WizardState`] as a flat
//! string-keyed query mapping and the next step re-derives its state from
//! that mapping alone. Decoding is tolerant: missing or unparseable values
//! fall back to defaults and numerics are clamped into range rather than
//! rejected.

use serde::{Deserialize, Serialize};

/// Default emotion index when the mapping carries none (neutral).
pub const DEFAULT_EMOTION_INDEX: u8 = 2;
/// Default intensity when the mapping carries none (midpoint of 1..=10).
pub const DEFAULT_INTENSITY: u8 = 5;

/// Life category chosen at step 1. Unknown inputs normalize to `Life`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    School,
    Internships,
    Career,
    Life,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::School,
        Category::Internships,
        Category::Career,
        Category::Life,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::School => "school",
            Category::Internships => "internships",
            Category::Career => "career",
            Category::Life => "life",
        }
    }

    /// Normalize an arbitrary string to a known category, defaulting to `Life`.
    pub fn normalize(raw: &str) -> Category {
        match raw {
            "school" => Category::School,
            "internships" => Category::Internships,
            "career" => Category::Career,
            _ => Category::Life,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Life
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp an emotion index into the 7-point scale (0..=6).
pub fn clamp_emotion(raw: i64) -> u8 {
    raw.clamp(0, 6) as u8
}

/// Clamp an intensity value into the bounded slider range (1..=10).
pub fn clamp_intensity(raw: i64) -> u8 {
    raw.clamp(1, 10) as u8
}

/// The cumulative record threaded through wizard steps.
///
/// Fields carry defaults until their originating step sets them, so a state
/// decoded from a partial mapping is always fully usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub category: Category,
    pub emotion_index: u8,
    pub free_text_context: String,
    pub reflection: String,
    pub intensity: u8,
    pub additional_context: String,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            category: Category::Life,
            emotion_index: DEFAULT_EMOTION_INDEX,
            free_text_context: String::new(),
            reflection: String::new(),
            intensity: DEFAULT_INTENSITY,
            additional_context: String::new(),
        }
    }
}

/// Raw view of the query mapping before tolerant decoding.
///
/// `serde_qs` handles percent-decoding; field decoding happens in
/// [`WizardState::from_raw`] so the tolerance rules live in one place.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RawStepParams {
    pub category: Option<String>,
    pub emotion: Option<String>,
    pub context: Option<String>,
    pub situation: Option<String>,
    pub intensity: Option<String>,
    pub additional_context: Option<String>,
}

impl WizardState {
    /// Decode a state from a raw query string (the step's input channel).
    ///
    /// An unparseable query string yields the default state; this mirrors the
    /// rest of the protocol's tolerance rather than surfacing an error.
    pub fn from_query(query: &str) -> WizardState {
        let raw: RawStepParams = serde_qs::from_str(query).unwrap_or_default();
        Self::from_raw(&raw)
    }

    /// Apply the decode rules to a raw mapping.
    ///
    /// - missing `category` -> `life`
    /// - missing/unparseable `emotion` -> 2, clamped to 0..=6
    /// - missing/unparseable `intensity` -> 5, clamped to 1..=10
    /// - missing text fields -> empty string
    pub fn from_raw(raw: &RawStepParams) -> WizardState {
        let category = raw
            .category
            .as_deref()
            .map(Category::normalize)
            .unwrap_or_default();
        let emotion_index = raw
            .emotion
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(clamp_emotion)
            .unwrap_or(DEFAULT_EMOTION_INDEX);
        let intensity = raw
            .intensity
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(clamp_intensity)
            .unwrap_or(DEFAULT_INTENSITY);
        WizardState {
            category,
            emotion_index,
            free_text_context: raw.context.clone().unwrap_or_default(),
            reflection: raw.situation.clone().unwrap_or_default(),
            intensity,
            additional_context: raw.additional_context.clone().unwrap_or_default(),
        }
    }

    /// Encode the state as the flat query mapping for the next step's address.
    pub fn to_query(&self) -> String {
        let raw = RawStepParams {
            category: Some(self.category.as_str().to_string()),
            emotion: Some(self.emotion_index.to_string()),
            context: Some(self.free_text_context.clone()),
            situation: Some(self.reflection.clone()),
            intensity: Some(self.intensity.to_string()),
            additional_context: Some(self.additional_context.clone()),
        };
        // serde_qs only fails on non-string-keyed maps; a flat struct of
        // strings cannot hit that path.
        serde_qs::to_string(&raw).unwrap_or_default()
    }

    /// Write the step-1 selection.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Write the step-2 selections.
    pub fn with_emotion(mut self, emotion_index: u8, free_text_context: String) -> Self {
        self.emotion_index = clamp_emotion(emotion_index as i64);
        self.free_text_context = free_text_context;
        self
    }

    /// Write the step-3 selections.
    pub fn with_reflection(
        mut self,
        reflection: String,
        intensity: u8,
        additional_context: String,
    ) -> Self {
        self.reflection = reflection;
        self.intensity = clamp_intensity(intensity as i64);
        self.additional_context = additional_context;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_free_text() {
        let state = WizardState {
            category: Category::Career,
            emotion_index: 5,
            free_text_context: "late nights & doubt".to_string(),
            reflection: "I'm burnt out.".to_string(),
            intensity: 8,
            additional_context: "two offers pending".to_string(),
        };
        let decoded = WizardState::from_query(&state.to_query());
        assert_eq!(decoded, state);
    }

    #[test]
    fn empty_query_yields_defaults() {
        let state = WizardState::from_query("");
        assert_eq!(state, WizardState::default());
    }

    #[test]
    fn garbage_numerics_fall_back_then_clamp() {
        let state = WizardState::from_query("emotion=banana&intensity=99");
        assert_eq!(state.emotion_index, DEFAULT_EMOTION_INDEX);
        assert_eq!(state.intensity, 10);
    }
}
