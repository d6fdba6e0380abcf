//! Wizard flow controller.
//!
//! The ordered step sequence with its advancement gates. Steps communicate
//! only through the query mapping in [`crate::state`]; each step's in-memory
//! form state is private to that step's lifetime and is deliberately not
//! restored on back-navigation (matching the observed product behavior).

use crate::reflections::SOMETHING_ELSE;
use crate::state::{Category, WizardState, clamp_intensity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The ordered wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CategorySelect,
    EmotionInput,
    ReflectionAndIntensity,
    Processing,
    Results,
}

impl Step {
    /// The step reached by the "back" affordance, if any. The first step has
    /// no back transition.
    pub fn back(&self) -> Option<Step> {
        match self {
            Step::CategorySelect => None,
            Step::EmotionInput => Some(Step::CategorySelect),
            Step::ReflectionAndIntensity => Some(Step::EmotionInput),
            Step::Processing => Some(Step::ReflectionAndIntensity),
            Step::Results => Some(Step::Processing),
        }
    }

    /// The next step in the linear sequence, if any.
    pub fn next(&self) -> Option<Step> {
        match self {
            Step::CategorySelect => Some(Step::EmotionInput),
            Step::EmotionInput => Some(Step::ReflectionAndIntensity),
            Step::ReflectionAndIntensity => Some(Step::Processing),
            Step::Processing => Some(Step::Results),
            Step::Results => None,
        }
    }
}

/// Step 1: choosing a category always advances.
pub fn choose_category(state: WizardState, category: Category) -> (Step, WizardState) {
    (Step::EmotionInput, state.with_category(category))
}

/// Step 2 form: an emotion selection gates advancement; context is optional.
#[derive(Debug, Default, Clone)]
pub struct EmotionForm {
    pub selected_emotion: Option<u8>,
    pub context: String,
}

impl EmotionForm {
    pub fn is_complete(&self) -> bool {
        self.selected_emotion.is_some()
    }

    /// Advance to the reflection step, writing emotion and context into the
    /// carried state. Returns `None` while no emotion is selected.
    pub fn advance(&self, state: WizardState) -> Option<(Step, WizardState)> {
        let emotion = self.selected_emotion?;
        Some((
            Step::ReflectionAndIntensity,
            state.with_emotion(emotion, self.context.clone()),
        ))
    }
}

/// Step 3 form with progressive reveal.
///
/// Three dependent sub-prompts: the reflection choice is required, the
/// intensity slider appears once a reflection is picked, and the optional
/// free-text appears once the slider has been touched.
#[derive(Debug, Default, Clone)]
pub struct ReflectionForm {
    pub primary_reflection: Option<String>,
    pub something_else_text: String,
    pub intensity: Option<u8>,
    pub additional_context: String,
}

impl ReflectionForm {
    /// Select a menu pill. Picking a concrete phrase clears any sentinel
    /// free-text draft.
    pub fn select_option(&mut self, option: &str) {
        self.primary_reflection = Some(option.to_string());
        if option != SOMETHING_ELSE {
            self.something_else_text.clear();
        }
    }

    pub fn is_something_else(&self) -> bool {
        self.primary_reflection.as_deref() == Some(SOMETHING_ELSE)
    }

    /// The reflection that would be carried forward: the chosen pill, or the
    /// free text when the sentinel is chosen.
    pub fn effective_reflection(&self) -> Option<&str> {
        match self.primary_reflection.as_deref() {
            Some(SOMETHING_ELSE) => Some(self.something_else_text.as_str()),
            other => other,
        }
    }

    /// Intensity slider is revealed after the reflection prompt is answered.
    pub fn shows_intensity(&self) -> bool {
        self.primary_reflection.is_some()
    }

    /// Optional free-text is revealed after the slider has been touched.
    pub fn shows_additional_context(&self) -> bool {
        self.intensity.is_some()
    }

    /// Completeness predicate gating advancement: a reflection is chosen
    /// and, when the sentinel is chosen, the free text is non-empty after
    /// trimming. Intensity and additional context carry defaults.
    pub fn is_complete(&self) -> bool {
        match self.primary_reflection.as_deref() {
            None => false,
            Some(SOMETHING_ELSE) => !self.something_else_text.trim().is_empty(),
            Some(_) => true,
        }
    }

    /// Advance to processing, writing reflection, intensity, and additional
    /// context. Returns `None` while the completeness predicate fails.
    pub fn advance(&self, state: WizardState) -> Option<(Step, WizardState)> {
        if !self.is_complete() {
            return None;
        }
        let reflection = self.effective_reflection().unwrap_or_default().to_string();
        let intensity = self.intensity.unwrap_or(crate::state::DEFAULT_INTENSITY);
        Some((
            Step::Processing,
            state.with_reflection(reflection, intensity, self.additional_context.clone()),
        ))
    }
}

/// Per-emotion label shown once a selection is made on step 2.
pub const EMOTION_LABELS: [&str; 7] = [
    "Feeling calm.",
    "Feeling hopeful.",
    "Feeling neutral.",
    "Feeling uncertain.",
    "Feeling discouraged.",
    "Feeling overwhelmed.",
    "Feeling deeply frustrated.",
];

/// Supporting microcopy paired with each emotion label.
pub const EMOTION_SUPPORT: [&str; 7] = [
    "Let's build from a steady place.",
    "There's something to work with here.",
    "Clarity often starts here.",
    "That's okay. Let's unpack it.",
    "That sounds heavy.",
    "Let's slow this down together.",
    "You don't have to carry this alone.",
];

/// Rotating phrases shown during the processing step.
pub const PROCESSING_PHRASES: [&str; 7] = [
    "untangling assumptions…",
    "separating facts from fears…",
    "zooming out…",
    "reframing thoughts…",
    "softening self-criticism…",
    "building clarity…",
    "shaping your next step…",
];

/// Fixed UX delay before the processing step advances to results. Purely a
/// presentation pause; nothing is computed during it.
pub const PROCESSING_DELAY: Duration = Duration::from_millis(6000);
/// Fade-out duration appended after the delay before navigation fires.
pub const PROCESSING_FADE_OUT: Duration = Duration::from_millis(800);
/// Interval between rotating phrase swaps.
pub const PROCESSING_PHRASE_INTERVAL: Duration = Duration::from_millis(2800);

/// Processing-step microcopy keyed by intensity thresholds. The raw value is
/// clamped into 1..=10 before the thresholds apply.
pub fn processing_microcopy(raw_intensity: i64) -> &'static str {
    let intensity = clamp_intensity(raw_intensity);
    if intensity >= 7 {
        "Take a breath. We're working gently."
    } else if intensity <= 3 {
        "Building from steady ground."
    } else {
        "Clarity is forming."
    }
}
