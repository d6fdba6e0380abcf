//! Tests for the wizard step machine and the inter-step query protocol

use reframe::flow::{EmotionForm, ReflectionForm, Step, choose_category, processing_microcopy};
use reframe::reflections::SOMETHING_ELSE;
use reframe::state::{Category, WizardState, clamp_intensity};

#[test]
fn category_choice_always_advances() {
    let (step, state) = choose_category(WizardState::default(), Category::Internships);
    assert_eq!(step, Step::EmotionInput);
    assert_eq!(state.category, Category::Internships);
}

#[test]
fn emotion_step_gates_on_selection() {
    let form = EmotionForm {
        selected_emotion: None,
        context: "some context".to_string(),
    };
    assert!(!form.is_complete());
    assert!(form.advance(WizardState::default()).is_none());

    let form = EmotionForm {
        selected_emotion: Some(4),
        context: "late-night spiral".to_string(),
    };
    let (step, state) = form.advance(WizardState::default()).unwrap();
    assert_eq!(step, Step::ReflectionAndIntensity);
    assert_eq!(state.emotion_index, 4);
    assert_eq!(state.free_text_context, "late-night spiral");
}

#[test]
fn reflection_gating_blocks_empty_sentinel_text() {
    let mut form = ReflectionForm::default();
    assert!(!form.is_complete());

    form.select_option(SOMETHING_ELSE);
    assert!(!form.is_complete());

    // Whitespace-only free text keeps the continue action disabled.
    form.something_else_text = "   ".to_string();
    assert!(!form.is_complete());
    assert!(form.advance(WizardState::default()).is_none());

    form.something_else_text = "burnt out".to_string();
    assert!(form.is_complete());
    let (step, state) = form.advance(WizardState::default()).unwrap();
    assert_eq!(step, Step::Processing);
    assert_eq!(state.reflection, "burnt out");
}

#[test]
fn menu_choice_completes_without_free_text() {
    let mut form = ReflectionForm::default();
    form.select_option("I feel stuck.");
    assert!(form.is_complete());

    // Intensity and additional context carry defaults when unset.
    let (_, state) = form.advance(WizardState::default()).unwrap();
    assert_eq!(state.intensity, 5);
    assert_eq!(state.additional_context, "");
}

#[test]
fn progressive_reveal_follows_answers() {
    let mut form = ReflectionForm::default();
    assert!(!form.shows_intensity());
    assert!(!form.shows_additional_context());

    form.select_option("I need clarity.");
    assert!(form.shows_intensity());
    assert!(!form.shows_additional_context());

    form.intensity = Some(7);
    assert!(form.shows_additional_context());
}

#[test]
fn query_protocol_applies_decode_defaults() {
    let state = WizardState::from_query("category=career&emotion=9&intensity=0");
    assert_eq!(state.category, Category::Career);
    assert_eq!(state.emotion_index, 6);
    assert_eq!(state.intensity, 1);

    let state = WizardState::from_query("category=unknown");
    assert_eq!(state.category, Category::Life);
    assert_eq!(state.emotion_index, 2);
    assert_eq!(state.intensity, 5);
}

#[test]
fn query_protocol_percent_decodes_free_text() {
    let state = WizardState::from_query(
        "category=school&emotion=5&situation=I%27m%20burnt%20out.&context=finals%20week",
    );
    assert_eq!(state.reflection, "I'm burnt out.");
    assert_eq!(state.free_text_context, "finals week");
}

#[test]
fn back_navigation_preserves_carried_state() {
    let mut form = ReflectionForm::default();
    form.select_option("I feel stuck.");
    form.intensity = Some(8);
    let (_, state) = form
        .advance(WizardState::default().with_category(Category::School))
        .unwrap();

    // Going back and re-deriving from the mapping keeps everything already
    // collected; only in-step drafts are lost.
    assert_eq!(Step::Processing.back(), Some(Step::ReflectionAndIntensity));
    let rederived = WizardState::from_query(&state.to_query());
    assert_eq!(rederived, state);
}

#[test]
fn emotion_microcopy_covers_the_whole_scale() {
    use reframe::flow::{EMOTION_LABELS, EMOTION_SUPPORT, PROCESSING_PHRASES};
    assert_eq!(EMOTION_LABELS.len(), 7);
    assert_eq!(EMOTION_SUPPORT.len(), 7);
    assert!(!PROCESSING_PHRASES.is_empty());
    assert_eq!(EMOTION_LABELS[0], "Feeling calm.");
    assert_eq!(EMOTION_LABELS[6], "Feeling deeply frustrated.");
}

#[test]
fn intensity_clamps_before_microcopy_thresholds() {
    assert_eq!(clamp_intensity(0), 1);
    assert_eq!(clamp_intensity(11), 10);

    assert_eq!(processing_microcopy(0), "Building from steady ground.");
    assert_eq!(processing_microcopy(3), "Building from steady ground.");
    assert_eq!(processing_microcopy(5), "Clarity is forming.");
    assert_eq!(processing_microcopy(7), "Take a breath. We're working gently.");
    assert_eq!(processing_microcopy(11), "Take a breath. We're working gently.");
}
