//! Tests for generation response reconciliation and fallback content

use reframe::generation::{
    GenerateRequest, GenerationOutcome, WireResponse, fallback_actions, fallback_analysis,
    fallback_timeline, reconcile,
};
use reframe::state::{Category, WizardState};

fn wire(json: &str) -> WireResponse {
    serde_json::from_str(json).expect("test wire response should parse")
}

#[test]
fn empty_analysis_falls_back_per_field() {
    let outcome = reconcile(wire(
        r#"{
            "planId": "p1",
            "reframe": "X",
            "analysis": [],
            "actions": [{"title": "a", "description": "b"}],
            "timeline": [{"week": [{"title": "w", "description": "d"}], "month": []}]
        }"#,
    ));
    let GenerationOutcome::Success { result, plan_id } = outcome else {
        panic!("expected success");
    };
    assert_eq!(plan_id.as_deref(), Some("p1"));
    assert_eq!(result.reframe_text, "X");
    // Empty analysis array is replaced; the provided actions are kept.
    assert_eq!(result.analysis_points, fallback_analysis());
    assert_eq!(result.actions.len(), 1);
    assert_eq!(result.timeline.week.len(), 1);
}

#[test]
fn error_shape_is_a_failure_with_diagnostic() {
    let outcome = reconcile(wire(r#"{"error": "bad", "message": "m"}"#));
    let GenerationOutcome::Failure { diagnostic, result } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(diagnostic, "m");
    assert!(!result.reframe_text.is_empty());
    assert_eq!(result.analysis_points, fallback_analysis());
    assert_eq!(result.actions, fallback_actions());
    assert_eq!(result.timeline, fallback_timeline());
}

#[test]
fn error_without_message_gets_generic_diagnostic() {
    let outcome = reconcile(wire(r#"{"error": "bad"}"#));
    assert_eq!(outcome.diagnostic(), Some("API returned error"));
}

#[test]
fn missing_reframe_without_error_is_still_a_failure() {
    let outcome = reconcile(wire(r#"{"analysis": ["only analysis"]}"#));
    let GenerationOutcome::Failure { diagnostic, result } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(diagnostic, "No reframe generated.");
    // Full fallback, not partial merge, on the failure path.
    assert_eq!(result.analysis_points, fallback_analysis());
}

#[test]
fn missing_timeline_uses_fallback_projections() {
    let outcome = reconcile(wire(r#"{"reframe": "X"}"#));
    let result = outcome.result();
    assert_eq!(result.timeline.week.len(), 3);
    assert_eq!(result.timeline.month.len(), 4);
}

#[test]
fn request_carries_accumulated_state() {
    let state = WizardState {
        category: Category::Internships,
        emotion_index: 5,
        free_text_context: "rejection streak".to_string(),
        reflection: "I'm tired of applying.".to_string(),
        intensity: 8,
        additional_context: "three interviews next week".to_string(),
    };
    let request = GenerateRequest::from_state(&state);
    assert_eq!(request.category, "internships");
    assert_eq!(request.emotion, 5);
    assert_eq!(request.situation, "I'm tired of applying.");
    assert_eq!(request.intensity, 8);
    assert_eq!(request.context, "rejection streak");
    assert_eq!(request.additional_context, "three interviews next week");
}

#[test]
fn empty_reflection_defaults_the_situation() {
    let request = GenerateRequest::from_state(&WizardState::default());
    assert_eq!(request.situation, "Feeling uncertain");
}
