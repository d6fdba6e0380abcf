//! Results view state.
//!
//! Owns the at-most-once generation fetch, the week/month timeline
//! projection, action activation (which reorders the displayed timeline
//! nodes), and the duplicate-guarded save action. All I/O goes through the
//! backend seams so this state machine is fully testable offline.

use crate::generation::{
    GenerateRequest, GenerationBackend, GenerationOutcome, GenerationResult, fallback_result,
    reconcile,
};
use crate::sessions::{SavePayload, SessionBackend, share_path};
use crate::state::WizardState;
use serde::{Deserialize, Serialize};

/// Timeline display mode. Switching modes only changes which already-fetched
/// array is projected; it never re-fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineMode {
    Week,
    Month,
}

impl TimelineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineMode::Week => "week",
            TimelineMode::Month => "month",
        }
    }

    /// Fixed node layout per mode, independent of content.
    pub fn positions(&self) -> &'static [&'static str] {
        match self {
            TimelineMode::Week => &["18%", "50%", "82%"],
            TimelineMode::Month => &["12%", "36%", "62%", "88%"],
        }
    }
}

/// A timeline entry placed at a fixed layout position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineNode {
    pub left: &'static str,
    pub top: &'static str,
    pub title: String,
    pub description: String,
}

const NODE_TOP: &str = "48%";
const NODE_OVERFLOW_LEFT: &str = "50%";

/// Save sub-state; transitions are one-way except the failure path, which
/// returns to `Idle` so the action stays retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    Saved(String),
}

/// Per-visit state of the results step.
pub struct ResultsSession {
    state: WizardState,
    fetch_started: bool,
    outcome: Option<GenerationOutcome>,
    mode: TimelineMode,
    activated_index: Option<usize>,
    save: SaveState,
}

impl ResultsSession {
    pub fn new(state: WizardState) -> Self {
        Self {
            state,
            fetch_started: false,
            outcome: None,
            mode: TimelineMode::Week,
            activated_index: None,
            save: SaveState::Idle,
        }
    }

    /// Whether the generation outcome has not resolved yet. All dependent
    /// regions (hero text, analysis list, action list) gate on this single
    /// flag.
    pub fn is_loading(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn outcome(&self) -> Option<&GenerationOutcome> {
        self.outcome.as_ref()
    }

    /// The reconciled result, or the full fallback while still loading so
    /// callers never observe a hole.
    pub fn result(&self) -> GenerationResult {
        self.outcome
            .as_ref()
            .map(|o| o.result().clone())
            .unwrap_or_else(fallback_result)
    }

    pub fn diagnostic(&self) -> Option<&str> {
        self.outcome.as_ref().and_then(|o| o.diagnostic())
    }

    /// Fetch the generation result, at most once per session instance.
    ///
    /// The guard flips before the request is issued, so re-invocations from
    /// repeated render cycles are no-ops even while the first call is still
    /// in flight. A dropped future simply leaves the session loading.
    pub async fn load(&mut self, backend: &dyn GenerationBackend) {
        if self.fetch_started {
            return;
        }
        self.fetch_started = true;

        let request = GenerateRequest::from_state(&self.state);
        let outcome = match backend.generate(&request).await {
            Ok(wire) => reconcile(wire),
            Err(err) => {
                tracing::warn!(error = %err, "generation service unavailable, using fallback");
                GenerationOutcome::Failure {
                    diagnostic: "Failed to connect to backend. Using fallback response.".to_string(),
                    result: fallback_result(),
                }
            }
        };
        self.outcome = Some(outcome);
    }

    pub fn mode(&self) -> TimelineMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TimelineMode) {
        self.mode = mode;
    }

    /// Toggle an action card. Selecting the already-active index clears the
    /// activation and restores the original timeline order.
    pub fn toggle_action(&mut self, index: usize) {
        self.activated_index = if self.activated_index == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn activated_index(&self) -> Option<usize> {
        self.activated_index
    }

    /// Title of the activated action, if the activation points at a real
    /// action.
    pub fn activated_action_title(&self) -> Option<String> {
        let index = self.activated_index?;
        self.result().actions.get(index).map(|a| a.title.clone())
    }

    /// Project the current mode's timeline entries onto the fixed layout.
    ///
    /// An activation moves the corresponding entry to the first position and
    /// re-assigns positions by display order; content is never changed.
    pub fn timeline_nodes(&self) -> Vec<TimelineNode> {
        let result = self.result();
        let items = match self.mode {
            TimelineMode::Week => &result.timeline.week,
            TimelineMode::Month => &result.timeline.month,
        };

        let mut ordered: Vec<&crate::generation::ActionItem> = items.iter().collect();
        if let Some(index) = self.activated_index
            && index < ordered.len()
        {
            let activated = ordered.remove(index);
            ordered.insert(0, activated);
        }

        let positions = self.mode.positions();
        ordered
            .into_iter()
            .enumerate()
            .map(|(i, item)| TimelineNode {
                left: positions.get(i).copied().unwrap_or(NODE_OVERFLOW_LEFT),
                top: NODE_TOP,
                title: item.title.clone(),
                description: item.description.clone(),
            })
            .collect()
    }

    pub fn save_state(&self) -> &SaveState {
        &self.save
    }

    /// Shareable path once a save has succeeded.
    pub fn share_path(&self) -> Option<String> {
        match &self.save {
            SaveState::Saved(id) => Some(share_path(id)),
            _ => None,
        }
    }

    /// Save the current summary. No-op while a save is in flight or after
    /// one succeeded; a failed save returns the button to its idle state.
    pub async fn save(&mut self, sessions: &dyn SessionBackend) -> crate::error::Result<()> {
        if !matches!(self.save, SaveState::Idle) {
            return Ok(());
        }
        self.save = SaveState::Saving;

        let payload = SavePayload {
            category: self.state.category.as_str().to_string(),
            emotion: self.state.emotion_index as i64,
            intensity: self.state.intensity as i64,
            mode: self.mode.as_str().to_string(),
            activated_action: self.activated_action_title(),
            ai_response: self.result().reframe_text,
        };

        match sessions.create_session(&payload).await {
            Ok(id) => {
                self.save = SaveState::Saved(id);
                Ok(())
            }
            Err(err) => {
                self.save = SaveState::Idle;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_layouts_are_fixed() {
        assert_eq!(TimelineMode::Week.positions().len(), 3);
        assert_eq!(TimelineMode::Month.positions().len(), 4);
    }

    #[test]
    fn loading_session_still_renders_fallback() {
        let session = ResultsSession::new(WizardState::default());
        assert!(session.is_loading());
        assert_eq!(session.result(), fallback_result());
        assert_eq!(session.timeline_nodes().len(), 3);
    }
}
