//! Generation service client and fallback reconciliation.
//!
//! The external service produces the reframe narrative, analysis bullets,
//! action items, and week/month timeline. Any field the service omits (or
//! returns empty) is replaced by static fallback content, field by field; a
//! failed or error-shaped response degrades to the full fallback result.
//! Nothing on this path is fatal.

use crate::error::{ReframeError, Result};
use crate::state::WizardState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Situation text sent when the wizard carried no reflection.
const DEFAULT_SITUATION: &str = "Feeling uncertain";

/// Request body for `POST {backend_url}/generate-path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub category: String,
    pub emotion: i64,
    pub situation: String,
    pub intensity: i64,
    pub context: String,
    pub additional_context: String,
}

impl GenerateRequest {
    /// Build the request from the accumulated wizard state.
    pub fn from_state(state: &WizardState) -> GenerateRequest {
        let situation = if state.reflection.is_empty() {
            DEFAULT_SITUATION.to_string()
        } else {
            state.reflection.clone()
        };
        GenerateRequest {
            category: state.category.as_str().to_string(),
            emotion: state.emotion_index as i64,
            situation,
            intensity: state.intensity as i64,
            context: state.free_text_context.clone(),
            additional_context: state.additional_context.clone(),
        }
    }
}

/// A suggested action or timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub title: String,
    pub description: String,
}

impl ActionItem {
    fn new(title: &str, description: &str) -> ActionItem {
        ActionItem {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Week and month projections of the suggested timeline. Either side may be
/// absent on the wire; an absent side decodes as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub week: Vec<ActionItem>,
    #[serde(default)]
    pub month: Vec<ActionItem>,
}

/// The reconciled output shown on the results step. Every field is already
/// resolved against fallback content; renderers never see a hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub reframe_text: String,
    pub analysis_points: Vec<String>,
    pub actions: Vec<ActionItem>,
    pub timeline: Timeline,
}

/// Raw service response before reconciliation. Every field is independently
/// optional; an `error` field without a `reframe` marks a failed generation
/// even on a 2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireResponse {
    #[serde(rename = "planId")]
    pub plan_id: Option<String>,
    pub reframe: Option<String>,
    pub analysis: Option<Vec<String>>,
    pub actions: Option<Vec<ActionItem>>,
    pub timeline: Option<Vec<Timeline>>,
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Terminal states of a generation attempt. Both carry a fully resolved
/// result so the results view renders the same way on either path.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Success {
        plan_id: Option<String>,
        result: GenerationResult,
    },
    Failure {
        diagnostic: String,
        result: GenerationResult,
    },
}

impl GenerationOutcome {
    pub fn result(&self) -> &GenerationResult {
        match self {
            GenerationOutcome::Success { result, .. } => result,
            GenerationOutcome::Failure { result, .. } => result,
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Success { .. } => None,
            GenerationOutcome::Failure { diagnostic, .. } => Some(diagnostic),
        }
    }
}

pub fn fallback_reframe() -> String {
    "You're not behind. You're in a transition phase — and that's exactly when clarity matters most."
        .to_string()
}

pub fn fallback_analysis() -> Vec<String> {
    vec![
        "Unclear benchmarks - It's hard to know what \"on track\" looks like when you're charting your own path.".to_string(),
        "Comparison bias - We compare our behind-the-scenes to everyone else's highlight reel.".to_string(),
        "Lack of roadmap - Without a clear next step, it's easy to feel stuck even when you're moving.".to_string(),
    ]
}

pub fn fallback_actions() -> Vec<ActionItem> {
    vec![
        ActionItem::new("Refine positioning", "Polish your narrative"),
        ActionItem::new("Reach out to 1 person", "One meaningful connection"),
        ActionItem::new("Submit 2 applications", "Targeted, intentional"),
    ]
}

pub fn fallback_timeline() -> Timeline {
    Timeline {
        week: vec![
            ActionItem::new("Refine positioning", "Polish your narrative"),
            ActionItem::new("Reach out to 1 person", "One meaningful connection"),
            ActionItem::new("Submit 2 applications", "Targeted, intentional"),
        ],
        month: vec![
            ActionItem::new("Clarify direction", "Define your focus"),
            ActionItem::new("Build outreach rhythm", "Consistent momentum"),
            ActionItem::new("Secure interviews", "Land conversations"),
            ActionItem::new("Reflect and adjust", "Keep what works"),
        ],
    }
}

/// The full fallback result used on the failure path.
pub fn fallback_result() -> GenerationResult {
    GenerationResult {
        reframe_text: fallback_reframe(),
        analysis_points: fallback_analysis(),
        actions: fallback_actions(),
        timeline: fallback_timeline(),
    }
}

/// Reconcile a parsed service response into an outcome.
///
/// Success requires a non-empty `reframe`; each remaining field falls back
/// independently when missing or empty. A missing `reframe` is a failure,
/// with the diagnostic taken from the error shape when one is present.
pub fn reconcile(wire: WireResponse) -> GenerationOutcome {
    let reframe = wire.reframe.filter(|r| !r.trim().is_empty());
    let Some(reframe_text) = reframe else {
        let diagnostic = if wire.error.is_some() {
            wire.message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "API returned error".to_string())
        } else {
            "No reframe generated.".to_string()
        };
        return GenerationOutcome::Failure {
            diagnostic,
            result: fallback_result(),
        };
    };

    let analysis_points = wire
        .analysis
        .filter(|a| !a.is_empty())
        .unwrap_or_else(fallback_analysis);
    let actions = wire
        .actions
        .filter(|a| !a.is_empty())
        .unwrap_or_else(fallback_actions);
    let timeline = wire
        .timeline
        .and_then(|t| t.into_iter().next())
        .unwrap_or_else(fallback_timeline);

    GenerationOutcome::Success {
        plan_id: wire.plan_id,
        result: GenerationResult {
            reframe_text,
            analysis_points,
            actions,
            timeline,
        },
    }
}

/// Seam over the generation service so the fetch-once and reconciliation
/// logic is testable without a network.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<WireResponse>;
}

/// reqwest-backed implementation talking to the configured backend URL.
pub struct HttpGenerationBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGenerationBackend {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReframeError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl GenerationBackend for HttpGenerationBackend {
    async fn generate(&self, request: &GenerateRequest) -> Result<WireResponse> {
        let url = format!("{}/generate-path", self.base_url.trim_end_matches('/'));
        tracing::debug!(category = request.category, url = %url, "calling generation service");

        let response = self.client.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(ReframeError::Generation {
                message: format!("Backend error: {}", response.status()),
            });
        }
        let wire: WireResponse = response.json().await?;
        Ok(wire)
    }
}
