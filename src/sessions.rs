//! Session save client.
//!
//! Saving a plan posts a summary of the reconciled result to the session
//! endpoint and receives an opaque identifier back. Persistence behind that
//! endpoint is out of scope; the identifier is only used to build a share
//! link.

use crate::error::{ReframeError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Summary sent to `POST /api/session` when the user saves their plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePayload {
    pub category: String,
    pub emotion: i64,
    pub intensity: i64,
    pub mode: String,
    #[serde(rename = "activatedAction", skip_serializing_if = "Option::is_none")]
    pub activated_action: Option<String>,
    #[serde(rename = "aiResponse")]
    pub ai_response: String,
}

#[derive(Debug, Deserialize)]
struct SessionCreated {
    #[serde(rename = "sessionId")]
    session_id: String,
}

/// Path prefix for shareable session links.
pub const SHARE_PATH_PREFIX: &str = "/s/";

/// Build the shareable path for a saved session id.
pub fn share_path(session_id: &str) -> String {
    format!("{}{}", SHARE_PATH_PREFIX, session_id)
}

/// Seam over the session-creation endpoint.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Create a session, returning its opaque identifier.
    async fn create_session(&self, payload: &SavePayload) -> Result<String>;
}

/// reqwest-backed implementation posting to the app's own session route.
pub struct HttpSessionBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSessionBackend {
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
impl SessionBackend for HttpSessionBackend {
    async fn create_session(&self, payload: &SavePayload) -> Result<String> {
        let url = format!("{}/api/session", self.base_url.trim_end_matches('/'));
        let response = self.client.post(&url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(ReframeError::Session {
                message: format!("Session endpoint error: {}", response.status()),
            });
        }
        let created: SessionCreated = response.json().await.map_err(|e| ReframeError::Session {
            message: format!("Malformed session response: {}", e),
        })?;
        Ok(created.session_id)
    }
}
