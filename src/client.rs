//! HTTP boundary to the remote analysis service.
//!
//! Stateless request/response translation: one POST per analysis, no
//! retries (retry policy belongs to the caller). Failures collapse into
//! [`AnalysisError`], whose `Display` is the bare human-readable message
//! the session stores and the error banner shows.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::model::{AnalysisRequest, AnalysisResult};

/// How much of a non-JSON error body is surfaced to the user.
const MAX_RAW_ERROR_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Network/connection failure before a usable response.
    #[error("{0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("{0}")]
    Server(String),
    /// Success status, but the body is not a valid result.
    #[error("{0}")]
    Decode(String),
    /// Anything that fits none of the above.
    #[error("{0}")]
    Unknown(String),
}

/// Seam between the session and the transport, so tests and demos can
/// stand in for the remote service.
#[allow(async_fn_in_trait)]
pub trait AnalysisBackend {
    async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

/// The production backend: POSTs to `{base}/analyze` over the browser's
/// fetch API. Safe to share; holds no mutable state.
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> Result<Url, AnalysisError> {
        let raw = format!("{}/analyze", self.base_url.trim_end_matches('/'));
        Url::parse(&raw)
            .map_err(|e| AnalysisError::Unknown(format!("Invalid analysis endpoint '{raw}': {e}")))
    }
}

impl AnalysisBackend for HttpAnalysisClient {
    async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let endpoint = self.endpoint()?;

        // Analyses can legitimately run for minutes; no client-side deadline.
        let response = self
            .client
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            return Err(AnalysisError::Server(server_error_message(
                status,
                body.as_deref(),
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|e| AnalysisError::Decode(format!("Could not decode analysis response: {e}")))
    }
}

/// Structured failure body the service sends when it can.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Best-effort extraction of a server error message, degrading in three
/// tiers: structured `{"error": ...}` body, then the first 200 characters
/// of the raw body, then a generic status-code message. A malformed or
/// missing body must never escalate past an error string.
fn server_error_message(status: StatusCode, body: Option<&str>) -> String {
    match body {
        Some(text) if !text.trim().is_empty() => {
            match serde_json::from_str::<ErrorBody>(text) {
                Ok(parsed) => parsed.error,
                Err(_) => text.chars().take(MAX_RAW_ERROR_LEN).collect(),
            }
        }
        _ => format!("Analysis service returned HTTP {}", status.as_u16()),
    }
}
