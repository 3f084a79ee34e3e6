//! Analysis orchestration state machine.
//!
//! One [`AnalysisSession`] exists per client session, created at startup
//! and handed down the component tree through context. It owns the single
//! source of truth (selected location, run status, last result, error
//! message, layer visibility) and every mutation funnels through its
//! transition methods.
//!
//! Completions are fenced with a monotonically increasing run token:
//! a new selection, run, mock injection or clear advances the token, and a
//! response carrying a superseded token is discarded on arrival. Latest
//! user intent wins; a slow earlier request can never overwrite state set
//! by a later call.

use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::client::{AnalysisBackend, AnalysisError, HttpAnalysisClient};
use crate::model::{AnalysisRequest, AnalysisResult, Location};

/// Layer name controlling the severity marker overlay.
pub const LAYER_BURN_SEVERITY: &str = "burnSeverity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// The session's observable state. Mutated only through
/// [`AnalysisSession`]; components read it reactively.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub selected_location: Option<Location>,
    pub status: SessionStatus,
    pub result: Option<AnalysisResult>,
    pub error_message: Option<String>,
    pub layer_visibility: HashMap<String, bool>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selected_location: None,
            status: SessionStatus::Idle,
            result: None,
            error_message: None,
            layer_visibility: HashMap::from([(LAYER_BURN_SEVERITY.to_string(), true)]),
        }
    }
}

impl SessionState {
    /// Layers default to visible until toggled.
    pub fn layer_visible(&self, name: &str) -> bool {
        self.layer_visibility.get(name).copied().unwrap_or(true)
    }

    fn select_location(&mut self, location: Location) {
        self.selected_location = Some(location);
        self.result = None;
        self.error_message = None;
        self.status = SessionStatus::Idle;
    }

    fn begin_run(&mut self) {
        self.status = SessionStatus::Running;
        self.error_message = None;
    }

    fn apply_outcome(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        match outcome {
            Ok(result) => {
                self.status = SessionStatus::Succeeded;
                self.result = Some(result);
                self.error_message = None;
            }
            Err(err) => {
                // Keep the previous result visible under the error banner.
                self.status = SessionStatus::Failed;
                self.error_message = Some(err.to_string());
            }
        }
    }

    fn use_mock_result(&mut self, result: AnalysisResult) {
        self.status = SessionStatus::Succeeded;
        self.result = Some(result);
        self.error_message = None;
    }

    fn toggle_layer(&mut self, name: &str) {
        let visible = self.layer_visibility.entry(name.to_string()).or_insert(true);
        *visible = !*visible;
    }

    fn clear(&mut self) {
        self.result = None;
        self.error_message = None;
        self.status = SessionStatus::Idle;
    }
}

/// Handle to the single live session. Cheap to copy into closures and
/// child components; all copies observe the same state.
#[derive(Clone, Copy)]
pub struct AnalysisSession {
    state: RwSignal<SessionState>,
    run_token: RwSignal<u64>,
    api_base_url: StoredValue<String>,
}

impl AnalysisSession {
    pub fn new(api_base_url: String) -> Self {
        Self {
            state: RwSignal::new(SessionState::default()),
            run_token: RwSignal::new(0),
            api_base_url: StoredValue::new(api_base_url),
        }
    }

    /// Read-only view of the session state for reactive consumers.
    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    /// Replace the selected location. Always legal; discards any previous
    /// result or error, returns to `Idle`, and invalidates in-flight runs.
    pub fn select_location(&self, location: Location) {
        self.advance_token();
        self.state.update(|s| s.select_location(location));
    }

    /// Start an analysis against the configured HTTP backend. Fire and
    /// forget: completion lands through the token fence.
    pub fn run_analysis(&self, request: AnalysisRequest) {
        let session = *self;
        let client = HttpAnalysisClient::new(self.api_base_url.get_value());
        spawn_local(async move {
            session.run_analysis_with(&client, request).await;
        });
    }

    /// The full run transition against an arbitrary backend: `Running`,
    /// await the submission, then apply the outcome unless a newer
    /// transition has superseded this run.
    pub async fn run_analysis_with<B: AnalysisBackend>(&self, backend: &B, request: AnalysisRequest) {
        let token = self.begin_run();
        let outcome = backend.submit(&request).await;
        self.finish_run(token, outcome);
    }

    /// Inject a fixed result, bypassing the client entirely. Legal from any
    /// state; never touches the selected location.
    pub fn use_mock_result(&self, result: AnalysisResult) {
        self.advance_token();
        self.state.update(|s| s.use_mock_result(result));
    }

    /// Flip a named overlay's visibility. Pure UI state.
    pub fn toggle_layer(&self, name: &str) {
        self.state.update(|s| s.toggle_layer(name));
    }

    /// Drop the result and error, keeping the selected location.
    pub fn clear(&self) {
        self.advance_token();
        self.state.update(|s| s.clear());
    }

    fn begin_run(&self) -> u64 {
        let token = self.advance_token();
        self.state.update(|s| s.begin_run());
        token
    }

    fn finish_run(&self, token: u64, outcome: Result<AnalysisResult, AnalysisError>) {
        if self.run_token.get_untracked() != token {
            // Superseded while in flight; drop silently.
            return;
        }
        self.state.update(|s| s.apply_outcome(outcome));
    }

    fn advance_token(&self) -> u64 {
        self.run_token
            .try_update(|token| {
                *token += 1;
                *token
            })
            .unwrap_or_default()
    }
}
