//! Status API request handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, Json};
use serde::Deserialize;
use serde_json::json;

use crate::inspect::{CachedVerdict, VerdictCache};
use crate::security::{evaluate_security_state, SecuritySnapshot, Verdict};
use crate::status::error::{StatusError, StatusResult};
use crate::status::html;
use crate::{APP_NAME, VERSION};

/// Shared state for the status API
#[derive(Clone)]
pub struct StatusState {
    /// Verdict cache owned by the monitor
    pub cache: Arc<VerdictCache>,
}

/// Liveness probe
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": APP_NAME,
        "version": VERSION,
    }))
}

/// Serve the embedded status page
pub async fn serve_ui() -> Html<&'static str> {
    Html(html::ui_html())
}

/// List all cached verdicts
pub async fn list_verdicts(State(state): State<StatusState>) -> Json<Vec<CachedVerdict>> {
    Json(state.cache.all().await)
}

/// Fetch the cached verdict for one target
///
/// Returns 404 for unknown targets, including ones whose verdict was
/// evicted when the tab closed.
pub async fn get_verdict(
    State(state): State<StatusState>,
    Path(target_id): Path<String>,
) -> StatusResult<Json<CachedVerdict>> {
    state
        .cache
        .get(&target_id)
        .await
        .map(Json)
        .ok_or_else(|| StatusError::NotFound(format!("no verdict for target {}", target_id)))
}

/// Request body for ad-hoc snapshot evaluation
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Hostname to evaluate against
    pub hostname: String,

    /// Security snapshot; absent means "browser reported nothing"
    #[serde(default)]
    pub snapshot: Option<SecuritySnapshot>,
}

/// Evaluate a caller-supplied snapshot
///
/// Exposes the pure evaluation core directly, mainly for debugging what a
/// given snapshot would produce.
pub async fn evaluate(Json(request): Json<EvaluateRequest>) -> StatusResult<Json<Verdict>> {
    if request.hostname.trim().is_empty() {
        return Err(StatusError::BadRequest("hostname is required".to_string()));
    }

    let verdict = evaluate_security_state(request.snapshot.as_ref(), request.hostname.trim());
    Ok(Json(verdict))
}
