//! Health check.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::super::state::AppState;

/// GET / - Service name, status and version.
pub async fn index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "started_at": state.started_at.to_rfc3339(),
    }))
}
