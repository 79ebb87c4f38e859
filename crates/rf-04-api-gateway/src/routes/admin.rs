//! Health and administrative routes.

use super::AppState;
use crate::domain::ApiError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "UP" }))
}

/// `DELETE /admin/state`
pub async fn reset_state(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let reset = state
        .reset
        .as_ref()
        .ok_or_else(|| ApiError::not_found("State reset is not available"))?;

    info!("Clearing all rockets and launch records");
    reset.clear_all();
    Ok(StatusCode::NO_CONTENT)
}
