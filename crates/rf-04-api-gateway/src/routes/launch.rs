//! `/api/launch` routes.

use super::{created, event_stream, payload, wants_event_stream, AppState};
use crate::domain::{ApiError, LaunchRocketRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared_types::{Launch, LaunchId};
use tracing::{debug, info};

/// `GET /api/launch`, as JSON or as a change stream.
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if wants_event_stream(&headers) {
        debug!("Streaming launch records");
        return event_stream(state.launches.stream_changes(), &state).into_response();
    }
    Json(state.launches.list()).into_response()
}

/// `GET /api/launch/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Launch>, ApiError> {
    let id = id.parse::<LaunchId>()?;
    Ok(Json(state.launches.get(id)?))
}

/// `POST /api/launch`
pub async fn launch(
    State(state): State<AppState>,
    body: Result<Json<LaunchRocketRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let LaunchRocketRequest { rocket } = payload(body)?;

    let launch = state
        .launches
        .launch(rocket)
        .map_err(ApiError::launch_failed)?;
    info!(
        launch = %launch.id,
        "Launching rocket {}. Warhead: {}, target: (latitude: {}, longitude: {})",
        rocket,
        launch.rocket.warhead,
        launch.rocket.target.latitude,
        launch.rocket.target.longitude
    );

    Ok(created(format!("/api/launch/{}", launch.id), &launch))
}
