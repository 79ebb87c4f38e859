//! `/api/rockets` routes.

use super::{created, event_stream, payload, wants_event_stream, AppState};
use crate::domain::{ApiError, ChangeStatusRequest, ChangeTargetRequest, ChangeWarheadRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rf_02_rocket_lifecycle::{AddRocketCommand, MergeRocketCommand, UpdateRocketCommand};
use shared_types::{Rocket, RocketId, TargetCoordinates};
use tracing::{debug, info};

type JsonBody<T> = Result<Json<T>, JsonRejection>;

fn rocket_id(raw: &str) -> Result<RocketId, ApiError> {
    Ok(raw.parse::<RocketId>()?)
}

/// `GET /api/rockets`, as JSON or as a change stream.
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if wants_event_stream(&headers) {
        debug!("Streaming rocket changes");
        return event_stream(state.rockets.stream_changes(), &state).into_response();
    }
    Json(state.rockets.list()).into_response()
}

/// `POST /api/rockets`
pub async fn create(
    State(state): State<AppState>,
    body: JsonBody<AddRocketCommand>,
) -> Result<Response, ApiError> {
    let command = payload(body)?;
    info!(
        "Adding new rocket. Warhead: {}, target: (latitude: {}, longitude: {})",
        command.warhead, command.target.latitude, command.target.longitude
    );

    let rocket = state.rockets.create(command)?;
    Ok(created(format!("/api/rockets/{}", rocket.id), &rocket))
}

/// `GET /api/rockets/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Rocket>, ApiError> {
    Ok(Json(state.rockets.get(rocket_id(&id)?)?))
}

/// `PUT /api/rockets/:id`
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody<UpdateRocketCommand>,
) -> Result<Json<Rocket>, ApiError> {
    let id = rocket_id(&id)?;
    let command = payload(body)?;
    info!(
        "Updating rocket {}. Warhead: {}, status: {}, target: (latitude: {}, longitude: {})",
        id, command.warhead, command.status, command.target.latitude, command.target.longitude
    );

    Ok(Json(state.rockets.replace(id, command)?))
}

/// `PATCH /api/rockets/:id`
pub async fn merge(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody<MergeRocketCommand>,
) -> Result<Json<Rocket>, ApiError> {
    let id = rocket_id(&id)?;
    let command = payload(body)?;
    info!(changes = ?command, "Patching rocket {}", id);

    Ok(Json(state.rockets.merge(id, command)?))
}

/// `DELETE /api/rockets/:id`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Rocket>, ApiError> {
    let id = rocket_id(&id)?;
    info!("Removing rocket {}", id);

    Ok(Json(state.rockets.remove(id)?))
}

/// `PATCH /api/rockets/:id/status`
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody<ChangeStatusRequest>,
) -> Result<Json<Rocket>, ApiError> {
    let id = rocket_id(&id)?;
    let ChangeStatusRequest { status } = payload(body)?;
    info!("Changing status of rocket {} to {}", id, status);

    Ok(Json(state.rockets.patch_status(id, status)?))
}

/// `PATCH /api/rockets/:id/warhead`
pub async fn change_warhead(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody<ChangeWarheadRequest>,
) -> Result<Json<Rocket>, ApiError> {
    let id = rocket_id(&id)?;
    let ChangeWarheadRequest { warhead } = payload(body)?;
    info!("Changing warhead of rocket {} to {}", id, warhead);

    Ok(Json(state.rockets.patch_warhead(id, warhead)?))
}

/// `PATCH /api/rockets/:id/target`
pub async fn change_target(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody<ChangeTargetRequest>,
) -> Result<Json<Rocket>, ApiError> {
    let id = rocket_id(&id)?;
    let target = TargetCoordinates::from(payload(body)?);
    info!(
        "Changing target of rocket {} to (latitude: {}, longitude: {})",
        id, target.latitude, target.longitude
    );

    Ok(Json(state.rockets.patch_target(id, target)?))
}
