//! Request bodies of the single-field routes.
//!
//! Create, replace and merge bodies are the lifecycle commands themselves.

use serde::Deserialize;
use shared_types::{RocketId, Status, TargetCoordinates, Warhead};

/// `PATCH /api/rockets/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: Status,
}

/// `PATCH /api/rockets/{id}/warhead`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChangeWarheadRequest {
    pub warhead: Warhead,
}

/// `PATCH /api/rockets/{id}/target`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChangeTargetRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<ChangeTargetRequest> for TargetCoordinates {
    fn from(request: ChangeTargetRequest) -> Self {
        TargetCoordinates::new(request.latitude, request.longitude)
    }
}

/// `POST /api/launch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LaunchRocketRequest {
    pub rocket: RocketId,
}
