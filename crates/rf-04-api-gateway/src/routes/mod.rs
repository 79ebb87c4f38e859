//! HTTP routes.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/health` | `admin::health` |
//! | GET, POST | `/api/rockets` | `rockets::list`, `rockets::create` |
//! | GET, PUT, PATCH, DELETE | `/api/rockets/:id` | `rockets::{get, replace, merge, remove}` |
//! | PATCH | `/api/rockets/:id/{status,warhead,target}` | `rockets::change_*` |
//! | GET, POST | `/api/launch` | `launch::list`, `launch::launch` |
//! | GET | `/api/launch/:id` | `launch::get` |
//! | DELETE | `/admin/state` | `admin::reset_state` (when enabled) |
//!
//! List routes answer with a server-sent event stream instead of a JSON
//! array when the client accepts `text/event-stream`.

pub mod admin;
pub mod launch;
pub mod rockets;

use crate::domain::{ApiError, GatewayConfig};
use crate::middleware::AuthLayer;
use crate::ports::StateReset;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use futures::{Stream, StreamExt};
use rf_02_rocket_lifecycle::RocketsApi;
use rf_03_launch_control::LaunchApi;
use serde::Serialize;
use shared_bus::ChangeStream;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared state of every handler.
#[derive(Clone)]
pub struct AppState {
    pub rockets: Arc<dyn RocketsApi>,
    pub launches: Arc<dyn LaunchApi>,
    pub reset: Option<Arc<dyn StateReset>>,
    pub keep_alive: Duration,
    /// Flips to `true` when the server shuts down; open event streams end.
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    /// State with no reset port and a shutdown signal that never fires.
    pub fn new(rockets: Arc<dyn RocketsApi>, launches: Arc<dyn LaunchApi>) -> Self {
        let (_, shutdown) = watch::channel(false);
        Self {
            rockets,
            launches,
            reset: None,
            keep_alive: Duration::from_secs(15),
            shutdown,
        }
    }

    pub fn with_reset(mut self, reset: Arc<dyn StateReset>) -> Self {
        self.reset = Some(reset);
        self
    }

    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = shutdown;
        self
    }
}

/// Builds the full router with its middleware.
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(admin::health))
        .route("/api/rockets", get(rockets::list).post(rockets::create))
        .route(
            "/api/rockets/:id",
            get(rockets::get)
                .put(rockets::replace)
                .patch(rockets::merge)
                .delete(rockets::remove),
        )
        .route("/api/rockets/:id/status", patch(rockets::change_status))
        .route("/api/rockets/:id/warhead", patch(rockets::change_warhead))
        .route("/api/rockets/:id/target", patch(rockets::change_target))
        .route("/api/launch", get(launch::list).post(launch::launch))
        .route("/api/launch/:id", get(launch::get));

    if config.admin.enable_state_reset {
        router = router.route("/admin/state", delete(admin::reset_state));
    }

    // Each layer wraps everything added before it: the last one runs first.
    router
        .layer(RequestBodyLimitLayer::new(config.limits.max_request_size_bytes))
        .layer(TimeoutLayer::new(config.limits.request_timeout()))
        .layer(AuthLayer::new(config.auth.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unwraps a JSON body. Every rejection but an oversized body is a 400.
pub(crate) fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::new(status, rejection.body_text())
    })
}

/// `201 Created` with a `Location` header.
pub(crate) fn created<T: Serialize>(location: String, body: &T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}

/// Whether the client asked for a server-sent event stream.
pub(crate) fn wants_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(|media| media.trim().starts_with("text/event-stream"))
}

/// Renders a change stream as server-sent events named by change kind.
///
/// The stream ends when the feed disconnects the subscriber or the server
/// shuts down.
pub(crate) fn event_stream<V>(
    changes: ChangeStream<V>,
    state: &AppState,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>>
where
    V: Serialize + Clone + Send + Sync + 'static,
{
    let mut shutdown = state.shutdown.clone();
    let stopped = async move {
        let signalled = shutdown.wait_for(|stopping| *stopping).await.is_ok();
        // A dropped sender means nobody will ever shut this stream down.
        if !signalled {
            std::future::pending::<()>().await;
        }
    };

    let events = changes
        .map(|change| {
            Event::default()
                .event(change.kind().as_str())
                .json_data(&change)
        })
        .take_until(stopped);

    Sse::new(events).keep_alive(KeepAlive::new().interval(state.keep_alive))
}
