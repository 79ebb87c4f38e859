//! API key authentication and role checks.
//!
//! | Route | Requirement |
//! |-------|-------------|
//! | `/health` | none |
//! | `POST /api/launch` | key with role `rockets_launch` |
//! | `/admin/*` | key with role `admin` |
//! | everything else | any configured key |
//!
//! Keys are read from `Authorization: Bearer <key>` or `X-API-Key`. With no
//! credentials configured every request passes.

use crate::domain::{ApiError, AuthConfig, Credential, ADMIN_ROLE, LAUNCH_ROLE};
use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};

/// What a request must present to reach its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Open,
    Authenticated,
    Role(&'static str),
}

/// Access requirement of a route.
pub fn required_access(method: &Method, path: &str) -> Access {
    if path == "/health" {
        Access::Open
    } else if path.starts_with("/admin/") || path == "/admin" {
        Access::Role(ADMIN_ROLE)
    } else if method == Method::POST && path.trim_end_matches('/') == "/api/launch" {
        Access::Role(LAUNCH_ROLE)
    } else {
        Access::Authenticated
    }
}

/// Authentication layer
#[derive(Clone)]
pub struct AuthLayer {
    config: Arc<AuthConfig>,
}

impl AuthLayer {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    config: Arc<AuthConfig>,
}

impl<S> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let config = Arc::clone(&self.config);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if let Err(rejection) = authorize(&req, &config) {
                return Ok(rejection);
            }
            inner.call(req).await
        })
    }
}

/// Checks the request against the route's requirement.
fn authorize<B>(req: &Request<B>, config: &AuthConfig) -> Result<(), Response> {
    if !config.is_enabled() {
        return Ok(());
    }

    let access = required_access(req.method(), req.uri().path());
    if access == Access::Open {
        return Ok(());
    }

    let Some(credential) = presented_key(req).and_then(|key| find_credential(config, key)) else {
        warn!(path = req.uri().path(), "Request without a valid API key");
        return Err(unauthorized_response("A valid API key is required"));
    };

    debug!(
        path = req.uri().path(),
        access = ?access,
        roles = ?credential.roles,
        "Checking route authorization"
    );

    match access {
        Access::Role(role) if !credential.has_role(role) => {
            warn!(path = req.uri().path(), role, "Request without required role");
            Err(ApiError::forbidden(format!("Role '{role}' is required")).into_response())
        }
        _ => Ok(()),
    }
}

/// Key from `Authorization: Bearer` or `X-API-Key`.
fn presented_key<B>(req: &Request<B>) -> Option<&str> {
    if let Some(auth) = req.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.trim());
            }
        }
    }

    req.headers()
        .get("x-api-key")
        .and_then(|key| key.to_str().ok())
}

/// Compares against every configured key so the lookup time does not
/// depend on which credential matched.
fn find_credential<'a>(config: &'a AuthConfig, key: &str) -> Option<&'a Credential> {
    config
        .credentials
        .iter()
        .fold(None, |found, credential| {
            let matches = constant_time_compare(key, &credential.key);
            found.or(matches.then_some(credential))
        })
}

/// Constant-time string comparison to prevent timing attacks
///
/// Both inputs are padded to the longer length with different bytes, and the
/// lengths are compared with `subtle` as well.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    let max_len = std::cmp::max(a.len(), b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];

    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}

/// 401 with a `WWW-Authenticate` challenge.
fn unauthorized_response(message: &str) -> Response {
    let mut response = ApiError::unauthorized(message).into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}
