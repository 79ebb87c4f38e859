//! # API Gateway Subsystem
//!
//! **Subsystem ID:** 4
//!
//! ## Purpose
//!
//! The HTTP boundary of rflux. Translates JSON requests into calls on the
//! rocket and launch APIs, maps failures onto HTTP statuses, and serves the
//! change feeds as server-sent event streams.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     ApiGatewayService                        │
//! │                                                              │
//! │  TraceLayer → AuthLayer → TimeoutLayer → RequestBodyLimit    │
//! │                            │                                 │
//! │               ┌────────────┼─────────────┐                   │
//! │               ▼            ▼             ▼                   │
//! │        routes::rockets  routes::launch  routes::admin        │
//! │               │            │             │                   │
//! └───────────────┼────────────┼─────────────┼───────────────────┘
//!                 ▼            ▼             ▼
//!            RocketsApi    LaunchApi     StateReset
//! ```
//!
//! ## Error Mapping
//!
//! | Failure | Status |
//! |---------|--------|
//! | `NotFound` | 404 |
//! | `AlreadyLaunched`, `NotReady`, `IllegalTransition`, `Validation` | 400 |
//! | `DuplicateKey` | 409 |
//! | malformed JSON body or path id | 400 |
//! | missing or unknown API key | 401 |
//! | key without the route's role | 403 |
//!
//! Launch failures are reported as `Launch failed: <stage> (<reason>)`.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod middleware;
pub mod ports;
pub mod routes;
pub mod service;

pub use domain::{
    AdminConfig, ApiError, AuthConfig, ConfigError, Credential, ErrorBody, FeedConfig,
    GatewayConfig, GatewayError, HttpConfig, LimitsConfig, ADMIN_ROLE, LAUNCH_ROLE,
};
pub use middleware::AuthLayer;
pub use ports::StateReset;
pub use routes::{build_router, AppState};
pub use service::ApiGatewayService;
