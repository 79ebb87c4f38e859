//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → Trace → Auth → Timeout → BodyLimit → Handler
//!
//! Tracing, timeouts and body limits come from `tower-http`; authentication
//! is the only layer implemented here.

pub mod auth;

pub use auth::{constant_time_compare, required_access, Access, AuthLayer};
