//! # Axum Helpers
//!
//! Shared HTTP plumbing for the boardroom services.
//!
//! - **[`envelope`]**: the `{status, data, message, help, missing}` response body
//! - **[`extractors`]**: required-field JSON and UUID path extractors
//! - **[`auth`]**: HS256 bearer tokens and the [`RequireAuth`] gate
//! - **[`server`]**: router composition, health endpoints, graceful shutdown
//! - **[`http`]**: security headers middleware
//! - **[`errors`]**: fallback handlers and OpenAPI response docs

pub mod auth;
pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{AuthError, JwtAuth, JwtClaims, JwtConfig, RequireAuth};
pub use envelope::{Envelope, EnvelopeStatus, NoData};
pub use extractors::{FieldCheck, RequiredFields, RequiredJson, UuidPath, check_required};
pub use http::security_headers;
pub use server::{
    HealthCheckFuture, ShutdownCoordinator, create_production_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};
