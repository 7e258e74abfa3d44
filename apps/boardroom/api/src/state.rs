//! Application state management.
//!
//! Built once in `serve` and handed to the routers; handlers never read the
//! process environment themselves.

use axum_helpers::JwtAuth;
use core_config::Settings;
use core_config::server::ServerConfig;
use database::postgres::DatabaseConnection;

/// Shared application state.
///
/// Cloned per router (inexpensive: the pool and the token keys are shared).
#[derive(Clone)]
pub struct AppState {
    /// Settings resolved for the selected environment
    pub settings: Settings,
    pub server: ServerConfig,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// Signs and verifies bearer tokens
    pub auth: JwtAuth,
}

