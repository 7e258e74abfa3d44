//! Bearer token authentication.
//!
//! Tokens are HS256 JWTs signed with the application secret key. Protected
//! handlers take [`RequireAuth`] as their first argument.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, RequireAuth};
//!
//! let auth = JwtAuth::new(&JwtConfig::from_settings(&settings)?);
//! let token = auth.issue_token(&user_id.to_string(), DEFAULT_TOKEN_TTL_SECS)?;
//! ```

pub mod config;
pub mod extractor;
pub mod jwt;

pub use config::JwtConfig;
pub use extractor::{ACCESS_TOKEN_COOKIE, RequireAuth};
pub use jwt::{AuthError, DEFAULT_TOKEN_TTL_SECS, JwtAuth, JwtClaims};
