use super::config::JwtConfig;
use crate::envelope::Envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Default lifetime of an issued token: one hour
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // Subject (user ID)
    pub iat: i64,    // Issued at
    pub exp: i64,    // Expiration time
    pub jti: String, // JWT ID
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingToken => {
                tracing::debug!("No JWT found in Authorization header or cookie");
                Envelope::fail("A valid token is missing.")
                    .with_help("Send it as 'Authorization: Bearer <token>'.")
                    .into_response(StatusCode::UNAUTHORIZED)
            }
            AuthError::InvalidToken(e) => {
                tracing::debug!(error = %e, "JWT verification failed");
                Envelope::fail("The token is invalid or has expired.")
                    .with_help("Request a new token.")
                    .into_response(StatusCode::UNAUTHORIZED)
            }
            AuthError::Signing(e) => {
                tracing::error!(error = %e, "Failed to sign JWT");
                Envelope::fail("An internal server error occurred.")
                    .into_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Stateless HS256 bearer tokens.
///
/// Cheap to clone; keys are built once and shared.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        tracing::debug!("JWT auth initialized");
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
        }
    }

    /// Sign a token for `subject` that expires after `ttl_secs`.
    pub fn issue_token(&self, subject: &str, ttl_secs: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            jti: Uuid::now_v7().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthError::Signing)
    }

    /// Verify signature and expiry, returning the decoded claims.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}
