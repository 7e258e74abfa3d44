use super::messages;
use crate::envelope::Envelope;
use axum::{http::StatusCode, response::Response};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    Envelope::fail(messages::NOT_FOUND_RESOURCE).into_response(StatusCode::NOT_FOUND)
}

pub async fn method_not_allowed() -> Response {
    Envelope::fail(messages::METHOD_NOT_ALLOWED).into_response(StatusCode::METHOD_NOT_ALLOWED)
}
