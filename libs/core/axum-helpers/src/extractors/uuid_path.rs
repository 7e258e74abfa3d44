//! UUID path parameter extractor.

use crate::envelope::Envelope;
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Parses a single `{id}` path segment as a UUID.
///
/// A malformed id is rejected with a 400 envelope instead of axum's plain
/// text rejection.
///
/// ```ignore
/// async fn get_user(UuidPath(id): UuidPath) -> String {
///     format!("User ID: {}", id)
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Uuid::parse_str(&id).map(UuidPath).map_err(|_| {
            Envelope::fail(format!("Invalid id: {}", id))
                .with_help("Ids are UUIDs, e.g. 0190a5f2-7c3e-7d41-9a0b-2f1d3c4b5a69.")
                .into_response(StatusCode::BAD_REQUEST)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn echo(UuidPath(id): UuidPath) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new().route("/{id}", get(echo))
    }

    #[tokio::test]
    async fn test_valid_uuid() {
        let id = Uuid::now_v7();
        let response = app()
            .oneshot(Request::get(format!("/{}", id)).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_uuid_is_bad_request() {
        let response = app()
            .oneshot(Request::get("/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
