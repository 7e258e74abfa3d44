use super::jwt::{AuthError, JwtAuth, JwtClaims};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};

/// Name of the cookie checked when no `Authorization` header is sent
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Extract JWT from Authorization header or cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .or_else(|| {
            headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let (name, value) = cookie.trim().split_once('=')?;
                        (name == ACCESS_TOKEN_COOKIE).then(|| value.to_string())
                    })
                })
        })
        .filter(|token| !token.is_empty())
}

/// Gate for endpoints that need a valid bearer token.
///
/// The [`JwtAuth`] verifier is taken from router state, so any state that
/// implements `FromRef` for it works:
///
/// ```ignore
/// async fn me(RequireAuth(claims): RequireAuth) -> String {
///     claims.sub
/// }
///
/// let app = Router::new().route("/me", get(me)).with_state(jwt_auth);
/// ```
///
/// Put it first in the handler's argument list so unauthenticated requests
/// are rejected before any other extractor runs.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub JwtClaims);

impl<S> FromRequestParts<S> for RequireAuth
where
    JwtAuth: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers).ok_or(AuthError::MissingToken)?;
        let claims = JwtAuth::from_ref(state).verify_token(&token)?;
        Ok(RequireAuth(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    async fn whoami(RequireAuth(claims): RequireAuth) -> String {
        claims.sub
    }

    fn setup() -> (Router, JwtAuth) {
        let auth = JwtAuth::new(&JwtConfig::new("s3cret"));
        let app = Router::new()
            .route("/me", get(whoami))
            .with_state(auth.clone());
        (app, auth)
    }

    #[test]
    fn test_extract_token_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer from-header".parse().unwrap());
        headers.insert(header::COOKIE, "access_token=from-cookie".parse().unwrap());
        assert_eq!(extract_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; access_token=from-cookie".parse().unwrap(),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_extract_token_ignores_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwdw==".parse().unwrap());
        assert_eq!(extract_token(&headers), None);
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let (app, auth) = setup();
        let token = auth.issue_token("user-1", 60).unwrap();

        let response = app
            .oneshot(
                Request::get("/me")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let (app, _) = setup();
        let response = app
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_forged_token_is_unauthorized() {
        let (app, _) = setup();
        let forged = JwtAuth::new(&JwtConfig::new("not-the-secret"))
            .issue_token("user-1", 60)
            .unwrap();

        let response = app
            .oneshot(
                Request::get("/me")
                    .header("authorization", format!("Bearer {}", forged))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
