//! Handler tests for the Users domain
//!
//! These drive the users router end to end over the in-memory repository:
//! envelopes, status codes, the token gate and the three read modes.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

struct TestApp {
    repo: InMemoryUserRepository,
    auth: JwtAuth,
    token: String,
}

impl TestApp {
    fn new() -> Self {
        Self::with_repo(InMemoryUserRepository::new())
    }

    fn with_repo(repo: InMemoryUserRepository) -> Self {
        let auth = JwtAuth::new(&JwtConfig::new("users-handler-test-secret"));
        let token = auth.issue_token("operator", 300).unwrap();
        Self { repo, auth, token }
    }

    fn router(&self) -> Router {
        handlers::router(UserService::new(self.repo.clone()), self.auth.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        (status, json_body(response.into_body()).await)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn post(&self, payload: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Create a user over HTTP and return its id
    async fn create(&self, name: &str, email: &str) -> Uuid {
        let (status, body) = self
            .post(json!({
                "email": email,
                "name": name,
                "password": "hunter2",
                "phone_number": "0712345678"
            }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);

        let message = body["message"].as_str().unwrap();
        let id = message
            .strip_prefix("User with id ")
            .and_then(|rest| rest.strip_suffix(" was created."))
            .unwrap();
        Uuid::parse_str(id).unwrap()
    }
}

#[tokio::test]
async fn test_create_user_returns_201_with_basic_role_and_wallet() {
    let app = TestApp::new();

    let id = app.create("Ada Lovelace", "ada@example.com").await;

    let (status, body) = app.get(&format!("/{}/roles", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["roles"][0]["title"], "basic");

    let (status, body) = app.get(&format!("/{}/wallet", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["wallet"]["balance"], 0);
}

#[tokio::test]
async fn test_create_user_does_not_require_token() {
    let app = TestApp::new();

    let (status, body) = app
        .post(json!({
            "email": "grace@example.com",
            "name": "Grace",
            "password": "hunter2",
            "phone_number": "0712345678"
        }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_create_user_lists_exactly_the_missing_fields() {
    let app = TestApp::new();

    let (status, body) = app
        .post(json!({"email": "ada@example.com", "password": "   "}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Not all fields were provided.");
    assert_eq!(body["missing"], json!(["name", "password", "phone_number"]));

    // nothing was stored
    let (status, _) = app.get("/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_rejects_non_json_body() {
    let app = TestApp::new();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = TestApp::new();
    app.create("Ada", "ada@example.com").await;

    let (status, body) = app
        .post(json!({
            "email": "ada@example.com",
            "name": "Impostor",
            "password": "hunter2",
            "phone_number": "0700000000"
        }))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_create_without_basic_role_is_internal_error() {
    let app = TestApp::with_repo(InMemoryUserRepository::empty());

    let (status, body) = app
        .post(json!({
            "email": "ada@example.com",
            "name": "Ada",
            "password": "hunter2",
            "phone_number": "0712345678"
        }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "An internal server error occurred.");
}

#[tokio::test]
async fn test_get_user_excludes_password() {
    let app = TestApp::new();
    let id = app.create("Ada", "ada@example.com").await;

    let (status, body) = app.get(&format!("/{}", id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["id"], id.to_string());
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_get_unknown_user_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get(&format!("/{}", Uuid::now_v7())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The user does not exist.");
    assert_eq!(body["help"], "Ensure arguments are of existent object.");
}

#[tokio::test]
async fn test_search_by_name() {
    let app = TestApp::new();
    let ada = app.create("Ada Lovelace", "ada@example.com").await;
    app.create("Grace Hopper", "grace@example.com").await;

    let (status, body) = app.get("/?q=lovelace").await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], ada.to_string());

    let (status, body) = app.get("/?q=turing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No users with the name in the database.");
}

#[tokio::test]
async fn test_search_keeps_surrounding_whitespace() {
    let app = TestApp::new();
    app.create("Ada", "ada@example.com").await;
    let grace = app.create("Grace Hopper", "grace@example.com").await;

    let (status, body) = app.get("/?q=%20").await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], grace.to_string());

    let (status, _) = app.get("/?q=%20ada").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users() {
    let app = TestApp::new();

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No users in the database.");

    app.create("Ada", "ada@example.com").await;
    app.create("Grace", "grace@example.com").await;

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada", "Grace"]);
}

#[tokio::test]
async fn test_boards_and_roles_treat_empty_differently() {
    let app = TestApp::new();
    let id = app.create("Ada", "ada@example.com").await;

    let (status, body) = app.get(&format!("/{}/boards", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The user is not in any boards.");

    app.repo.clear_roles(id).await;
    let (status, body) = app.get(&format!("/{}/roles", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["roles"], json!([]));
}

#[tokio::test]
async fn test_user_boards() {
    let app = TestApp::new();
    let id = app.create("Ada", "ada@example.com").await;
    let board = app.repo.insert_board("Analytical Engine", &[id]).await;

    let (status, body) = app.get(&format!("/{}/boards", id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["boards"][0]["id"], board.id.to_string());
    assert_eq!(body["data"]["boards"][0]["title"], "Analytical Engine");
}

#[tokio::test]
async fn test_read_endpoints_require_token() {
    let app = TestApp::new();
    let id = app.create("Ada", "ada@example.com").await;

    for uri in [
        "/".to_string(),
        "/?q=ada".to_string(),
        format!("/{}", id),
        format!("/{}/boards", id),
        format!("/{}/roles", id),
        format!("/{}/wallet", id),
    ] {
        let request = Request::builder().uri(&uri).body(Body::empty()).unwrap();
        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} let a request through", uri);
        assert_eq!(body["status"], "fail");
    }
}

#[tokio::test]
async fn test_token_from_another_secret_is_rejected() {
    let app = TestApp::new();
    let forged = JwtAuth::new(&JwtConfig::new("some-other-secret"))
        .issue_token("intruder", 300)
        .unwrap();

    let request = Request::builder()
        .uri("/")
        .header(header::AUTHORIZATION, format!("Bearer {}", forged))
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
