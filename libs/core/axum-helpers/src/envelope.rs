//! The JSON envelope every endpoint responds with.
//!
//! ```json
//! {"status": "success", "data": {"users": []}}
//! {"status": "fail", "message": "Not all fields were provided.", "missing": ["email"]}
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Fail,
}

/// Placeholder payload for envelopes that only carry a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoData {}

/// Response body shared by all endpoints.
///
/// `status` is always present; the optional members are omitted from the
/// JSON when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T = NoData> {
    pub status: EnvelopeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Hint on how to correct the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Names of required fields absent from the request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: Some(data),
            message: None,
            help: None,
            missing: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_missing(mut self, missing: Vec<String>) -> Self {
        self.missing = Some(missing);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }
}

impl<T: Serialize> Envelope<T> {
    /// Pair the envelope with a status code.
    pub fn into_response(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl Envelope<NoData> {
    /// Successful outcome described by a message instead of data.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: None,
            message: Some(text.into()),
            help: None,
            missing: None,
        }
    }

    pub fn fail(text: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Fail,
            data: None,
            message: Some(text.into()),
            help: None,
            missing: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_omits_unset_members() {
        let body = serde_json::to_value(Envelope::success(json!({"users": []}))).unwrap();
        assert_eq!(body, json!({"status": "success", "data": {"users": []}}));
    }

    #[test]
    fn test_fail_with_help_and_missing() {
        let envelope = Envelope::fail("Not all fields were provided.")
            .with_help("Send every required field.")
            .with_missing(vec!["email".into(), "password".into()]);

        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(body["status"], "fail");
        assert_eq!(body["missing"], json!(["email", "password"]));
        assert_eq!(body["help"], "Send every required field.");
        assert!(body.get("data").is_none());
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_message_is_success() {
        let body = serde_json::to_value(Envelope::message("done")).unwrap();
        assert_eq!(body, json!({"status": "success", "message": "done"}));
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = Envelope::fail("nope").into_response(StatusCode::NOT_FOUND);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
