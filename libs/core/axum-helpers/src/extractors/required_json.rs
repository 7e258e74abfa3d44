//! JSON body extractor that checks required fields before deserializing.

use crate::envelope::Envelope;
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::Response,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const MISSING_FIELDS_MESSAGE: &str = "Not all fields were provided.";
pub const INVALID_PAYLOAD_MESSAGE: &str = "The request body is not a valid JSON object.";

/// Outcome of a required-field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    Valid,
    Invalid { missing: Vec<String> },
}

impl FieldCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldCheck::Valid)
    }
}

/// Check that every name in `required` is present in `payload` with a
/// non-empty value.
///
/// A field counts as missing when it is absent, `null`, a string of only
/// whitespace, or an empty array or object. `missing` keeps the order of
/// `required`. A payload that is not a JSON object is missing everything.
pub fn check_required(required: &[&str], payload: &Value) -> FieldCheck {
    let missing: Vec<String> = required
        .iter()
        .filter(|field| match payload.get(**field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(Value::Object(map)) => map.is_empty(),
            Some(_) => false,
        })
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        FieldCheck::Valid
    } else {
        FieldCheck::Invalid { missing }
    }
}

/// Request payloads that declare which fields must be present.
pub trait RequiredFields {
    const REQUIRED: &'static [&'static str];
}

/// JSON extractor that rejects with a 400 envelope listing missing fields.
///
/// Bodies that are not JSON, or are JSON but not an object, are rejected
/// with [`INVALID_PAYLOAD_MESSAGE`] before any field is checked.
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct CreateBoard { title: String }
///
/// impl RequiredFields for CreateBoard {
///     const REQUIRED: &'static [&'static str] = &["title"];
/// }
///
/// async fn create_board(RequiredJson(input): RequiredJson<CreateBoard>) { /* ... */ }
/// ```
pub struct RequiredJson<T>(pub T);

impl<T, S> FromRequest<S> for RequiredJson<T>
where
    T: DeserializeOwned + RequiredFields,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "Rejected request body");
                Envelope::fail(INVALID_PAYLOAD_MESSAGE).into_response(StatusCode::BAD_REQUEST)
            })?;

        if !payload.is_object() {
            return Err(
                Envelope::fail(INVALID_PAYLOAD_MESSAGE).into_response(StatusCode::BAD_REQUEST)
            );
        }

        if let FieldCheck::Invalid { missing } = check_required(T::REQUIRED, &payload) {
            return Err(Envelope::fail(MISSING_FIELDS_MESSAGE)
                .with_missing(missing)
                .into_response(StatusCode::BAD_REQUEST));
        }

        serde_json::from_value(payload).map(RequiredJson).map_err(|e| {
            Envelope::fail(format!("Invalid field value: {}", e))
                .into_response(StatusCode::BAD_REQUEST)
        })
    }
}
