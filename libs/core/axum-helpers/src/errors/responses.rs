//! Reusable OpenAPI response types for consistent API documentation.

use crate::envelope::{Envelope, NoData};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - required fields missing",
    content_type = "application/json",
    example = json!({
        "status": "fail",
        "message": "Not all fields were provided.",
        "missing": ["email", "password"]
    })
)]
pub struct MissingFieldsResponse(pub Envelope<NoData>);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed id",
    content_type = "application/json",
    example = json!({
        "status": "fail",
        "message": "Invalid id: 42",
        "help": "Ids are UUIDs, e.g. 0190a5f2-7c3e-7d41-9a0b-2f1d3c4b5a69."
    })
)]
pub struct BadRequestUuidResponse(pub Envelope<NoData>);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - missing, invalid or expired token",
    content_type = "application/json",
    example = json!({
        "status": "fail",
        "message": "The token is invalid or has expired.",
        "help": "Request a new token."
    })
)]
pub struct UnauthorizedResponse(pub Envelope<NoData>);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": "fail",
        "message": "The user does not exist.",
        "help": "Ensure arguments are of existent object."
    })
)]
pub struct NotFoundResponse(pub Envelope<NoData>);

#[derive(ToResponse)]
#[response(
    description = "Conflict - resource already exists",
    content_type = "application/json",
    example = json!({
        "status": "fail",
        "message": "A user with this email already exists."
    })
)]
pub struct ConflictResponse(pub Envelope<NoData>);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": "fail",
        "message": "An internal server error occurred."
    })
)]
pub struct InternalServerErrorResponse(pub Envelope<NoData>);
