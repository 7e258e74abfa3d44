use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::Envelope;
use axum_helpers::errors::messages::INTERNAL_ERROR;
use axum_helpers::extractors::required_json::MISSING_FIELDS_MESSAGE;
use thiserror::Error;
use uuid::Uuid;

pub const USER_NOT_FOUND: &str = "The user does not exist.";
pub const USER_NOT_FOUND_HELP: &str = "Ensure arguments are of existent object.";
pub const NO_MATCHING_USERS: &str = "No users with the name in the database.";
pub const NO_USERS: &str = "No users in the database.";
pub const NO_BOARDS: &str = "The user is not in any boards.";
pub const NO_BOARDS_HELP: &str = "Suggest a board if necessary.";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("No users match '{0}'")]
    NoMatchingUsers(String),

    #[error("No users exist")]
    NoUsers,

    #[error("User {0} is not in any boards")]
    NoBoards(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Role '{0}' does not exist")]
    MissingRole(String),

    #[error("User {0} has no wallet")]
    MissingWallet(Uuid),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserError::MissingFields(_) => StatusCode::BAD_REQUEST,
            UserError::NotFound(_)
            | UserError::NoMatchingUsers(_)
            | UserError::NoUsers
            | UserError::NoBoards(_) => StatusCode::NOT_FOUND,
            UserError::DuplicateEmail(_) => StatusCode::CONFLICT,
            UserError::MissingRole(_)
            | UserError::MissingWallet(_)
            | UserError::PasswordHash(_)
            | UserError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        UserError::Internal(format!("Database error: {}", err))
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let envelope = match self {
            UserError::MissingFields(missing) => {
                Envelope::fail(MISSING_FIELDS_MESSAGE).with_missing(missing)
            }
            UserError::NotFound(_) => {
                Envelope::fail(USER_NOT_FOUND).with_help(USER_NOT_FOUND_HELP)
            }
            UserError::NoMatchingUsers(_) => Envelope::fail(NO_MATCHING_USERS),
            UserError::NoUsers => Envelope::fail(NO_USERS),
            UserError::NoBoards(_) => Envelope::fail(NO_BOARDS).with_help(NO_BOARDS_HELP),
            UserError::DuplicateEmail(email) => {
                Envelope::fail(format!("A user with email '{}' already exists.", email))
            }
            err @ (UserError::MissingRole(_)
            | UserError::MissingWallet(_)
            | UserError::PasswordHash(_)
            | UserError::Internal(_)) => {
                tracing::error!(error = %err, "Request failed");
                Envelope::fail(INTERNAL_ERROR)
            }
        };

        envelope.into_response(status)
    }
}
