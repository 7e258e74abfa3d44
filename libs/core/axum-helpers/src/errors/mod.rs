//! Fallback handlers and OpenAPI response docs for failure envelopes.

pub mod handlers;
pub mod responses;

pub use handlers::{method_not_allowed, not_found};

/// Shared wording for failure envelopes
pub mod messages {
    pub const INTERNAL_ERROR: &str = "An internal server error occurred.";
    pub const NOT_FOUND_RESOURCE: &str = "The requested resource was not found.";
    pub const METHOD_NOT_ALLOWED: &str = "The HTTP method is not allowed for this resource.";
}
