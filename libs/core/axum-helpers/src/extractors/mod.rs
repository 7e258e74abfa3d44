//! Request extractors that reject with the standard envelope.

pub mod required_json;
pub mod uuid_path;

pub use required_json::{FieldCheck, RequiredFields, RequiredJson, check_required};
pub use uuid_path::UuidPath;
