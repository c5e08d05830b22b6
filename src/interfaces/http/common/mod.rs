//! Shared HTTP plumbing: error rendering and request extraction

pub mod error;
pub mod validated_json;

pub use error::{ApiError, ErrorBody};
pub use validated_json::ValidatedJson;
