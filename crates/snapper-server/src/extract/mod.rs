//! Request extractors with wire-contract error responses.

mod json;
mod validate_json;

pub use json::Json;
pub use validate_json::ValidateJson;
