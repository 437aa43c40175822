//! Extractors that turn request data into typed values or an [`AppError`](crate::AppError).

pub mod id_path;
pub mod json_object;
pub mod validated_json;

pub use id_path::IdPath;
pub use json_object::JsonObject;
pub use validated_json::ValidatedJson;
