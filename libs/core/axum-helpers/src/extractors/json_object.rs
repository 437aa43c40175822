//! JSON request body that must be an object.

use crate::errors::{AppError, FieldErrors, NON_FIELD_ERRORS};
use axum::extract::{FromRequest, Json, Request};
use serde_json::{Map, Value};

/// Raw JSON object body.
///
/// Handlers that need to tell an absent field apart from `null` work on the
/// map directly instead of a derived struct. Rejections:
///
/// - malformed JSON: 400 `{"detail": "JSON parse error - ..."}`
/// - wrong content type: 415
/// - any non-object value: 400 `{"non_field_errors": ["Invalid data. Expected a dictionary, but got list."]}`
#[derive(Debug, Clone, Default)]
pub struct JsonObject(pub Map<String, Value>);

/// Name of a JSON value's type as reported back to clients
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            other => Err(AppError::Validation(FieldErrors::single(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(&other)
                ),
            ))),
        }
    }
}
