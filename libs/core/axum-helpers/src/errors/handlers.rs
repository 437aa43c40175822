use axum::{
    http::Method,
    response::{IntoResponse, Response},
};

use super::AppError;

/// Router fallback for unknown paths
pub async fn not_found() -> Response {
    AppError::not_found().into_response()
}

/// Router fallback for known paths hit with an unsupported method
pub async fn method_not_allowed(method: Method) -> Response {
    AppError::MethodNotAllowed(format!("Method \"{}\" not allowed.", method)).into_response()
}
