//! Integer primary key path parameter.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extracts a single `{id}` path segment as an `i64`.
///
/// A segment that is not an integer cannot name any row, so it is rejected
/// with the same 404 as a missing row.
///
/// ```ignore
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("product {id}")
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found())?;

        raw.parse::<i64>().map(IdPath).map_err(|_| {
            tracing::debug!(id = %raw, "Non-integer id in path");
            AppError::not_found()
        })
    }
}
