//! JSON extractor that runs `validator::Validate` after deserializing.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the body into `T` and validates it.
///
/// Validation failures become a 400 field error map, the same shape the
/// domain handlers return.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct RefreshRequest {
///     #[validate(length(min = 1, message = "This field may not be blank."))]
///     refresh: String,
/// }
///
/// async fn refresh(ValidatedJson(body): ValidatedJson<RefreshRequest>) -> String {
///     body.refresh
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
