use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldErrors};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Invalid page.")]
    InvalidPage,

    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<FieldErrors> for ProductError {
    fn from(errors: FieldErrors) -> Self {
        ProductError::Validation(errors)
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::not_found(),
            ProductError::InvalidPage => AppError::NotFound("Invalid page.".to_string()),
            ProductError::Validation(errors) => AppError::Validation(errors),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ProductError::NotFound(1), StatusCode::NOT_FOUND),
            (ProductError::InvalidPage, StatusCode::NOT_FOUND),
            (
                ProductError::Validation(FieldErrors::single("price", "This field is required.")),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductError::Database(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_not_found_hides_id() {
        let app_error: AppError = ProductError::NotFound(42).into();
        assert!(matches!(app_error, AppError::NotFound(ref detail) if detail == "Not found."));
    }
}
