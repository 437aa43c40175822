//! Reusable OpenAPI response types for consistent API documentation.

use super::{ErrorResponse, FieldErrors};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - one or more fields failed validation",
    content_type = "application/json",
    example = json!({
        "name": ["Field 'name' must have at least 3 characters"],
        "price": ["This field is required."]
    })
)]
pub struct ValidationErrorResponse(pub FieldErrors);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({"detail": "Not found."})
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - missing or invalid bearer token",
    content_type = "application/json",
    example = json!({"detail": "Authentication credentials were not provided."})
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({"detail": "A server error occurred."})
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
