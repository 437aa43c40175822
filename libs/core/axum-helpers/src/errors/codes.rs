//! Numeric error codes attached to every error log line.
//!
//! Clients only ever see the `detail` text; the codes exist so log queries and
//! alerts can group failures without parsing messages.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::NotFound.code(), 1004);
//! assert_eq!(ErrorCode::NotFound.default_message(), "Not found.");
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    BadRequest,
    ValidationError,
    InvalidJson,
    NotFound,
    Unauthorized,
    MethodNotAllowed,
    UnsupportedMediaType,

    // Server errors
    InternalError,
    ServiceUnavailable,

    // Database errors (2000-2999)
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1000,
            Self::ValidationError => 1001,
            Self::InvalidJson => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::ServiceUnavailable => 1011,
            Self::MethodNotAllowed => 1012,
            Self::UnsupportedMediaType => 1013,
            Self::DatabaseError => 2003,
        }
    }

    /// Text used for `detail` when the error carries no message of its own
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Malformed request.",
            Self::ValidationError => "Invalid input.",
            Self::InvalidJson => "JSON parse error",
            Self::NotFound => "Not found.",
            Self::Unauthorized => "Authentication credentials were not provided.",
            Self::MethodNotAllowed => "Method not allowed.",
            Self::UnsupportedMediaType => "Unsupported media type in request.",
            Self::InternalError | Self::DatabaseError => "A server error occurred.",
            Self::ServiceUnavailable => "Service temporarily unavailable, try again later.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_grouped_by_range() {
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::NotFound.code(), 1004);
        assert_eq!(ErrorCode::DatabaseError.code(), 2003);
    }

    #[test]
    fn test_server_errors_share_a_generic_message() {
        assert_eq!(
            ErrorCode::InternalError.default_message(),
            ErrorCode::DatabaseError.default_message()
        );
    }

    #[test]
    fn test_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::MethodNotAllowed).unwrap();
        assert_eq!(json, "\"METHOD_NOT_ALLOWED\"");
        assert_eq!(ErrorCode::MethodNotAllowed.to_string(), "METHOD_NOT_ALLOWED");
    }
}
