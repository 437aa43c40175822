//! # Axum Helpers
//!
//! Shared HTTP plumbing for the workspace services.
//!
//! - **[`auth`]**: HS256 bearer tokens, the auth middleware and `/token/refresh/`
//! - **[`errors`]**: [`AppError`], `{"detail": ...}` bodies and per-field error maps
//! - **[`extractors`]**: integer id paths, raw JSON objects, validated JSON
//! - **[`http`]**: security headers and CORS
//! - **[`server`]**: router assembly, health/readiness, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{JwtAuth, JwtClaims, JwtConfig, TokenType, jwt_auth_middleware, token_router};
pub use errors::{AppError, ErrorCode, ErrorResponse, FieldErrors};
pub use extractors::{IdPath, JsonObject, ValidatedJson};
pub use http::{CorsConfig, security_headers};
pub use server::{
    HealthCheckFuture, ShutdownCoordinator, create_production_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};
