//! Bearer JWT authentication.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/products/", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware));
//! let app = protected.merge(token_router(auth));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use config::JwtConfig;
pub use jwt::{AuthError, JwtAuth, JwtClaims, TokenPair, TokenType};
pub use middleware::jwt_auth_middleware;
pub use routes::{TokenApiDoc, token_router};
