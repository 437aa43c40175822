//! Application state management

use axum_helpers::JwtAuth;
use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
    pub auth: JwtAuth,
}
