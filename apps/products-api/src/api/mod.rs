//! API routes module

pub mod health;
pub mod products;

use axum::{Router, routing::get};
use axum_helpers::token_router;

use crate::state::AppState;

/// Product CRUD plus the token refresh endpoint.
///
/// Returns a stateless Router; every sub-router already has its state applied.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(products::router(state))
        .merge(token_router(state.auth.clone()))
}

/// `/ready` with a live database probe
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
