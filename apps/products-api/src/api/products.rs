//! Products API routes

use axum::Router;
use domain_products::{PgProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create products router backed by PostgreSQL
pub fn router(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::with_pagination(repository, state.config.pagination);
    handlers::router(service, state.auth.clone())
}
