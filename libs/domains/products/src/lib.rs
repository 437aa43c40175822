//! Products Domain
//!
//! CRUD for the `Product` resource with field validation, price/name
//! filtering and page-number pagination.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints behind bearer auth
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← schema parsing, validation, pagination
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + in-memory and PostgreSQL implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, filters, changes
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let auth = JwtAuth::new(&JwtConfig::new("a-secret-that-is-at-least-32-chars!").unwrap());
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let router = handlers::router(service, auth);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod repository;
pub mod schema;
pub mod service;
pub mod validation;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{ListProductsParams, NewProduct, Product, ProductChanges, ProductFilter};
pub use pagination::{PageRequest, PageUrl, PaginatedProducts, PaginationConfig, ProductList, ProductPage};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use schema::{ProductInput, Requirement};
pub use service::ProductService;
