use axum::{
    Json, Router,
    extract::{OriginalUri, Query, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, JsonObject, JwtAuth,
    errors::responses::{
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
        ValidationErrorResponse,
    },
    jwt_auth_middleware,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{ListProductsParams, Product, ProductRequest};
use crate::pagination::{PageUrl, PaginatedProducts, ProductList};
use crate::repository::ProductRepository;
use crate::schema::Requirement;
use crate::service::ProductService;

pub const TAG: &str = "products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        replace_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductRequest, PaginatedProducts, ProductList),
        responses(
            NotFoundResponse,
            ValidationErrorResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Product routes, all behind bearer authentication
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products/", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .patch(update_product)
                .put(replace_product)
                .delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(shared_service)
}

/// List products filtered by name and price range
#[utoipa::path(
    get,
    path = "/products/",
    tag = TAG,
    params(ListProductsParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated list of products", body = PaginatedProducts),
        (status = 400, response = ValidationErrorResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, description = "Invalid page", body = axum_helpers::ErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(pairs): Query<Vec<(String, String)>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> ProductResult<Json<ProductList>> {
    let params = ListProductsParams::from_pairs(&pairs);
    let url = PageUrl::from_request(&headers, &uri, &pairs);
    let products = service.list_products(&params, &url).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products/",
    tag = TAG,
    request_body = ProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = ValidationErrorResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonObject(payload): JsonObject,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(&payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Partially update a product; only supplied fields change
#[utoipa::path(
    patch,
    path = "/products/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = ValidationErrorResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    JsonObject(payload): JsonObject,
) -> ProductResult<Json<Product>> {
    let product = service
        .update_product(id, &payload, Requirement::Partial)
        .await?;
    Ok(Json(product))
}

/// Replace a product; `name` and `price` are required
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = ValidationErrorResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    JsonObject(payload): JsonObject,
) -> ProductResult<Json<Product>> {
    let product = service
        .update_product(id, &payload, Requirement::Full)
        .await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
