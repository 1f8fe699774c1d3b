//! Product catalog handlers.
//!
//! The catalog addresses products by name on every route, mirroring
//! the external surface.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewProduct, ProductResponse};
use crate::errors::AppResult;
use crate::types::{ListParams, MessageResponse};

/// Product creation / full-replacement request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    /// Product name, unique within the catalog
    #[validate(length(min = 1, message = "Product name is required"))]
    #[schema(example = "Widget")]
    pub name: String,
    /// Free-form description
    #[schema(example = "A very useful widget")]
    pub description: String,
    /// Unit price, non-negative
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    #[schema(example = 2.5)]
    pub price: f64,
    /// Available stock, non-negative
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    #[schema(example = 10)]
    pub quantity: i32,
}

impl From<ProductRequest> for NewProduct {
    fn from(request: ProductRequest) -> Self {
        NewProduct {
            name: request.name,
            description: request.description,
            price: request.price,
            quantity: request.quantity,
        }
    }
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/create-product", post(create_product))
        .route("/products/:name", get(get_product))
        .route("/product_list", get(product_list))
        .route("/delete/:name", delete(delete_product))
        .route("/update/:name", put(update_product))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products/create-product",
    tag = "products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let product = state.catalog_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Get a product by name
#[utoipa::path(
    get,
    path = "/products/products/{name}",
    tag = "products",
    params(("name" = String, Path, description = "Product name")),
    responses(
        (status = 200, description = "Product record", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.catalog_service.get_by_name(&name).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// List a page of products
#[utoipa::path(
    get,
    path = "/products/product_list",
    tag = "products",
    params(
        ("skip" = Option<u64>, Query, description = "Records to skip"),
        ("limit" = Option<u64>, Query, description = "Maximum records to return")
    ),
    responses(
        (status = 200, description = "Page of products", body = Vec<ProductResponse>)
    )
)]
pub async fn product_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state
        .catalog_service
        .list(params.skip, params.limit())
        .await?;

    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// Delete a product by name
#[utoipa::path(
    delete,
    path = "/products/delete/{name}",
    tag = "products",
    params(("name" = String, Path, description = "Product name")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog_service.delete(&name).await?;
    Ok(Json(MessageResponse::new(format!(
        "Product with name {} deleted successfully",
        name
    ))))
}

/// Fully replace a product's fields
#[utoipa::path(
    put,
    path = "/products/update/{name}",
    tag = "products",
    params(("name" = String, Path, description = "Product name")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.catalog_service.update(&name, payload.into()).await?;
    Ok(Json(ProductResponse::from(product)))
}
