//! Cart handlers. Every route requires a bearer token; the acting user
//! is the token's subject.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CartItemChange, CartLine};
use crate::errors::AppResult;
use crate::services::CartCreation;
use crate::types::MessageResponse;

/// Add-item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddItemRequest {
    /// Product to reserve
    #[validate(length(min = 1, message = "Product name is required"))]
    #[schema(example = "Widget")]
    pub product_name: String,
    /// Units to reserve
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    #[schema(example = 4, minimum = 1)]
    pub quantity: i32,
}

/// Remove-item query parameters
#[derive(Debug, Deserialize)]
pub struct RemoveItemParams {
    /// Product whose line should be removed
    pub product_name: String,
}

/// Create cart routes
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/new-cart", post(create_cart))
        .route("/view-items", get(view_items))
        .route("/add-item", post(add_item))
        .route("/remove-product", delete(remove_product))
        .route("/delete-cart", delete(delete_cart))
}

/// Create a new empty cart for the authenticated user
#[utoipa::path(
    post,
    path = "/carts/new-cart",
    tag = "carts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart created or already present", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User does not exist")
    )
)]
pub async fn create_cart(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    let message = match state.cart_service.create_cart(&current_user.username).await? {
        CartCreation::Created => "Cart is empty. Add products to your cart",
        CartCreation::AlreadyExists => {
            "You already have a cart. You can add products to your cart."
        }
    };

    Ok(Json(MessageResponse::new(message)))
}

/// View all products in the authenticated user's cart
#[utoipa::path(
    get,
    path = "/carts/view-items",
    tag = "carts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart lines with subtotals", body = Vec<CartLine>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No cart or no items")
    )
)]
pub async fn view_items(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CartLine>>> {
    let lines = state.cart_service.view_cart(&current_user.username).await?;
    Ok(Json(lines))
}

/// Reserve a product into the authenticated user's cart
#[utoipa::path(
    post,
    path = "/carts/add-item",
    tag = "carts",
    security(("bearer_auth" = [])),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Product reserved", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User, cart, or product missing"),
        (status = 406, description = "Not enough stock")
    )
)]
pub async fn add_item(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddItemRequest>,
) -> AppResult<Json<MessageResponse>> {
    let change = state
        .cart_service
        .add_item(&current_user.username, &payload.product_name, payload.quantity)
        .await?;

    let message = match change {
        CartItemChange::Inserted => "Product added successfully",
        CartItemChange::Incremented => "Product updated successfully",
    };

    Ok(Json(MessageResponse::new(message)))
}

/// Remove a product from the authenticated user's cart
#[utoipa::path(
    delete,
    path = "/carts/remove-product",
    tag = "carts",
    security(("bearer_auth" = [])),
    params(("product_name" = String, Query, description = "Product to remove")),
    responses(
        (status = 200, description = "Product removed and stock restored", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User, cart, product, or line missing")
    )
)]
pub async fn remove_product(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(params): Query<RemoveItemParams>,
) -> AppResult<Json<MessageResponse>> {
    state
        .cart_service
        .remove_item(&current_user.username, &params.product_name)
        .await?;

    Ok(Json(MessageResponse::new("Product removed successfully")))
}

/// Delete the authenticated user's cart
#[utoipa::path(
    delete,
    path = "/carts/delete-cart",
    tag = "carts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart deleted, reservations restored", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User or cart missing")
    )
)]
pub async fn delete_cart(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    state.cart_service.delete_cart(&current_user.username).await?;
    Ok(Json(MessageResponse::new("User cart deleted")))
}
