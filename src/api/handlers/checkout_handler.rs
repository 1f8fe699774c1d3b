//! Checkout handlers.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::OrderSummary;
use crate::errors::AppResult;

/// Checkout query parameters
#[derive(Debug, Deserialize)]
pub struct CheckoutParams {
    /// User whose cart should be totalled
    pub username: String,
}

/// Create transaction routes
pub fn transaction_routes() -> Router<AppState> {
    Router::new().route("/checkout", get(checkout))
}

/// Preview the order total for a user's cart
#[utoipa::path(
    get,
    path = "/transactions/checkout",
    tag = "transactions",
    params(("username" = String, Query, description = "Cart owner")),
    responses(
        (status = 200, description = "Itemized order summary", body = OrderSummary),
        (status = 404, description = "User, cart, or items missing")
    )
)]
pub async fn checkout(
    State(state): State<AppState>,
    Query(params): Query<CheckoutParams>,
) -> AppResult<Json<OrderSummary>> {
    let summary = state.checkout_service.order_summary(&params.username).await?;
    Ok(Json(summary))
}
