//! Product domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Product domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Units currently available for reservation into carts
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product creation / full-replacement data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewProduct {
    /// Product name, unique within the catalog
    #[schema(example = "Widget")]
    pub name: String,
    /// Free-form description
    #[schema(example = "A very useful widget")]
    pub description: String,
    /// Unit price
    #[schema(example = 2.5)]
    pub price: f64,
    /// Available stock
    #[schema(example = 10)]
    pub quantity: i32,
}

/// Product response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    /// Unique product identifier
    pub id: Uuid,
    /// Product name
    #[schema(example = "Widget")]
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Unit price
    #[schema(example = 2.5)]
    pub price: f64,
    /// Available stock
    #[schema(example = 10)]
    pub quantity: i32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
        }
    }
}
