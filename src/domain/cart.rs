//! Cart domain entities and cart/checkout view models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Cart domain entity. A user owns at most one cart.
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A single product reservation inside a cart
#[derive(Debug, Clone, Serialize)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Outcome of adding a product to a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartItemChange {
    /// A new line item was inserted
    Inserted,
    /// An existing line item had its quantity incremented
    Incremented,
}

/// One cart line joined with its product, as shown to the user.
///
/// `price` is the line subtotal: quantity x unit price.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartLine {
    /// Product name
    #[schema(example = "Widget")]
    pub product_name: String,
    /// Reserved quantity
    #[schema(example = 4)]
    pub quantity: i32,
    /// Line subtotal (quantity x unit price)
    #[schema(example = 10.0)]
    pub price: f64,
}

impl CartLine {
    /// Build a line from a reservation and the product's unit price
    pub fn new(product_name: String, quantity: i32, unit_price: f64) -> Self {
        Self {
            product_name,
            quantity,
            price: quantity as f64 * unit_price,
        }
    }
}

/// Checkout preview: all cart lines plus the order total.
///
/// Read-only; computing a summary does not clear the cart or record
/// a transaction. On the wire this is the line array with one final
/// `{"total amount": N}` element appended, not a structured object.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub items: Vec<CartLine>,
    /// Sum of all line subtotals
    pub total_amount: f64,
}

impl OrderSummary {
    /// Aggregate cart lines into a summary
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let total_amount = items.iter().map(|line| line.price).sum();
        Self {
            items,
            total_amount,
        }
    }
}

#[derive(Serialize)]
struct TotalElement {
    #[serde(rename = "total amount")]
    total_amount: f64,
}

impl Serialize for OrderSummary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.items.len() + 1))?;
        for line in &self.items {
            seq.serialize_element(line)?;
        }
        seq.serialize_element(&TotalElement {
            total_amount: self.total_amount,
        })?;
        seq.end()
    }
}

impl<'s> ToSchema<'s> for OrderSummary {
    fn schema() -> (
        &'s str,
        utoipa::openapi::RefOr<utoipa::openapi::schema::Schema>,
    ) {
        use utoipa::openapi::schema::{
            ArrayBuilder, ObjectBuilder, OneOfBuilder, SchemaType,
        };
        use utoipa::openapi::Ref;

        (
            "OrderSummary",
            ArrayBuilder::new()
                .items(
                    OneOfBuilder::new()
                        .item(Ref::from_schema_name("CartLine"))
                        .item(
                            ObjectBuilder::new()
                                .property(
                                    "total amount",
                                    ObjectBuilder::new().schema_type(SchemaType::Number),
                                )
                                .required("total amount"),
                        ),
                )
                .description(Some("Cart lines followed by a total element"))
                .build()
                .into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_price_is_quantity_times_unit_price() {
        let line = CartLine::new("Widget".to_string(), 4, 2.5);
        assert_eq!(line.price, 10.0);
    }

    #[test]
    fn summary_total_is_sum_of_line_subtotals() {
        let summary = OrderSummary::from_lines(vec![
            CartLine::new("Widget".to_string(), 4, 2.5),
            CartLine::new("Gadget".to_string(), 2, 1.25),
        ]);
        assert_eq!(summary.total_amount, 12.5);
        assert_eq!(summary.items.len(), 2);
    }

    #[test]
    fn empty_summary_totals_zero() {
        let summary = OrderSummary::from_lines(vec![]);
        assert_eq!(summary.total_amount, 0.0);
    }

    #[test]
    fn summary_serializes_as_lines_with_trailing_total() {
        let summary = OrderSummary::from_lines(vec![CartLine::new("Widget".to_string(), 4, 2.5)]);
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(
            value,
            serde_json::json!([
                { "product_name": "Widget", "quantity": 4, "price": 10.0 },
                { "total amount": 10.0 }
            ])
        );
    }

    #[test]
    fn empty_summary_serializes_as_total_only() {
        let value = serde_json::to_value(OrderSummary::from_lines(vec![])).unwrap();
        assert_eq!(value, serde_json::json!([{ "total amount": 0.0 }]));
    }
}
