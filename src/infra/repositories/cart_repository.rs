//! Cart repository implementation.
//!
//! Every inventory-affecting mutation (reserve into a cart, release back
//! to stock, drop a whole cart) runs inside a single database transaction.
//! The decrement itself is a conditional update, `quantity = quantity - n
//! WHERE quantity >= n`, so concurrent reservations of the same product
//! cannot drive the remaining stock negative.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::entities::{cart, cart_item, product};
use crate::domain::{Cart, CartItemChange, CartLine};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Cart repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Find the cart owned by a user
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Cart>>;

    /// Create an empty cart for a user
    async fn create(&self, user_id: Uuid) -> AppResult<Cart>;

    /// All line items of a cart joined with their products
    async fn lines(&self, cart_id: Uuid) -> AppResult<Vec<CartLine>>;

    /// Reserve `quantity` units of a product into a cart.
    ///
    /// Atomically re-checks availability, decrements product stock, and
    /// inserts or increments the line item. Fails NOT_ACCEPTABLE when the
    /// requested quantity exceeds the stock on hand.
    async fn add_item(&self, cart_id: Uuid, product_id: Uuid, quantity: i32)
        -> AppResult<CartItemChange>;

    /// Remove a product's line item entirely, restoring its reserved
    /// quantity back onto the product.
    async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> AppResult<()>;

    /// Delete a cart, its line items, and restore all reserved quantities.
    async fn delete_cart(&self, cart_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CartRepository
pub struct CartStore {
    db: DatabaseConnection,
}

impl CartStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepository for CartStore {
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Cart>> {
        let result = cart::Entity::find()
            .filter(cart::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Cart::from))
    }

    async fn create(&self, user_id: Uuid) -> AppResult<Cart> {
        let active_model = cart::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Cart::from(model))
    }

    async fn lines(&self, cart_id: Uuid) -> AppResult<Vec<CartLine>> {
        let rows = cart_item::Entity::find()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .find_also_related(product::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        rows.into_iter()
            .map(|(item, related)| {
                let product = related.ok_or_else(|| {
                    AppError::internal("cart item references a missing product")
                })?;
                Ok(CartLine::new(product.name, item.quantity, product.price))
            })
            .collect()
    }

    async fn add_item(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> AppResult<CartItemChange> {
        self.db
            .transaction::<_, CartItemChange, AppError>(move |txn| {
                Box::pin(async move {
                    // Stock is read inside the transaction; the message below
                    // reports what the caller saw at check time.
                    let stock = product::Entity::find_by_id(product_id)
                        .one(txn)
                        .await
                        .map_err(AppError::from)?
                        .ok_or_else(|| AppError::not_found("Product does not exist"))?;

                    if quantity > stock.quantity {
                        return Err(AppError::not_acceptable(format!(
                            "Not enough product at the moment, {} left",
                            stock.quantity
                        )));
                    }

                    // Conditional decrement: zero affected rows means a
                    // concurrent reservation won the race since the read above.
                    let update = product::Entity::update_many()
                        .col_expr(
                            product::Column::Quantity,
                            Expr::col(product::Column::Quantity).sub(quantity),
                        )
                        .col_expr(
                            product::Column::UpdatedAt,
                            Expr::value(chrono::Utc::now()),
                        )
                        .filter(product::Column::Id.eq(product_id))
                        .filter(product::Column::Quantity.gte(quantity))
                        .exec(txn)
                        .await
                        .map_err(AppError::from)?;

                    if update.rows_affected == 0 {
                        return Err(AppError::not_acceptable(format!(
                            "Not enough product at the moment, {} left",
                            stock.quantity
                        )));
                    }

                    let existing = cart_item::Entity::find()
                        .filter(cart_item::Column::CartId.eq(cart_id))
                        .filter(cart_item::Column::ProductId.eq(product_id))
                        .one(txn)
                        .await
                        .map_err(AppError::from)?;

                    match existing {
                        Some(item) => {
                            let new_quantity = item.quantity + quantity;
                            let mut active: cart_item::ActiveModel = item.into();
                            active.quantity = Set(new_quantity);
                            active.update(txn).await.map_err(AppError::from)?;
                            Ok(CartItemChange::Incremented)
                        }
                        None => {
                            let active = cart_item::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                cart_id: Set(cart_id),
                                product_id: Set(product_id),
                                quantity: Set(quantity),
                            };
                            active.insert(txn).await.map_err(AppError::from)?;
                            Ok(CartItemChange::Inserted)
                        }
                    }
                })
            })
            .await
            .map_err(AppError::from)
    }

    async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> AppResult<()> {
        self.db
            .transaction::<_, (), AppError>(move |txn| {
                Box::pin(async move {
                    let item = cart_item::Entity::find()
                        .filter(cart_item::Column::CartId.eq(cart_id))
                        .filter(cart_item::Column::ProductId.eq(product_id))
                        .one(txn)
                        .await
                        .map_err(AppError::from)?
                        .ok_or_else(|| {
                            AppError::not_found("Product does not exist in cart")
                        })?;

                    let restored = item.quantity;
                    cart_item::Entity::delete_by_id(item.id)
                        .exec(txn)
                        .await
                        .map_err(AppError::from)?;

                    product::Entity::update_many()
                        .col_expr(
                            product::Column::Quantity,
                            Expr::col(product::Column::Quantity).add(restored),
                        )
                        .col_expr(
                            product::Column::UpdatedAt,
                            Expr::value(chrono::Utc::now()),
                        )
                        .filter(product::Column::Id.eq(product_id))
                        .exec(txn)
                        .await
                        .map_err(AppError::from)?;

                    Ok(())
                })
            })
            .await
            .map_err(AppError::from)
    }

    async fn delete_cart(&self, cart_id: Uuid) -> AppResult<()> {
        self.db
            .transaction::<_, (), AppError>(move |txn| {
                Box::pin(async move {
                    let items = cart_item::Entity::find()
                        .filter(cart_item::Column::CartId.eq(cart_id))
                        .all(txn)
                        .await
                        .map_err(AppError::from)?;

                    // Release every reservation back to stock before the
                    // lines disappear.
                    for item in &items {
                        product::Entity::update_many()
                            .col_expr(
                                product::Column::Quantity,
                                Expr::col(product::Column::Quantity).add(item.quantity),
                            )
                            .col_expr(
                                product::Column::UpdatedAt,
                                Expr::value(chrono::Utc::now()),
                            )
                            .filter(product::Column::Id.eq(item.product_id))
                            .exec(txn)
                            .await
                            .map_err(AppError::from)?;
                    }

                    cart_item::Entity::delete_many()
                        .filter(cart_item::Column::CartId.eq(cart_id))
                        .exec(txn)
                        .await
                        .map_err(AppError::from)?;

                    cart::Entity::delete_by_id(cart_id)
                        .exec(txn)
                        .await
                        .map_err(AppError::from)?;

                    Ok(())
                })
            })
            .await
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    const CART_ID: Uuid = Uuid::from_u128(1);
    const PRODUCT_ID: Uuid = Uuid::from_u128(2);
    const ITEM_ID: Uuid = Uuid::from_u128(3);

    fn widget(quantity: i32) -> product::Model {
        let now = chrono::Utc::now();
        product::Model {
            id: PRODUCT_ID,
            name: "Widget".to_string(),
            description: "A very useful widget".to_string(),
            price: 2.5,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    fn widget_item(quantity: i32) -> cart_item::Model {
        cart_item::Model {
            id: ITEM_ID,
            cart_id: CART_ID,
            product_id: PRODUCT_ID,
            quantity,
        }
    }

    fn exec_ok(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    /// Statements issued through the store, flattened for inspection
    fn drain_log(store: CartStore) -> String {
        let CartStore { db } = store;
        format!("{:?}", db.into_transaction_log()).replace("\\\"", "\"")
    }

    #[tokio::test]
    async fn add_item_decrements_stock_with_guarded_update() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widget(10)]])
            .append_exec_results([exec_ok(1)])
            .append_query_results([Vec::<cart_item::Model>::new()])
            .append_query_results([vec![widget_item(4)]])
            .into_connection();
        let store = CartStore::new(db);

        let change = store.add_item(CART_ID, PRODUCT_ID, 4).await.unwrap();
        assert_eq!(change, CartItemChange::Inserted);

        // The decrement must be conditional on remaining stock, not a
        // blind write of a previously read value.
        let log = drain_log(store);
        assert!(log.contains(r#""quantity" = "quantity" - $"#), "{}", log);
        assert!(log.contains(r#""quantity" >= $"#), "{}", log);
    }

    #[tokio::test]
    async fn add_item_increments_existing_line() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widget(10)]])
            .append_exec_results([exec_ok(1)])
            .append_query_results([vec![widget_item(2)]])
            .append_query_results([vec![widget_item(6)]])
            .into_connection();
        let store = CartStore::new(db);

        let change = store.add_item(CART_ID, PRODUCT_ID, 4).await.unwrap();
        assert_eq!(change, CartItemChange::Incremented);
    }

    #[tokio::test]
    async fn add_item_exceeding_stock_is_not_acceptable() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widget(3)]])
            .into_connection();
        let store = CartStore::new(db);

        let err = store.add_item(CART_ID, PRODUCT_ID, 5).await.unwrap_err();
        assert!(
            matches!(&err, AppError::NotAcceptable(msg) if msg == "Not enough product at the moment, 3 left"),
            "{:?}",
            err
        );
    }

    #[tokio::test]
    async fn add_item_losing_the_decrement_race_is_not_acceptable() {
        // Stock reads fine, but another reservation lands first and the
        // guarded update matches no row.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widget(10)]])
            .append_exec_results([exec_ok(0)])
            .into_connection();
        let store = CartStore::new(db);

        let err = store.add_item(CART_ID, PRODUCT_ID, 4).await.unwrap_err();
        assert!(matches!(err, AppError::NotAcceptable(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn remove_item_restores_reserved_quantity() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widget_item(4)]])
            .append_exec_results([exec_ok(1), exec_ok(1)])
            .into_connection();
        let store = CartStore::new(db);

        store.remove_item(CART_ID, PRODUCT_ID).await.unwrap();

        let log = drain_log(store);
        assert!(log.contains(r#""quantity" = "quantity" + $"#), "{}", log);
        assert!(log.contains(r#"DELETE FROM "cart_items""#), "{}", log);
    }

    #[tokio::test]
    async fn remove_item_missing_line_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<cart_item::Model>::new()])
            .into_connection();
        let store = CartStore::new(db);

        let err = store.remove_item(CART_ID, PRODUCT_ID).await.unwrap_err();
        assert!(
            matches!(&err, AppError::NotFound(msg) if msg == "Product does not exist in cart"),
            "{:?}",
            err
        );
    }

    #[tokio::test]
    async fn delete_cart_restores_every_line_before_dropping() {
        let other_item = cart_item::Model {
            id: Uuid::from_u128(4),
            cart_id: CART_ID,
            product_id: Uuid::from_u128(5),
            quantity: 2,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widget_item(4), other_item]])
            .append_exec_results([exec_ok(1), exec_ok(1), exec_ok(2), exec_ok(1)])
            .into_connection();
        let store = CartStore::new(db);

        store.delete_cart(CART_ID).await.unwrap();

        let log = drain_log(store);
        // One restore per line item, then the items, then the cart.
        assert_eq!(log.matches(r#""quantity" = "quantity" + $"#).count(), 2, "{}", log);
        assert!(log.contains(r#"DELETE FROM "cart_items""#), "{}", log);
        assert!(log.contains(r#"DELETE FROM "carts""#), "{}", log);
    }
}
