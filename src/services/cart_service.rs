//! Cart service - cart lifecycle and inventory reservation workflow.
//!
//! The service resolves the acting user and their cart, then delegates
//! each inventory-affecting mutation to the cart repository where it
//! runs as one atomic transaction.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Cart, CartItemChange, CartLine, Product, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Outcome of a cart creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartCreation {
    /// A fresh empty cart was created
    Created,
    /// The user already owns a cart; nothing was changed
    AlreadyExists,
}

/// Cart service trait for dependency injection.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Create an empty cart for the user unless one already exists
    async fn create_cart(&self, username: &str) -> AppResult<CartCreation>;

    /// List the cart's lines joined with product name and price
    async fn view_cart(&self, username: &str) -> AppResult<Vec<CartLine>>;

    /// Reserve a quantity of a product into the user's cart
    async fn add_item(
        &self,
        username: &str,
        product_name: &str,
        quantity: i32,
    ) -> AppResult<CartItemChange>;

    /// Remove a product's line entirely, restoring its stock
    async fn remove_item(&self, username: &str, product_name: &str) -> AppResult<()>;

    /// Delete the user's cart, restoring all reserved stock
    async fn delete_cart(&self, username: &str) -> AppResult<()>;
}

/// Concrete implementation of CartService using Unit of Work.
pub struct CartManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CartManager<U> {
    /// Create new cart service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn require_user(&self, username: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User does not exist"))
    }

    async fn require_cart(&self, user: &User) -> AppResult<Cart> {
        self.uow
            .carts()
            .find_by_user(user.id)
            .await?
            .ok_or_else(|| AppError::not_found("User cart does not exist"))
    }

    async fn require_product(&self, name: &str) -> AppResult<Product> {
        self.uow
            .products()
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product with name {} not found", name)))
    }
}

#[async_trait]
impl<U: UnitOfWork> CartService for CartManager<U> {
    async fn create_cart(&self, username: &str) -> AppResult<CartCreation> {
        let user = self.require_user(username).await?;

        if self.uow.carts().find_by_user(user.id).await?.is_some() {
            return Ok(CartCreation::AlreadyExists);
        }

        self.uow.carts().create(user.id).await?;
        Ok(CartCreation::Created)
    }

    async fn view_cart(&self, username: &str) -> AppResult<Vec<CartLine>> {
        let user = self.require_user(username).await?;
        let cart = self.require_cart(&user).await?;

        let lines = self.uow.carts().lines(cart.id).await?;
        if lines.is_empty() {
            return Err(AppError::not_found("No item has been added to your cart"));
        }

        Ok(lines)
    }

    async fn add_item(
        &self,
        username: &str,
        product_name: &str,
        quantity: i32,
    ) -> AppResult<CartItemChange> {
        if quantity <= 0 {
            return Err(AppError::validation("Quantity must be greater than zero"));
        }

        let user = self.require_user(username).await?;
        let cart = self.require_cart(&user).await?;
        let product = self.require_product(product_name).await?;

        // Availability is re-checked atomically inside the repository.
        self.uow.carts().add_item(cart.id, product.id, quantity).await
    }

    async fn remove_item(&self, username: &str, product_name: &str) -> AppResult<()> {
        let user = self.require_user(username).await?;
        let cart = self.require_cart(&user).await?;
        let product = self.require_product(product_name).await?;

        self.uow.carts().remove_item(cart.id, product.id).await
    }

    async fn delete_cart(&self, username: &str) -> AppResult<()> {
        let user = self.require_user(username).await?;
        let cart = self.require_cart(&user).await?;

        self.uow.carts().delete_cart(cart.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{
        MockCartRepository, MockProductRepository, MockUserRepository,
    };
    use crate::infra::{CartRepository, ProductRepository, UserRepository};
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    struct TestUow {
        users: Arc<MockUserRepository>,
        products: Arc<MockProductRepository>,
        carts: Arc<MockCartRepository>,
    }

    impl TestUow {
        fn new(
            users: MockUserRepository,
            products: MockProductRepository,
            carts: MockCartRepository,
        ) -> Self {
            Self {
                users: Arc::new(users),
                products: Arc::new(products),
                carts: Arc::new(carts),
            }
        }
    }

    impl UnitOfWork for TestUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn products(&self) -> Arc<dyn ProductRepository> {
            self.products.clone()
        }

        fn carts(&self) -> Arc<dyn CartRepository> {
            self.carts.clone()
        }
    }

    const USER_ID: Uuid = Uuid::from_u128(1);
    const CART_ID: Uuid = Uuid::from_u128(2);
    const PRODUCT_ID: Uuid = Uuid::from_u128(3);

    fn test_user() -> User {
        User::new(
            USER_ID,
            "jdoe".to_string(),
            "jdoe@example.com".to_string(),
            "John Doe".to_string(),
            "hashed".to_string(),
        )
    }

    fn test_cart() -> Cart {
        Cart {
            id: CART_ID,
            user_id: USER_ID,
            created_at: Utc::now(),
        }
    }

    fn widget(quantity: i32) -> Product {
        Product {
            id: PRODUCT_ID,
            name: "Widget".to_string(),
            description: "A very useful widget".to_string(),
            price: 2.5,
            quantity,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn users_with_jdoe() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .with(eq("jdoe"))
            .returning(|_| Ok(Some(test_user())));
        users
    }

    fn service(
        users: MockUserRepository,
        products: MockProductRepository,
        carts: MockCartRepository,
    ) -> CartManager<TestUow> {
        CartManager::new(Arc::new(TestUow::new(users, products, carts)))
    }

    #[tokio::test]
    async fn create_cart_for_unknown_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let result = service(users, MockProductRepository::new(), MockCartRepository::new())
            .create_cart("ghost")
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_cart_is_informational_when_one_exists() {
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_user()
            .with(eq(USER_ID))
            .returning(|_| Ok(Some(test_cart())));

        let outcome = service(users_with_jdoe(), MockProductRepository::new(), carts)
            .create_cart("jdoe")
            .await
            .unwrap();
        assert_eq!(outcome, CartCreation::AlreadyExists);
    }

    #[tokio::test]
    async fn create_cart_creates_when_absent() {
        let mut carts = MockCartRepository::new();
        carts.expect_find_by_user().returning(|_| Ok(None));
        carts
            .expect_create()
            .with(eq(USER_ID))
            .returning(|_| Ok(test_cart()));

        let outcome = service(users_with_jdoe(), MockProductRepository::new(), carts)
            .create_cart("jdoe")
            .await
            .unwrap();
        assert_eq!(outcome, CartCreation::Created);
    }

    #[tokio::test]
    async fn view_empty_cart_is_not_found() {
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_user()
            .returning(|_| Ok(Some(test_cart())));
        carts.expect_lines().returning(|_| Ok(vec![]));

        let result = service(users_with_jdoe(), MockProductRepository::new(), carts)
            .view_cart("jdoe")
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn view_cart_returns_joined_lines() {
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_user()
            .returning(|_| Ok(Some(test_cart())));
        carts
            .expect_lines()
            .with(eq(CART_ID))
            .returning(|_| Ok(vec![CartLine::new("Widget".to_string(), 4, 2.5)]));

        let lines = service(users_with_jdoe(), MockProductRepository::new(), carts)
            .view_cart("jdoe")
            .await
            .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_name, "Widget");
        assert_eq!(lines[0].price, 10.0);
    }

    #[tokio::test]
    async fn add_item_rejects_non_positive_quantity() {
        let result = service(
            MockUserRepository::new(),
            MockProductRepository::new(),
            MockCartRepository::new(),
        )
        .add_item("jdoe", "Widget", 0)
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn add_item_for_missing_product_is_not_found() {
        let mut products = MockProductRepository::new();
        products.expect_find_by_name().returning(|_| Ok(None));
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_user()
            .returning(|_| Ok(Some(test_cart())));

        let result = service(users_with_jdoe(), products, carts)
            .add_item("jdoe", "Nothing", 1)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn add_item_exceeding_stock_is_not_acceptable() {
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_name()
            .returning(|_| Ok(Some(widget(6))));
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_user()
            .returning(|_| Ok(Some(test_cart())));
        carts
            .expect_add_item()
            .with(eq(CART_ID), eq(PRODUCT_ID), eq(7))
            .returning(|_, _, _| {
                Err(AppError::not_acceptable(
                    "Not enough product at the moment, 6 left",
                ))
            });

        let result = service(users_with_jdoe(), products, carts)
            .add_item("jdoe", "Widget", 7)
            .await;
        match result {
            Err(AppError::NotAcceptable(msg)) => assert!(msg.contains("6 left")),
            other => panic!("expected NotAcceptable, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn add_item_reserves_into_cart() {
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_name()
            .with(eq("Widget"))
            .returning(|_| Ok(Some(widget(10))));
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_user()
            .returning(|_| Ok(Some(test_cart())));
        carts
            .expect_add_item()
            .with(eq(CART_ID), eq(PRODUCT_ID), eq(4))
            .returning(|_, _, _| Ok(CartItemChange::Inserted));

        let change = service(users_with_jdoe(), products, carts)
            .add_item("jdoe", "Widget", 4)
            .await
            .unwrap();
        assert_eq!(change, CartItemChange::Inserted);
    }

    #[tokio::test]
    async fn remove_item_releases_reservation() {
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_name()
            .returning(|_| Ok(Some(widget(6))));
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_user()
            .returning(|_| Ok(Some(test_cart())));
        carts
            .expect_remove_item()
            .with(eq(CART_ID), eq(PRODUCT_ID))
            .returning(|_, _| Ok(()));

        let result = service(users_with_jdoe(), products, carts)
            .remove_item("jdoe", "Widget")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn delete_cart_without_cart_is_not_found() {
        let mut carts = MockCartRepository::new();
        carts.expect_find_by_user().returning(|_| Ok(None));

        let result = service(users_with_jdoe(), MockProductRepository::new(), carts)
            .delete_cart("jdoe")
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
