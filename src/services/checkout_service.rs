//! Checkout service - order total preview.
//!
//! Read-only aggregation over the user's cart: no state transition,
//! no transaction record, the cart is left untouched.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::OrderSummary;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Checkout service trait for dependency injection.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Compute the order summary for a user's cart
    async fn order_summary(&self, username: &str) -> AppResult<OrderSummary>;
}

/// Concrete implementation of CheckoutService using Unit of Work.
pub struct CheckoutManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CheckoutManager<U> {
    /// Create new checkout service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CheckoutService for CheckoutManager<U> {
    async fn order_summary(&self, username: &str) -> AppResult<OrderSummary> {
        let user = self
            .uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User does not exist"))?;

        let cart = self
            .uow
            .carts()
            .find_by_user(user.id)
            .await?
            .ok_or_else(|| AppError::not_found("User cart does not exist"))?;

        let lines = self.uow.carts().lines(cart.id).await?;
        if lines.is_empty() {
            return Err(AppError::not_found("No product has been added to cart"));
        }

        Ok(OrderSummary::from_lines(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cart, CartLine, User};
    use crate::infra::repositories::{
        MockCartRepository, MockProductRepository, MockUserRepository,
    };
    use crate::infra::{CartRepository, ProductRepository, UserRepository};
    use chrono::Utc;
    use uuid::Uuid;

    struct TestUow {
        users: Arc<MockUserRepository>,
        carts: Arc<MockCartRepository>,
    }

    impl UnitOfWork for TestUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn products(&self) -> Arc<dyn ProductRepository> {
            Arc::new(MockProductRepository::new())
        }

        fn carts(&self) -> Arc<dyn CartRepository> {
            self.carts.clone()
        }
    }

    fn service(users: MockUserRepository, carts: MockCartRepository) -> CheckoutManager<TestUow> {
        CheckoutManager::new(Arc::new(TestUow {
            users: Arc::new(users),
            carts: Arc::new(carts),
        }))
    }

    fn test_user() -> User {
        User::new(
            Uuid::from_u128(1),
            "jdoe".to_string(),
            "jdoe@example.com".to_string(),
            "John Doe".to_string(),
            "hashed".to_string(),
        )
    }

    fn test_cart() -> Cart {
        Cart {
            id: Uuid::from_u128(2),
            user_id: Uuid::from_u128(1),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn summary_totals_all_lines() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(test_user())));
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_user()
            .returning(|_| Ok(Some(test_cart())));
        carts.expect_lines().returning(|_| {
            Ok(vec![
                CartLine::new("Widget".to_string(), 4, 2.5),
                CartLine::new("Gadget".to_string(), 1, 5.0),
            ])
        });

        let summary = service(users, carts).order_summary("jdoe").await.unwrap();
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.total_amount, 15.0);
    }

    #[tokio::test]
    async fn summary_of_empty_cart_is_not_found() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(test_user())));
        let mut carts = MockCartRepository::new();
        carts
            .expect_find_by_user()
            .returning(|_| Ok(Some(test_cart())));
        carts.expect_lines().returning(|_| Ok(vec![]));

        let result = service(users, carts).order_summary("jdoe").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn summary_without_cart_is_not_found() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(test_user())));
        let mut carts = MockCartRepository::new();
        carts.expect_find_by_user().returning(|_| Ok(None));

        let result = service(users, carts).order_summary("jdoe").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
