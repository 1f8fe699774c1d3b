//! Repository aggregate over a shared connection pool.
//!
//! `Persistence` hands the service layer its repositories from one
//! place so services depend on a single abstraction instead of three.
//! Transaction boundaries live inside the repositories themselves:
//! each inventory-affecting cart operation is one atomic unit.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    CartRepository, CartStore, ProductRepository, ProductStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get product repository
    fn products(&self) -> Arc<dyn ProductRepository>;

    /// Get cart repository
    fn carts(&self) -> Arc<dyn CartRepository>;
}

/// Concrete implementation of UnitOfWork backed by the database pool
pub struct Persistence {
    user_repo: Arc<UserStore>,
    product_repo: Arc<ProductStore>,
    cart_repo: Arc<CartStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            product_repo: Arc::new(ProductStore::new(db.clone())),
            cart_repo: Arc::new(CartStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    fn carts(&self) -> Arc<dyn CartRepository> {
        self.cart_repo.clone()
    }
}
