//! Catalog service - product CRUD.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::MAX_LIST_LIMIT;
use crate::domain::{NewProduct, Product};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Catalog service trait for dependency injection.
///
/// Products are addressed by name across the whole surface.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Store a new product
    async fn create(&self, product: NewProduct) -> AppResult<Product>;

    /// Get a product by name
    async fn get_by_name(&self, name: &str) -> AppResult<Product>;

    /// List a page of products
    async fn list(&self, skip: u64, limit: u64) -> AppResult<Vec<Product>>;

    /// Fully replace a product's fields
    async fn update(&self, name: &str, replacement: NewProduct) -> AppResult<Product>;

    /// Delete a product by name
    async fn delete(&self, name: &str) -> AppResult<()>;
}

fn product_not_found(name: &str) -> AppError {
    AppError::not_found(format!("Product with name {} not found", name))
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct Catalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Catalog<U> {
    /// Create new catalog service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for Catalog<U> {
    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        self.uow.products().create(product).await
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Product> {
        self.uow
            .products()
            .find_by_name(name)
            .await?
            .ok_or_else(|| product_not_found(name))
    }

    async fn list(&self, skip: u64, limit: u64) -> AppResult<Vec<Product>> {
        self.uow
            .products()
            .list(skip, limit.min(MAX_LIST_LIMIT))
            .await
    }

    async fn update(&self, name: &str, replacement: NewProduct) -> AppResult<Product> {
        self.uow
            .products()
            .update_by_name(name, replacement)
            .await?
            .ok_or_else(|| product_not_found(name))
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        if self.uow.products().delete_by_name(name).await? {
            Ok(())
        } else {
            Err(product_not_found(name))
        }
    }
}
