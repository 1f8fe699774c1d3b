//! Product repository implementation.
//!
//! The catalog surface addresses products by name, so all lookups and
//! mutations here key on the unique name column.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::domain::{NewProduct, Product};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new catalog record
    async fn create(&self, product: NewProduct) -> AppResult<Product>;

    /// Find product by name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>>;

    /// List a page of products
    async fn list(&self, skip: u64, limit: u64) -> AppResult<Vec<Product>>;

    /// Fully replace a product's fields; None if the name is unknown
    async fn update_by_name(&self, name: &str, replacement: NewProduct)
        -> AppResult<Option<Product>>;

    /// Delete product by name; false if the name is unknown
    async fn delete_by_name(&self, name: &str) -> AppResult<bool>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            quantity: Set(product.quantity),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Product::from(model))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        let result = ProductEntity::find()
            .filter(product::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn list(&self, skip: u64, limit: u64) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .order_by_asc(product::Column::Name)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn update_by_name(
        &self,
        name: &str,
        replacement: NewProduct,
    ) -> AppResult<Option<Product>> {
        let existing = ProductEntity::find()
            .filter(product::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.name = Set(replacement.name);
        active.description = Set(replacement.description);
        active.price = Set(replacement.price);
        active.quantity = Set(replacement.quantity);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(Product::from(model)))
    }

    async fn delete_by_name(&self, name: &str) -> AppResult<bool> {
        let result = ProductEntity::delete_many()
            .filter(product::Column::Name.eq(name))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
