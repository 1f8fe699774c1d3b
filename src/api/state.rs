//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and
//! infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, Persistence};
use crate::services::{
    AuthService, Authenticator, CartManager, CartService, Catalog, CatalogService, CheckoutManager,
    CheckoutService, UserManager, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User profile service
    pub user_service: Arc<dyn UserService>,
    /// Product catalog service
    pub catalog_service: Arc<dyn CatalogService>,
    /// Cart service
    pub cart_service: Arc<dyn CartService>,
    /// Checkout service
    pub checkout_service: Arc<dyn CheckoutService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    ///
    /// Wires every service to the same Unit of Work over the shared
    /// connection pool.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(database.get_connection()));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            catalog_service: Arc::new(Catalog::new(uow.clone())),
            cart_service: Arc::new(CartManager::new(uow.clone())),
            checkout_service: Arc::new(CheckoutManager::new(uow)),
            database,
        }
    }

    /// Create new application state with manually injected services.
    ///
    /// Intended for tests that swap in mock services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        catalog_service: Arc<dyn CatalogService>,
        cart_service: Arc<dyn CartService>,
        checkout_service: Arc<dyn CheckoutService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            catalog_service,
            cart_service,
            checkout_service,
            database,
        }
    }
}
