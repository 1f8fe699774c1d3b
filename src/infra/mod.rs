//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories and the Unit of Work aggregate

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CartRepository, CartStore, ProductRepository, ProductStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};
