//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod cart;
pub mod password;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem, CartItemChange, CartLine, OrderSummary};
pub use password::Password;
pub use product::{NewProduct, Product, ProductResponse};
pub use user::{NewUser, ProfileUpdate, User, UserResponse};
