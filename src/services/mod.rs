//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, with repository access through the Unit of
//! Work aggregate.

mod auth_service;
mod cart_service;
mod catalog_service;
mod checkout_service;
mod user_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use cart_service::{CartCreation, CartManager, CartService};
pub use catalog_service::{Catalog, CatalogService};
pub use checkout_service::{CheckoutManager, CheckoutService};
pub use user_service::{UserManager, UserService};
