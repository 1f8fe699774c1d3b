//! HTTP request handlers.

pub mod cart_handler;
pub mod checkout_handler;
pub mod product_handler;
pub mod user_handler;

pub use cart_handler::cart_routes;
pub use checkout_handler::transaction_routes;
pub use product_handler::product_routes;
pub use user_handler::{profile_routes, public_routes};
