//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{cart_handler, checkout_handler, product_handler, user_handler};
use crate::domain::{CartLine, OrderSummary, ProductResponse, UserResponse};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the storefront API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "An e-commerce backend with user accounts, a product catalog, carts, and checkout",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::register,
        user_handler::login,
        user_handler::get_profile,
        user_handler::update_profile,
        // Product endpoints
        product_handler::create_product,
        product_handler::get_product,
        product_handler::product_list,
        product_handler::delete_product,
        product_handler::update_product,
        // Cart endpoints
        cart_handler::create_cart,
        cart_handler::view_items,
        cart_handler::add_item,
        cart_handler::remove_product,
        cart_handler::delete_cart,
        // Checkout
        checkout_handler::checkout,
    ),
    components(
        schemas(
            // Domain types
            UserResponse,
            ProductResponse,
            CartLine,
            OrderSummary,
            TokenResponse,
            MessageResponse,
            // Request types
            user_handler::RegisterRequest,
            user_handler::TokenForm,
            user_handler::UpdateProfileRequest,
            product_handler::ProductRequest,
            cart_handler::AddItemRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "Registration, login, and profile management"),
        (name = "products", description = "Product catalog operations"),
        (name = "carts", description = "Cart and reservation operations"),
        (name = "transactions", description = "Checkout preview")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /users/token"))
                        .build(),
                ),
            );
        }
    }
}
