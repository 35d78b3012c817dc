//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness check
//! GET    /health/ready              - Readiness check (DB connectivity)
//!
//! # Auth
//! POST   /api/auth/register         - Register and establish a session
//! POST   /api/auth/login            - Login and establish a session
//! POST   /api/auth/logout           - Clear the session
//! GET    /api/auth/me               - Current session user
//!
//! # Catalog
//! GET    /api/products              - Product listing (filters)
//! GET    /api/products/{id}         - Product detail
//! POST   /api/products              - Create product        (admin)
//! PUT    /api/products/{id}         - Replace product       (admin)
//! DELETE /api/products/{id}         - Delete product        (admin)
//!
//! # Cart (session-backed)
//! GET    /api/cart                  - Current cart
//! POST   /api/cart/items            - Add one unit of a product
//! PUT    /api/cart/items/{id}       - Set a line's quantity (<= 0 removes)
//! DELETE /api/cart/items/{id}       - Remove a line
//! DELETE /api/cart                  - Clear the cart
//!
//! # Checkout & Orders
//! POST   /api/checkout              - Submit the cart as an order
//! GET    /api/orders                - Order listing (scoped; stale fallback)
//! GET    /api/orders/{id}           - Order detail (owner or admin)
//! PUT    /api/orders/{id}/status    - Status transition (admin, or owner cancel)
//! DELETE /api/orders/{id}           - Delete order          (admin)
//!
//! # Admin
//! GET    /api/admin/users           - User listing          (admin)
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", put(cart::update).delete(cart::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show).delete(orders::delete))
        .route("/{id}/status", put(orders::update_status))
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .route("/api/checkout", post(checkout::submit))
        .nest("/api/orders", order_routes())
        .route("/api/admin/users", get(users::index))
}
