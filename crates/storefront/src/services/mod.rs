//! Business logic services.

pub mod auth;
pub mod checkout;

pub use auth::{AuthError, AuthService};
pub use checkout::{CheckoutError, CheckoutForm, SHIPPING_FEE, build_draft, mint_order_id};
