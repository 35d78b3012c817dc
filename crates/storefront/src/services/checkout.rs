//! Checkout: turning a cart plus shipping details into an order draft.
//!
//! The draft-building step is pure - it validates preconditions and form
//! fields, computes the total, snapshots the cart - so the whole submission
//! contract is testable without a database. The route hands the resulting
//! [`OrderDraft`] to the order repository, and clears the cart only after
//! the repository confirms the write.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Deserialize;
use thiserror::Error;

use ruouvan_core::{Cart, Email, OrderId, OrderStatus, Vnd};

use crate::models::{CurrentUser, CustomerInfo, OrderDraft, PaymentMethod};

/// Flat shipping fee per order, in đồng.
pub const SHIPPING_FEE: Vnd = Vnd::new(30_000);

/// Checkout form as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Client-minted token for deduplicating resubmissions.
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// Why a checkout attempt was rejected before touching the database.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart holds no items; there is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more form fields failed validation.
    #[error("invalid checkout form")]
    Invalid(Vec<String>),
}

/// Build an order draft from the current session state and the submitted
/// form.
///
/// All local preconditions are checked here, before anything reaches the
/// database: the cart must be non-empty and every required field present.
/// Field problems are collected into one list so the customer sees every
/// reason at once.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] or [`CheckoutError::Invalid`] with
/// the collected reasons.
pub fn build_draft(
    user: &CurrentUser,
    cart: &Cart,
    form: CheckoutForm,
    order_id: OrderId,
    now: DateTime<Utc>,
) -> Result<OrderDraft, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut reasons = Vec::new();

    let name = form.name.trim();
    if name.is_empty() {
        reasons.push("name is required".to_owned());
    }

    let email = form.email.trim();
    if email.is_empty() {
        reasons.push("email is required".to_owned());
    } else if Email::parse(email).is_err() {
        reasons.push("email is not a valid address".to_owned());
    }

    let phone = form.phone.trim();
    if phone.is_empty() {
        reasons.push("phone is required".to_owned());
    }

    let address = form.address.trim();
    if address.is_empty() {
        reasons.push("address is required".to_owned());
    }

    if !reasons.is_empty() {
        return Err(CheckoutError::Invalid(reasons));
    }

    let customer_info = CustomerInfo {
        name: name.to_owned(),
        email: email.to_owned(),
        phone: phone.to_owned(),
        address: address.to_owned(),
        notes: form.notes.trim().to_owned(),
        payment_method: form.payment_method,
    };

    Ok(OrderDraft {
        id: order_id,
        user_id: user.id,
        items: cart.items.clone(),
        customer_info,
        total: cart.total + SHIPPING_FEE,
        status: OrderStatus::Pending,
        idempotency_key: form
            .idempotency_key
            .map(|k| k.trim().to_owned())
            .filter(|k| !k.is_empty()),
        created_at: now,
    })
}

/// Mint a new order ID: `ORDER_<millis>_<9 random alphanumerics>`.
#[must_use]
pub fn mint_order_id(now: DateTime<Utc>) -> OrderId {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();

    OrderId::new(format!(
        "ORDER_{}_{}",
        now.timestamp_millis(),
        suffix.to_lowercase()
    ))
}
