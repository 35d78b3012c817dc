//! Checkout route handler.
//!
//! Implements the order submission workflow: preconditions and validation
//! first (nothing reaches the database on failure), then a single
//! transactional create. The cart is cleared only after the repository
//! confirms the write, so a failed submission leaves the cart intact for a
//! manual retry.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::orders::OrderRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::routes::cart::{load_cart, save_cart};
use crate::services::{CheckoutForm, build_draft, mint_order_id};
use crate::state::AppState;

/// Submit the current cart as an order.
#[instrument(skip(user, state, session, form), fields(user_id = %user.id))]
pub async fn submit(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await;

    let now = Utc::now();
    let draft = build_draft(&user, &cart, form, mint_order_id(now), now)?;

    // Single attempt; a failure surfaces as-is and the cart stays intact.
    let order: Order = OrderRepository::new(state.pool()).create(&draft).await?;

    let mut cart = cart;
    cart.clear();
    save_cart(&session, &cart).await?;

    state.order_cache().invalidate_user(user.id).await;

    tracing::info!(order_id = %order.id, total = order.total.as_i64(), "Order submitted");

    Ok((StatusCode::CREATED, Json(order)))
}
