//! Cart route handlers.
//!
//! The cart lives in the visitor's session: it is read at the start of
//! each operation, mutated through the state machine in `ruouvan-core`,
//! and written back after every mutation. A blob that fails to parse is
//! treated as an empty cart rather than an error.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use ruouvan_core::{Cart, CartProduct, ProductId};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the cart blob from the session; absent or unparseable means empty.
pub(crate) async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the full cart state (items and derived totals) back to the
/// session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist cart: {e}")))
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: i32,
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

/// Current cart state.
pub async fn show(session: Session) -> Json<Cart> {
    Json(load_cart(&session).await)
}

/// Add one unit of a product to the cart.
///
/// The product's display fields are copied into the cart line here, at add
/// time; the line will not follow later catalog edits.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<Cart>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(request.product_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let mut cart = load_cart(&session).await;
    cart.add_item(CartProduct {
        id: product.id,
        name: product.name,
        price: product.price,
        image: product.image,
        kind: product.kind,
    });
    save_cart(&session, &cart).await?;

    Ok(Json(cart))
}

/// Set a cart line's quantity; zero or less removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Path(id): Path<i32>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<Cart>> {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(ProductId::new(id), request.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(cart))
}

/// Remove a cart line; no-op if absent.
#[instrument(skip(session))]
pub async fn remove(session: Session, Path(id): Path<i32>) -> Result<Json<Cart>> {
    let mut cart = load_cart(&session).await;
    cart.remove_item(ProductId::new(id));
    save_cart(&session, &cart).await?;

    Ok(Json(cart))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<Cart>> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(cart))
}
