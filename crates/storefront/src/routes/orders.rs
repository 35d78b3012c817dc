//! Order route handlers.
//!
//! Reads are scoped server-side: a customer only ever sees their own
//! orders, whatever filter they request; admins see everything. The
//! listing degrades to the last cached snapshot when the database read
//! fails transiently - reads only, never writes.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ruouvan_core::{OrderId, OrderStatus, UserId};

use crate::db::RepositoryError;
use crate::db::orders::{OrderRepository, OrderScope};
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::{CurrentUser, Order};
use crate::state::AppState;

/// Order listing query parameters.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Admin-only: restrict the listing to one user's orders.
    pub user_id: Option<i32>,
}

/// Order listing response.
///
/// `stale` is set when the orders come from the read-fallback cache
/// instead of the database; `as_of` is when they were last fetched.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub stale: bool,
    pub as_of: DateTime<Utc>,
}

/// Status transition request body.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    #[serde(default)]
    pub status: String,
}

fn scope_for(user: &CurrentUser, query: &OrderListQuery) -> OrderScope {
    if user.is_admin() {
        query
            .user_id
            .map_or(OrderScope::All, |id| OrderScope::User(UserId::new(id)))
    } else {
        // Customers get their own orders regardless of the requested filter
        OrderScope::User(user.id)
    }
}

/// List orders for the caller's scope, newest first.
///
/// A transient database failure falls back to the last cached snapshot
/// for the scope, marked stale. Only the read path degrades this way.
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>> {
    let scope = scope_for(&user, &query);

    match OrderRepository::new(state.pool()).list(scope).await {
        Ok(orders) => {
            state.order_cache().refresh(scope, orders.clone()).await;
            Ok(Json(OrderListResponse {
                orders,
                stale: false,
                as_of: Utc::now(),
            }))
        }
        Err(err @ RepositoryError::Database(_)) => {
            tracing::warn!(error = %err, "Order listing failed, trying cache");

            match state.order_cache().get(scope).await {
                Some(snapshot) => Ok(Json(OrderListResponse {
                    orders: snapshot.orders.as_ref().clone(),
                    stale: true,
                    as_of: snapshot.fetched_at,
                })),
                None => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// Fetch one order; visible to its owner and to admins.
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let order_id = OrderId::new(id);
    let order = OrderRepository::new(state.pool())
        .get(&order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    if order.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("not your order".to_owned()));
    }

    Ok(Json(order))
}

/// Transition an order's status.
///
/// Only the five recognized statuses are accepted, and only legal
/// transitions go through - both checked before touching storage. Admins
/// may drive any legal transition; a customer may only cancel their own
/// still-pending order.
#[instrument(skip(user, state, request), fields(user_id = %user.id))]
pub async fn update_status(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Order>> {
    let next = OrderStatus::parse(&request.status).map_err(AppError::BadRequest)?;

    let order_id = OrderId::new(id);
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get(&order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    if !user.is_admin() {
        let owns_it = order.user_id == user.id;
        if !owns_it || next != OrderStatus::Cancelled {
            return Err(AppError::Forbidden(
                "only admins can manage order statuses".to_owned(),
            ));
        }
    }

    if !order.status.can_transition_to(next) {
        return Err(AppError::BadRequest(format!(
            "cannot transition order from {} to {}",
            order.status, next
        )));
    }

    let updated = repo.update_status(&order_id, order.status, next).await?;
    state.order_cache().invalidate_user(updated.user_id).await;

    tracing::info!(order_id = %updated.id, status = %updated.status, "Order status updated");

    Ok(Json(updated))
}

/// Delete an order and its line items (admin).
#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let order_id = OrderId::new(id);
    let repo = OrderRepository::new(state.pool());

    let order = repo
        .get(&order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    repo.delete(&order_id).await?;
    state.order_cache().invalidate_user(order.user_id).await;

    tracing::info!(order_id = %order_id, admin = %admin.id, "Order deleted");

    Ok(StatusCode::NO_CONTENT)
}
