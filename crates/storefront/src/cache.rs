//! Read-fallback cache for order listings.
//!
//! The database is the only source of truth for orders. This cache exists
//! for one purpose: when a *read* of an order listing fails transiently,
//! the last successfully fetched snapshot can still be served, marked
//! stale. Every successful read replaces the snapshot for its scope (so
//! the cache can never get ahead of the store), writes never consult it,
//! and successful writes invalidate the scopes they touch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;

use ruouvan_core::UserId;

use crate::db::orders::OrderScope;
use crate::models::Order;

/// How many scopes to retain (all-orders plus recent per-user scopes).
const MAX_SCOPES: u64 = 256;

/// How long a snapshot stays servable after its last refresh.
const SNAPSHOT_TTL: Duration = Duration::from_secs(15 * 60);

/// A time-stamped snapshot of one scope's order listing.
#[derive(Clone)]
pub struct OrderSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub orders: Arc<Vec<Order>>,
}

/// Bounded, time-limited cache of order listings keyed by scope.
#[derive(Clone)]
pub struct OrderCache {
    inner: Cache<OrderScope, OrderSnapshot>,
}

impl OrderCache {
    /// Create the cache with its capacity and TTL bounds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_SCOPES)
                .time_to_live(SNAPSHOT_TTL)
                .build(),
        }
    }

    /// Replace the snapshot for a scope after a successful read.
    pub async fn refresh(&self, scope: OrderScope, orders: Vec<Order>) {
        self.inner
            .insert(
                scope,
                OrderSnapshot {
                    fetched_at: Utc::now(),
                    orders: Arc::new(orders),
                },
            )
            .await;
    }

    /// The last snapshot for a scope, if one is still retained.
    pub async fn get(&self, scope: OrderScope) -> Option<OrderSnapshot> {
        self.inner.get(&scope).await
    }

    /// Drop the snapshots a user-scoped write invalidates: the user's own
    /// scope and the all-orders scope.
    pub async fn invalidate_user(&self, user_id: UserId) {
        self.inner.invalidate(&OrderScope::User(user_id)).await;
        self.inner.invalidate(&OrderScope::All).await;
    }

    /// Drop every snapshot (used when the owning user is not known, e.g.
    /// admin deletes).
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl Default for OrderCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let cache = OrderCache::new();
        let scope = OrderScope::User(UserId::new(1));

        assert!(cache.get(scope).await.is_none());

        cache.refresh(scope, Vec::new()).await;
        let first = cache.get(scope).await.unwrap();
        assert!(first.orders.is_empty());

        cache.refresh(scope, Vec::new()).await;
        let second = cache.get(scope).await.unwrap();
        assert!(second.fetched_at >= first.fetched_at);
    }

    #[tokio::test]
    async fn test_invalidate_user_drops_user_and_all_scopes() {
        let cache = OrderCache::new();
        let user = UserId::new(2);
        let other = UserId::new(3);

        cache.refresh(OrderScope::User(user), Vec::new()).await;
        cache.refresh(OrderScope::User(other), Vec::new()).await;
        cache.refresh(OrderScope::All, Vec::new()).await;

        cache.invalidate_user(user).await;

        assert!(cache.get(OrderScope::User(user)).await.is_none());
        assert!(cache.get(OrderScope::All).await.is_none());
        assert!(cache.get(OrderScope::User(other)).await.is_some());
    }
}
