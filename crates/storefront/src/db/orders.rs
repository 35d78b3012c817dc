//! Order repository.
//!
//! Orders are written once at checkout (order row plus item snapshot in a
//! single transaction) and afterwards mutated only by status transitions.
//! The item snapshot is denormalized on purpose: it records what the cart
//! held at submission time, independent of later catalog changes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use ruouvan_core::{CartItem, OrderId, OrderStatus, ProductId, UserId, Vnd};

use super::RepositoryError;
use crate::models::{CustomerInfo, Order, OrderDraft};

const ORDER_COLUMNS: &str = "id, user_id, customer_info, total_amount, status, created_at";

/// Which orders a read is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderScope {
    /// Every order (admin views).
    All,
    /// Orders owned by one user.
    User(UserId),
}

/// Raw order row; items are attached separately.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: String,
    user_id: i32,
    customer_info: serde_json::Value,
    total_amount: i64,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_id: String,
    product_id: i32,
    product_name: String,
    product_price: i64,
    product_image: String,
    product_type: String,
    quantity: i32,
}

impl OrderRow {
    fn into_order(self, items: Vec<CartItem>) -> Result<Order, RepositoryError> {
        // Customer info is a structured blob; missing required fields mean
        // the row is bad, not that the fields are silently absent.
        let customer_info: CustomerInfo =
            serde_json::from_value(self.customer_info).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid customer info blob: {e}"))
            })?;

        if self.total_amount < 0 {
            return Err(RepositoryError::DataCorruption(
                "negative order total in database".to_owned(),
            ));
        }

        Ok(Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            items,
            customer_info,
            total: Vnd::new(self.total_amount),
            // Out-of-set values render as an explicit unknown status
            status: OrderStatus::from_stored(&self.status),
            created_at: self.created_at,
        })
    }
}

impl OrderItemRow {
    fn into_cart_item(self) -> Result<CartItem, RepositoryError> {
        if self.quantity <= 0 || self.product_price < 0 {
            return Err(RepositoryError::DataCorruption(
                "invalid order item in database".to_owned(),
            ));
        }

        #[allow(clippy::cast_sign_loss)] // checked positive above
        Ok(CartItem {
            id: ProductId::new(self.product_id),
            name: self.product_name,
            price: Vnd::new(self.product_price),
            image: self.product_image,
            kind: self.product_type,
            quantity: self.quantity as u32,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a draft as a new order: order row and item snapshot in one
    /// transaction.
    ///
    /// If the draft carries an idempotency key that is already recorded,
    /// the previously created order is returned instead of inserting a
    /// duplicate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing
    /// is committed in that case.
    pub async fn create(&self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        if let Some(key) = &draft.idempotency_key
            && let Some(existing) = self.get_by_idempotency_key(key).await?
        {
            return Ok(existing);
        }

        let customer_info = serde_json::to_value(&draft.customer_info).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize customer info: {e}"))
        })?;

        let mut tx: Transaction<'_, Postgres> = self.pool.begin().await?;

        let insert = sqlx::query(
            "INSERT INTO orders (id, user_id, customer_info, total_amount, status,
                                 idempotency_key, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (idempotency_key) DO NOTHING",
        )
        .bind(draft.id.as_str())
        .bind(draft.user_id.as_i32())
        .bind(&customer_info)
        .bind(draft.total.as_i64())
        .bind(draft.status.as_str())
        .bind(draft.idempotency_key.as_deref())
        .bind(draft.created_at)
        .execute(&mut *tx)
        .await?;

        if insert.rows_affected() == 0 {
            // Lost a race against a concurrent submission with the same key.
            tx.rollback().await?;
            if let Some(key) = &draft.idempotency_key
                && let Some(existing) = self.get_by_idempotency_key(key).await?
            {
                return Ok(existing);
            }
            return Err(RepositoryError::Conflict(
                "order already submitted".to_owned(),
            ));
        }

        for item in &draft.items {
            sqlx::query(
                "INSERT INTO order_items
                     (order_id, product_id, product_name, product_price,
                      product_image, product_type, quantity)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(draft.id.as_str())
            .bind(item.id.as_i32())
            .bind(&item.name)
            .bind(item.price.as_i64())
            .bind(&item.image)
            .bind(&item.kind)
            .bind(i32::try_from(item.quantity).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get(&draft.id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// List orders in a scope, newest first, with their item snapshots.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `DataCorruption` if any stored row is invalid.
    pub async fn list(&self, scope: OrderScope) -> Result<Vec<Order>, RepositoryError> {
        let rows = match scope {
            OrderScope::All => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
            OrderScope::User(user_id) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders
                     WHERE user_id = $1 ORDER BY created_at DESC"
                ))
                .bind(user_id.as_i32())
                .fetch_all(self.pool)
                .await?
            }
        };

        let order_ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut items_by_order = self.fetch_items(&order_ids).await?;

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect()
    }

    /// Get an order with its item snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `DataCorruption` if the stored row is invalid.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items_by_order = self.fetch_items(std::slice::from_ref(&row.id)).await?;
        let items = items_by_order.remove(&row.id).unwrap_or_default();
        Ok(Some(row.into_order(items)?))
    }

    /// Transition an order's status, compare-and-swap style.
    ///
    /// The update only applies while the order is still in
    /// `expected_current`; a concurrent transition makes this fail with
    /// `Conflict` rather than silently overwriting.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order doesn't exist, `Conflict` if its
    /// status moved underneath the caller.
    pub async fn update_status(
        &self,
        id: &OrderId,
        expected_current: OrderStatus,
        next: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2 AND status = $3")
            .bind(next.as_str())
            .bind(id.as_str())
            .bind(expected_current.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return match self.get(id).await? {
                Some(_) => Err(RepositoryError::Conflict(
                    "order status changed concurrently".to_owned(),
                )),
                None => Err(RepositoryError::NotFound),
            };
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete an order; line items cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn get_by_idempotency_key(&self, key: &str) -> Result<Option<Order>, RepositoryError> {
        let id: Option<String> =
            sqlx::query_scalar("SELECT id FROM orders WHERE idempotency_key = $1")
                .bind(key)
                .fetch_optional(self.pool)
                .await?;

        match id {
            Some(id) => self.get(&OrderId::new(id)).await,
            None => Ok(None),
        }
    }

    /// Fetch item snapshots for a set of orders, grouped by order id.
    async fn fetch_items(
        &self,
        order_ids: &[String],
    ) -> Result<HashMap<String, Vec<CartItem>>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT order_id, product_id, product_name, product_price,
                    product_image, product_type, quantity
             FROM order_items
             WHERE order_id = ANY($1)
             ORDER BY id ASC",
        )
        .bind(order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<String, Vec<CartItem>> = HashMap::new();
        for row in rows {
            let order_id = row.order_id.clone();
            grouped
                .entry(order_id)
                .or_default()
                .push(row.into_cart_item()?);
        }

        Ok(grouped)
    }
}
