//! Order models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ruouvan_core::{CartItem, OrderId, OrderStatus, UserId, Vnd};

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    BankTransfer,
}

/// Shipping and contact details entered at checkout.
///
/// Persisted as a JSONB blob on the order; all required fields are
/// validated before submission and again when reading the blob back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// A submitted order.
///
/// The item list is a snapshot of the cart at submission time; catalog
/// edits and deletions never reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub customer_info: CustomerInfo,
    #[serde(with = "ruouvan_core::money::minor_units")]
    pub total: Vnd,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Everything needed to persist a new order.
///
/// Built by the checkout service after all preconditions pass; the
/// repository writes it in a single transaction.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub customer_info: CustomerInfo,
    pub total: Vnd,
    pub status: OrderStatus,
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_info_defaults() {
        let info: CustomerInfo = serde_json::from_str(
            r#"{
                "name": "Trần Thị B",
                "email": "customer@ruouvan.com",
                "phone": "0912345678",
                "address": "456 Đường XYZ, Quận 2, TP.HCM"
            }"#,
        )
        .unwrap();

        assert_eq!(info.notes, "");
        assert_eq!(info.payment_method, PaymentMethod::Cod);
    }

    #[test]
    fn test_customer_info_rejects_missing_required_fields() {
        let missing_phone = r#"{
            "name": "Trần Thị B",
            "email": "customer@ruouvan.com",
            "address": "456 Đường XYZ"
        }"#;
        assert!(serde_json::from_str::<CustomerInfo>(missing_phone).is_err());
    }

    #[test]
    fn test_order_total_serializes_as_integer() {
        let order = Order {
            id: OrderId::new("ORDER_1_x"),
            user_id: UserId::new(2),
            items: Vec::new(),
            customer_info: CustomerInfo {
                name: "A".into(),
                email: "a@b.c".into(),
                phone: "0".into(),
                address: "x".into(),
                notes: String::new(),
                payment_method: PaymentMethod::BankTransfer,
            },
            total: Vnd::new(290_000),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["total"], 290_000);
        assert_eq!(value["status"], "pending");
        assert_eq!(value["customer_info"]["payment_method"], "bank_transfer");
    }
}
