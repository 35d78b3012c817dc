//! Product catalog models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ruouvan_core::{ProductId, Vnd};

/// Tasting and serving details for a product.
///
/// Stored as a JSONB blob; every field is required, and storage reads
/// reject blobs that are missing any of them instead of propagating
/// half-formed records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub alcohol: String,
    pub ingredient: String,
    pub aging: String,
    pub serving: String,
    pub pairing: String,
    pub volume: String,
}

/// A purchasable product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub packaging: String,
    pub volume: String,
    pub price: Vnd,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Vnd>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<i32>,
    pub rating: f64,
    pub image: String,
    pub description: String,
    pub details: ProductDetails,
    pub story: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or fully replacing a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub packaging: String,
    pub volume: String,
    pub price: Vnd,
    #[serde(default)]
    pub original_price: Option<Vnd>,
    #[serde(default)]
    pub discount: Option<i32>,
    pub rating: f64,
    pub image: String,
    pub description: String,
    pub details: ProductDetails,
    pub story: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let product = Product {
            id: ProductId::new(4),
            name: "Set Rượu Dâu Premium".to_owned(),
            kind: "Rượu Dâu".to_owned(),
            category: "Quà Tặng".to_owned(),
            packaging: "Chai Thủy Tinh".to_owned(),
            volume: "500ml".to_owned(),
            price: Vnd::parse("142,500").unwrap(),
            original_price: Some(Vnd::parse("150,000").unwrap()),
            discount: Some(5),
            rating: 4.8,
            image: "/images/strawberry-wine-premium.jpg".to_owned(),
            description: "Set rượu dâu cao cấp".to_owned(),
            details: ProductDetails {
                alcohol: "28%".to_owned(),
                ingredient: "Dâu tây organic".to_owned(),
                aging: "Ủ 4 tháng".to_owned(),
                serving: "Uống lạnh".to_owned(),
                pairing: "Chocolate".to_owned(),
                volume: "500ml".to_owned(),
            },
            story: "Phiên bản cao cấp.".to_owned(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["type"], "Rượu Dâu");
        assert_eq!(value["price"], "142,500");
        assert_eq!(value["original_price"], "150,000");
        assert_eq!(value["details"]["alcohol"], "28%");
    }

    #[test]
    fn test_optional_pricing_fields_omitted_when_absent() {
        let json = r#"{
            "name": "Set Rượu Cốm Gia Đình",
            "type": "Rượu Cốm",
            "category": "Bình Dân",
            "packaging": "Chai Nhựa",
            "volume": "500ml",
            "price": "48,000",
            "rating": 4.1,
            "image": "/images/rice-wine-family.jpg",
            "description": "Set rượu cốm xanh",
            "details": {
                "alcohol": "27%",
                "ingredient": "Cốm xanh tươi",
                "aging": "Ủ 2 tháng",
                "serving": "Nhiệt độ phòng",
                "pairing": "Bánh đậu xanh",
                "volume": "500ml"
            },
            "story": "Rượu cốm mùa thu Hà Nội."
        }"#;

        let input: ProductInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.price, Vnd::new(48_000));
        assert!(input.original_price.is_none());
        assert!(input.discount.is_none());
    }

    #[test]
    fn test_details_reject_missing_fields() {
        let incomplete = serde_json::json!({
            "alcohol": "25%",
            "ingredient": "Dâu tây tươi"
        });
        assert!(serde_json::from_value::<ProductDetails>(incomplete).is_err());
    }
}
