//! The cart state machine.
//!
//! A [`Cart`] holds the visitor's pending purchase selection: an ordered
//! list of line items plus derived totals. The derived fields are
//! recomputed from the items after every mutation - they are never
//! accumulated incrementally, so the invariants
//!
//! - `item_count == Σ quantity`
//! - `total == Σ price × quantity`
//!
//! hold after any sequence of operations. The whole state (items and
//! derived fields) serializes as one blob; the storefront persists it into
//! the visitor's session after each mutation and restores it verbatim.

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, Vnd};

/// The denormalized product fields copied into the cart at add time.
///
/// A cart line remembers what the product looked like when it was added;
/// later catalog edits do not reach into existing carts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Vnd,
    pub image: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One line of the cart: a product snapshot with a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Vnd,
    pub image: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: u32,
}

impl CartItem {
    fn new(product: CartProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            kind: product.kind,
            quantity: 1,
        }
    }

    /// Price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Vnd {
        self.price * self.quantity
    }
}

/// The visitor's pending purchase selection.
///
/// Items keep insertion order. `total` and `item_count` are derived and
/// recomputed after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    #[serde(with = "crate::types::money::minor_units")]
    pub total: Vnd,
    pub item_count: u32,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of a product.
    ///
    /// If a line with the same product id exists its quantity increments by
    /// one; otherwise a new line with quantity 1 is appended. Safe to call
    /// repeatedly - each call adds exactly one unit.
    pub fn add_item(&mut self, product: CartProduct) {
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(CartItem::new(product)),
        }
        self.recompute();
    }

    /// Set a line's quantity to an absolute value.
    ///
    /// A quantity of zero or less removes the line entirely; quantities
    /// never persist as non-positive. An unknown id is a no-op.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i32) {
        if quantity <= 0 {
            self.items.retain(|item| item.id != id);
        } else if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            #[allow(clippy::cast_sign_loss)] // positive by the branch above
            {
                item.quantity = quantity as u32;
            }
        }
        self.recompute();
    }

    /// Remove a line; no-op if the id is not present.
    pub fn remove_item(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
        self.recompute();
    }

    /// Empty the cart and reset totals to zero.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total = self.items.iter().map(CartItem::line_total).sum();
        self.item_count = self.items.iter().map(|item| item.quantity).sum();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn strawberry() -> CartProduct {
        CartProduct {
            id: ProductId::new(3),
            name: "Set Rượu Dâu Gia Đình".to_owned(),
            price: Vnd::parse("55,000").unwrap(),
            image: "/images/strawberry-wine-family.jpg".to_owned(),
            kind: "Rượu Dâu".to_owned(),
        }
    }

    fn plum() -> CartProduct {
        CartProduct {
            id: ProductId::new(10),
            name: "Set Rượu Mơ Đặc Biệt".to_owned(),
            price: Vnd::parse("150,000").unwrap(),
            image: "/images/plum-wine-special.jpg".to_owned(),
            kind: "Rượu Mơ".to_owned(),
        }
    }

    #[test]
    fn test_add_new_item_has_quantity_one() {
        let mut cart = Cart::new();
        cart.add_item(strawberry());

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 1);
        assert_eq!(cart.item_count, 1);
        assert_eq!(cart.total, Vnd::new(55_000));
    }

    #[test]
    fn test_add_same_product_twice_merges_lines() {
        let mut cart = Cart::new();
        cart.add_item(strawberry());
        cart.add_item(strawberry());

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.total, Vnd::new(110_000));
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(strawberry());
        cart.add_item(plum());
        cart.add_item(strawberry());

        let ids: Vec<i32> = cart.items.iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 10]);
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let mut cart = Cart::new();
        cart.add_item(strawberry());
        cart.add_item(strawberry());
        cart.update_quantity(ProductId::new(3), 5);

        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.item_count, 5);
        assert_eq!(cart.total, Vnd::new(275_000));
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        for quantity in [0, -1] {
            let mut cart = Cart::new();
            cart.add_item(strawberry());
            cart.update_quantity(ProductId::new(3), quantity);

            assert!(cart.is_empty());
            assert_eq!(cart.item_count, 0);
            assert_eq!(cart.total, Vnd::ZERO);
        }
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(strawberry());
        let before = cart.clone();

        cart.update_quantity(ProductId::new(999), 4);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(strawberry());
        cart.add_item(plum());
        cart.remove_item(ProductId::new(3));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].id, ProductId::new(10));
        assert_eq!(cart.total, Vnd::new(150_000));

        // Removing an absent id is a no-op
        cart.remove_item(ProductId::new(3));
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_item(strawberry());
        cart.add_item(plum());
        cart.clear();

        assert!(cart.items.is_empty());
        assert_eq!(cart.total, Vnd::ZERO);
        assert_eq!(cart.item_count, 0);

        // Unconditional: clearing an empty cart is fine too
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_recomputed_over_mixed_sequence() {
        let mut cart = Cart::new();
        cart.add_item(strawberry());
        cart.add_item(plum());
        cart.add_item(strawberry());
        cart.update_quantity(ProductId::new(10), 3);
        cart.remove_item(ProductId::new(3));
        cart.add_item(strawberry());

        let expected_count: u32 = cart.items.iter().map(|i| i.quantity).sum();
        let expected_total: Vnd = cart.items.iter().map(CartItem::line_total).sum();
        assert_eq!(cart.item_count, expected_count);
        assert_eq!(cart.total, expected_total);
        assert_eq!(cart.item_count, 4);
        assert_eq!(cart.total, Vnd::new(505_000));
    }

    #[test]
    fn test_worked_example_from_catalog() {
        // One item at 55,000đ with quantity 2, then a 150,000đ item.
        let mut cart = Cart::new();
        cart.add_item(strawberry());
        cart.add_item(strawberry());
        assert_eq!(cart.total, Vnd::new(110_000));

        cart.add_item(plum());
        assert_eq!(cart.total, Vnd::new(260_000));
        assert_eq!(cart.item_count, 3);
    }

    #[test]
    fn test_serde_roundtrip_preserves_state_verbatim() {
        let mut cart = Cart::new();
        cart.add_item(strawberry());
        cart.add_item(plum());
        cart.update_quantity(ProductId::new(3), 2);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);

        // Prices stay in the grouped-digit wire format, totals stay numeric
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["items"][0]["price"], "55,000");
        assert_eq!(value["items"][0]["type"], "Rượu Dâu");
        assert_eq!(value["total"], 260_000);
        assert_eq!(value["item_count"], 3);
    }
}
