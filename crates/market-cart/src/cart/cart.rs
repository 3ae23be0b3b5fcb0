//! Cart and line item types.

use crate::error::CartError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// A product as the storefront shows it, before it is in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLineItem {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Display image reference.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
}

impl NewLineItem {
    /// Create a new product descriptor.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Display image reference.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Quantity, at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item with a quantity of one.
    pub fn from_new(item: NewLineItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
            quantity: 1,
        }
    }
}

/// A shopping cart: line items in insertion order, at most one per product.
///
/// Only [`Cart::from_items`] builds a cart from outside data, so stored
/// carts are always validated.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored line items.
    ///
    /// Returns a description of the first problem if the items break cart
    /// invariants (duplicate product, zero quantity, over the limit).
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, String> {
        for (index, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(format!("item {} has quantity 0", item.id));
            }
            if item.quantity > MAX_QUANTITY_PER_ITEM {
                return Err(format!(
                    "item {} has quantity {} above {}",
                    item.id, item.quantity, MAX_QUANTITY_PER_ITEM
                ));
            }
            if !item.price.is_finite() {
                return Err(format!("item {} has price {}", item.id, item.price));
            }
            if items[..index].iter().any(|other| other.id == item.id) {
                return Err(format!("duplicate item {}", item.id));
            }
        }
        Ok(Self { items })
    }

    /// Add a product to the cart.
    ///
    /// A product already in the cart has its quantity increased by one;
    /// otherwise it is appended with a quantity of one. NaN and infinite
    /// prices are rejected.
    pub fn add_item(&mut self, item: NewLineItem) -> Result<bool, CartError> {
        if !item.price.is_finite() {
            return Err(CartError::InvalidPrice(item.id.to_string(), item.price));
        }
        if self.contains(&item.id) {
            return self.increment(&item.id);
        }
        self.items.push(LineItem::from_new(item));
        Ok(true)
    }

    /// Increase an item's quantity by one.
    ///
    /// Returns `Ok(false)` if the product is not in the cart.
    pub fn increment(&mut self, id: &ProductId) -> Result<bool, CartError> {
        let Some(item) = self.items.iter_mut().find(|i| &i.id == id) else {
            return Ok(false);
        };

        let new_quantity = item.quantity.saturating_add(1);
        if new_quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CartError::QuantityExceedsLimit(
                new_quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        item.quantity = new_quantity;
        Ok(true)
    }

    /// Decrease an item's quantity by one, removing it at zero.
    ///
    /// Returns `false` if the product is not in the cart.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.items.iter().position(|i| &i.id == id) else {
            return false;
        };

        let item = &mut self.items[index];
        item.quantity = item.quantity.saturating_sub(1);
        if item.quantity == 0 {
            self.items.remove(index);
        }
        true
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart and return its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Get an item by product ID.
    pub fn get_item(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get_item(id).is_some()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoe() -> NewLineItem {
        NewLineItem::new("p1", "Shoe", "u", 10.0)
    }

    fn quantities(cart: &Cart) -> Vec<(&str, u32)> {
        cart.items()
            .iter()
            .map(|i| (i.id.as_str(), i.quantity))
            .collect()
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = Cart::new();
        assert!(cart.add_item(shoe()).unwrap());

        assert_eq!(quantities(&cart), vec![("p1", 1)]);
        let item = cart.get_item(&ProductId::new("p1")).unwrap();
        assert_eq!(item.title, "Shoe");
        assert_eq!(item.price, 10.0);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        cart.add_item(shoe()).unwrap();
        cart.add_item(shoe()).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(quantities(&cart), vec![("p1", 2)]);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(NewLineItem::new("b", "B", "u", 1.0)).unwrap();
        cart.add_item(NewLineItem::new("a", "A", "u", 1.0)).unwrap();
        cart.add_item(NewLineItem::new("b", "B", "u", 1.0)).unwrap();

        assert_eq!(quantities(&cart), vec![("b", 2), ("a", 1)]);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_increment_missing_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.increment(&ProductId::new("missing")).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_to_one() {
        let mut cart = Cart::new();
        cart.add_item(shoe()).unwrap();
        cart.add_item(shoe()).unwrap();

        assert!(cart.decrement(&ProductId::new("p1")));
        assert_eq!(quantities(&cart), vec![("p1", 1)]);
    }

    #[test]
    fn test_decrement_at_one_removes_item() {
        let mut cart = Cart::new();
        cart.add_item(shoe()).unwrap();

        assert!(cart.decrement(&ProductId::new("p1")));
        assert!(cart.is_empty());
        assert!(!cart.decrement(&ProductId::new("p1")));
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::from_items(vec![LineItem {
            quantity: MAX_QUANTITY_PER_ITEM,
            ..LineItem::from_new(shoe())
        }])
        .unwrap();

        let result = cart.add_item(shoe());
        assert!(matches!(
            result,
            Err(CartError::QuantityExceedsLimit(10000, MAX_QUANTITY_PER_ITEM))
        ));
        assert_eq!(cart.item_count(), u64::from(MAX_QUANTITY_PER_ITEM));
    }

    #[test]
    fn test_from_items_rejects_duplicates() {
        let item = LineItem::from_new(shoe());
        let err = Cart::from_items(vec![item.clone(), item]).unwrap_err();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn test_from_items_rejects_zero_quantity() {
        let item = LineItem {
            quantity: 0,
            ..LineItem::from_new(shoe())
        };
        assert!(Cart::from_items(vec![item]).is_err());
    }

    #[test]
    fn test_non_finite_price_rejected() {
        let mut cart = Cart::new();
        cart.add_item(shoe()).unwrap();

        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = cart.add_item(NewLineItem::new("p2", "Bad", "u", price));
            assert!(matches!(result, Err(CartError::InvalidPrice(ref id, _)) if id == "p2"));
        }
        assert_eq!(quantities(&cart), vec![("p1", 1)]);
    }

    #[test]
    fn test_from_items_rejects_non_finite_price() {
        let item = LineItem {
            price: f64::NAN,
            ..LineItem::from_new(shoe())
        };
        assert!(Cart::from_items(vec![item]).is_err());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(shoe()).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_random_operations_keep_invariants() {
        let ids = ["a", "b", "c"];
        let mut cart = Cart::new();

        // Deterministic pseudo-random walk over add / increment / decrement.
        let mut seed: u32 = 17;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = ids[(seed >> 8) as usize % ids.len()];
            match (seed >> 16) % 3 {
                0 => {
                    cart.add_item(NewLineItem::new(id, id, "u", 1.0)).unwrap();
                }
                1 => {
                    cart.increment(&ProductId::new(id)).unwrap();
                }
                _ => {
                    cart.decrement(&ProductId::new(id));
                }
            }

            assert!(cart.items().iter().all(|i| i.quantity >= 1));
            assert!(Cart::from_items(cart.items().to_vec()).is_ok());
        }
    }
}
