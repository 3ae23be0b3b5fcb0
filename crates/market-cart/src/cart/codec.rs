//! Persisted form of the cart.
//!
//! The cart is stored as a JSON array of line items:
//!
//! ```text
//! [{"id":"p1","title":"Shoe","image_url":"u","price":10,"quantity":3}]
//! ```
//!
//! There is no version field.

use crate::cart::{Cart, LineItem};
use crate::error::CartError;

/// What was found in storage when loading the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum HydrateOutcome {
    /// Nothing stored under the cart key.
    Empty,
    /// A value was stored but could not be used; the reason says why.
    Corrupt(String),
    /// A valid cart was stored.
    Loaded(Cart),
}

impl HydrateOutcome {
    /// Interpret a raw stored value.
    ///
    /// A missing or blank value is `Empty`. Anything that is not a JSON array
    /// of line items obeying the cart invariants is `Corrupt`.
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::Empty;
        };

        let items: Vec<LineItem> = match serde_json::from_str(raw) {
            Ok(items) => items,
            Err(e) => return Self::Corrupt(e.to_string()),
        };

        match Cart::from_items(items) {
            Ok(cart) => Self::Loaded(cart),
            Err(reason) => Self::Corrupt(reason),
        }
    }

    /// The cart to start from: the loaded one, or empty.
    pub fn into_cart(self) -> Cart {
        match self {
            Self::Loaded(cart) => cart,
            Self::Empty | Self::Corrupt(_) => Cart::new(),
        }
    }

    /// Whether the stored value had to be discarded.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }
}

/// Serialize a cart into its stored form.
///
/// JSON has no NaN or infinity, so a cart holding such a price is refused
/// instead of being written as `null`.
pub fn encode(cart: &Cart) -> Result<String, CartError> {
    if let Some(item) = cart.items().iter().find(|i| !i.price.is_finite()) {
        return Err(CartError::InvalidPrice(item.id.to_string(), item.price));
    }
    Ok(serde_json::to_string(cart)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NewLineItem;
    use crate::ids::ProductId;

    #[test]
    fn test_decode_missing() {
        assert_eq!(HydrateOutcome::decode(None), HydrateOutcome::Empty);
        assert_eq!(HydrateOutcome::decode(Some("  ")), HydrateOutcome::Empty);
    }

    #[test]
    fn test_decode_stored_cart() {
        let raw = r#"[{"id":"p1","title":"Shoe","image_url":"u","price":10,"quantity":3}]"#;

        let HydrateOutcome::Loaded(cart) = HydrateOutcome::decode(Some(raw)) else {
            panic!("expected a loaded cart");
        };
        let item = cart.get_item(&ProductId::new("p1")).unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.image_url, "u");
        assert_eq!(item.price, 10.0);
    }

    #[test]
    fn test_decode_empty_array_is_loaded() {
        assert_eq!(
            HydrateOutcome::decode(Some("[]")),
            HydrateOutcome::Loaded(Cart::new())
        );
    }

    #[test]
    fn test_decode_malformed_json() {
        let outcome = HydrateOutcome::decode(Some("{not json"));
        assert!(outcome.is_corrupt());
        assert!(outcome.into_cart().is_empty());
    }

    #[test]
    fn test_decode_wrong_shape() {
        let outcome = HydrateOutcome::decode(Some(r#"[{"id":"p1"}]"#));
        assert!(outcome.is_corrupt());
    }

    #[test]
    fn test_decode_invalid_quantity() {
        let raw = r#"[{"id":"p1","title":"Shoe","image_url":"u","price":10,"quantity":0}]"#;
        let outcome = HydrateOutcome::decode(Some(raw));
        assert_eq!(
            outcome,
            HydrateOutcome::Corrupt("item p1 has quantity 0".to_string())
        );
    }

    #[test]
    fn test_encode_field_names() {
        let mut cart = Cart::new();
        cart.add_item(NewLineItem::new("p1", "Shoe", "u", 10.5)).unwrap();

        let encoded = encode(&cart).unwrap();
        assert_eq!(
            encoded,
            r#"[{"id":"p1","title":"Shoe","image_url":"u","price":10.5,"quantity":1}]"#
        );
    }

    #[test]
    fn test_decode_null_price_is_corrupt() {
        let raw = r#"[{"id":"p1","title":"Shoe","image_url":"u","price":null,"quantity":1}]"#;
        assert!(HydrateOutcome::decode(Some(raw)).is_corrupt());
    }

    #[test]
    fn test_decode_is_idempotent() {
        let raw = r#"[{"id":"a","title":"A","image_url":"u","price":1,"quantity":2},{"id":"b","title":"B","image_url":"v","price":2.25,"quantity":1}]"#;

        let first = HydrateOutcome::decode(Some(raw));
        let second = HydrateOutcome::decode(Some(raw));
        assert_eq!(first, second);
        assert!(matches!(first, HydrateOutcome::Loaded(_)));
    }

    #[test]
    fn test_encoded_cart_decodes_to_same_items() {
        let mut cart = Cart::new();
        cart.add_item(NewLineItem::new("a", "A", "u", 1.0)).unwrap();
        cart.add_item(NewLineItem::new("b", "B", "u", 2.0)).unwrap();
        cart.add_item(NewLineItem::new("a", "A", "u", 1.0)).unwrap();

        let decoded = HydrateOutcome::decode(Some(&encode(&cart).unwrap())).into_cart();
        assert_eq!(decoded, cart);
    }
}
