//! Explicit cart scope for UI code.

use crate::error::CartError;
use crate::store::CartHandle;

/// The cart a UI tree was given, if any.
///
/// Screens receive a `CartContext` from whoever built them and call
/// [`cart`](Self::cart) to reach the store; a context built without a store
/// fails with [`CartError::NotInitialized`].
#[derive(Clone, Default)]
pub struct CartContext {
    handle: Option<CartHandle>,
}

impl CartContext {
    /// A context with no cart store behind it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A context backed by a running cart store.
    pub fn provide(handle: CartHandle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// The cart handle, or a usage error outside a provided scope.
    pub fn cart(&self) -> Result<&CartHandle, CartError> {
        self.handle.as_ref().ok_or(CartError::NotInitialized)
    }

    /// Whether a cart store was provided.
    pub fn is_provided(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CartConfig, CartStore, NewLineItem};
    use market_store::MemoryStore;

    #[test]
    fn test_empty_context_is_usage_error() {
        let context = CartContext::empty();
        assert!(!context.is_provided());
        assert!(matches!(context.cart(), Err(CartError::NotInitialized)));
    }

    #[tokio::test]
    async fn test_provided_context_reaches_store() {
        let (store, _) = CartStore::open(MemoryStore::new(), CartConfig::default())
            .await
            .unwrap();
        let context = CartContext::provide(store.handle());

        let cart = context.cart().unwrap();
        cart.add_to_cart(NewLineItem::new("p1", "Shoe", "u", 10.0))
            .await
            .unwrap();

        assert_eq!(cart.products().len(), 1);
    }
}
