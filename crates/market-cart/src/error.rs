//! Cart error types.

use market_store::StoreError;
use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// The cart API was used with no live `CartStore` behind it.
    #[error("CartStore must be initialized before use")]
    NotInitialized,

    /// Reading or writing device storage failed after retrying.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u32, u32),

    /// Prices must be finite numbers.
    #[error("Invalid price for {0}: {1}")]
    InvalidPrice(String, f64),

    /// The stored cart could not be read back; `clear` replaces it.
    #[error("Stored cart is corrupt: {0}")]
    CorruptCart(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CartError {
    /// Whether the failure came from the storage layer.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
