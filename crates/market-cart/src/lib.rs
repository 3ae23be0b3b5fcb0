//! Shopping cart state for the GoMarket storefront app.
//!
//! This crate keeps the cart a shopper builds on their phone:
//!
//! - **Cart**: line items keyed by product, quantities always at least one
//! - **Persistence**: the cart is stored as a JSON array under one namespaced key
//! - **CartStore**: a single writer that applies add / increment / decrement in
//!   order, persists each result and publishes it to subscribers
//!
//! # Example
//!
//! ```rust,ignore
//! use market_cart::prelude::*;
//! use market_store::FileStore;
//!
//! let (store, outcome) = CartStore::open(FileStore::open("cart.json")?, CartConfig::default()).await?;
//! if outcome.is_corrupt() {
//!     // the stored cart was unreadable and the session starts empty
//! }
//!
//! let cart = store.handle();
//! cart.add_to_cart(NewLineItem::new("p1", "Shoe", "https://img/shoe.png", 10.0)).await?;
//! cart.increment("p1").await?;
//! cart.decrement("p1").await?;
//!
//! for item in cart.products() {
//!     println!("{} x{}", item.title, item.quantity);
//! }
//!
//! store.shutdown().await;
//! ```

pub mod cart;
pub mod config;
pub mod context;
pub mod error;
pub mod ids;
pub mod store;

pub use cart::{Cart, HydrateOutcome, LineItem, NewLineItem, MAX_QUANTITY_PER_ITEM};
pub use config::{CartConfig, RetryConfig};
pub use context::CartContext;
pub use error::CartError;
pub use ids::ProductId;
pub use store::{CartHandle, CartStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, HydrateOutcome, LineItem, NewLineItem};
    pub use crate::config::CartConfig;
    pub use crate::context::CartContext;
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::store::{CartHandle, CartStore};
}
