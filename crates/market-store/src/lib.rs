//! Async key-value storage for GoMarket client state.
//!
//! Provides a narrow, string-valued store interface that mirrors device-local
//! storage on a phone, plus two implementations:
//!
//! - [`MemoryStore`]: process memory, with fault injection for tests
//! - [`FileStore`]: a single JSON file on disk
//!
//! # Example
//!
//! ```rust,ignore
//! use market_store::{KvStore, MemoryStore, store_key};
//!
//! let store = MemoryStore::new();
//! let key = store_key!("@GoMarketPlace", "CartItems");
//!
//! store.set(&key, "[]".to_string()).await?;
//! let raw: Option<String> = store.get(&key).await?;
//! store.remove(&key).await?;
//! ```

mod error;
mod file;
mod kv;
mod memory;
mod retry;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use retry::{BackoffStrategy, RetryPolicy};
