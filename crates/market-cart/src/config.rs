//! Cart store configuration.

use std::time::Duration;

use market_store::{store_key, BackoffStrategy, RetryPolicy};
use serde::{Deserialize, Serialize};

/// Configuration for a [`CartStore`](crate::CartStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// App namespace used in the storage key (`@<namespace>:CartItems`).
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// How many mutations may wait for the writer before callers block.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Retry behaviour for storage reads and writes.
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_namespace() -> String {
    "GoMarketPlace".to_string()
}

fn default_queue_capacity() -> usize {
    64
}

impl CartConfig {
    /// Key the cart is stored under.
    pub fn storage_key(&self) -> String {
        store_key!(format!("@{}", self.namespace), "CartItems")
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            queue_capacity: default_queue_capacity(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retry settings in config-file form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first failed attempt.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// When set, the delay doubles on each retry up to this many milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_max_ms: Option<u64>,
}

fn default_max_attempts() -> u32 {
    1
}

fn default_backoff_ms() -> u64 {
    25
}

impl RetryConfig {
    /// Build the runtime retry policy.
    pub fn policy(&self) -> RetryPolicy {
        let base = Duration::from_millis(self.backoff_ms);
        let backoff = match self.backoff_max_ms {
            _ if self.backoff_ms == 0 => BackoffStrategy::None,
            Some(max_ms) => BackoffStrategy::Exponential {
                base,
                max: Duration::from_millis(max_ms.max(self.backoff_ms)),
            },
            None => BackoffStrategy::Fixed(base),
        };
        RetryPolicy::new(self.max_attempts).with_backoff(backoff)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
            backoff_max_ms: None,
        }
    }
}
