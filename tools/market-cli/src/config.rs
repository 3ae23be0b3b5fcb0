//! CLI configuration.

use anyhow::{Context, Result};
use market_cart::CartConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the cart is stored on disk.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Storage location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the store file, relative to the working directory.
    #[serde(default = "default_data_path")]
    pub data_path: String,
}

fn default_data_path() -> String {
    ".gomarket/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
        }
    }
}

/// Generate a default cart.toml config file.
pub fn generate_default_config() -> String {
    r#"# GoMarket cart configuration

[storage]
data_path = ".gomarket/storage.json"

[cart]
namespace = "GoMarketPlace"
queue_capacity = 64

[cart.retry]
# Retries after the first failed storage read or write
max_attempts = 1
backoff_ms = 25
# Uncomment to double the delay on each retry, capped at this value
# backoff_max_ms = 200
"#
    .to_string()
}
