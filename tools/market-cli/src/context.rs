//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use market_cart::{CartStore, HydrateOutcome};
use market_store::FileStore;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Path of the store file.
    pub fn data_path(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.data_path)
    }

    /// Open the cart store for this invocation.
    ///
    /// A corrupt stored cart is reported as a warning. Listing continues with
    /// an empty cart; changes fail until `cart clear` resets it.
    pub async fn open_cart(&self) -> Result<CartStore> {
        let path = self.data_path();
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        self.output
            .debug(&format!("Using store file: {}", store.path().display()));

        let (cart, outcome) = CartStore::open(store, self.config.cart.clone())
            .await
            .context("Failed to load cart")?;

        if let HydrateOutcome::Corrupt(reason) = outcome {
            self.output.warn(&format!(
                "Stored cart is unreadable ({}); run `cart clear` to reset it",
                reason
            ));
        }

        Ok(cart)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
