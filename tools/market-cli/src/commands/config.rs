//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.info("[storage]");
    ctx.output.kv("data_path", &ctx.config.storage.data_path);
    ctx.output
        .kv("resolved", &ctx.data_path().display().to_string());

    ctx.output.info("[cart]");
    ctx.output.kv("namespace", &ctx.config.cart.namespace);
    ctx.output.kv("storage_key", &ctx.config.cart.storage_key());
    ctx.output
        .kv("queue_capacity", &ctx.config.cart.queue_capacity.to_string());
    ctx.output.kv(
        "retry.max_attempts",
        &ctx.config.cart.retry.max_attempts.to_string(),
    );
    ctx.output
        .kv("retry.backoff_ms", &ctx.config.cart.retry.backoff_ms.to_string());
    if let Some(max_ms) = ctx.config.cart.retry.backoff_max_ms {
        ctx.output.kv("retry.backoff_max_ms", &max_ms.to_string());
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
