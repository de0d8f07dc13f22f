mod bot;
mod config;
mod menu;
mod order;
mod platform;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::AppState;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shopbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration: a TOML file when a path is given, the environment
    // otherwise
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(config_path) => {
            info!("Loading configuration from: {}", config_path.display());
            Config::load(&config_path).with_context(|| {
                format!("Failed to load config from {}", config_path.display())
            })?
        }
        None => {
            info!("Loading configuration from environment");
            Config::from_env().context("Invalid configuration")?
        }
    };

    info!("Configuration loaded successfully");
    info!("  Web app: {}", config.web_app_url);
    info!("  Operator: {}", config.admin_id);
    info!("  Contact: @{}", config.contact_username);

    let state = Arc::new(AppState::new(config));

    info!("Bot is starting...");
    bot::run(state).await?;

    Ok(())
}
