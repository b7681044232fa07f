//! CLI command definitions and dispatch.

pub mod config;
pub mod health;
pub mod token;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use webauthz_core::config::AppConfig;
use webauthz_core::error::AppError;
use webauthz_store::StoreManager;
use webauthz_token::TokenService;

/// webauthz: opaque bearer token issuer
#[derive(Debug, Parser)]
#[command(name = "webauthz", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Issue and verify tokens
    Token(token::TokenArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Check that the token store is reachable
    Health,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Token(args) => token::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, &self.config, self.format),
            Commands::Health => health::execute(&config).await,
        }
    }
}

/// Helper: connect the configured store
pub async fn create_store(config: &AppConfig) -> Result<StoreManager, AppError> {
    if config.store.provider == "memory" {
        tracing::warn!("In-memory store: records do not outlive this process");
    }
    StoreManager::new(&config.store).await
}

/// Helper: build the token service over the configured store
pub async fn create_token_service(config: &AppConfig) -> Result<TokenService, AppError> {
    let store = create_store(config).await?;
    TokenService::new(Arc::new(store), &config.token)
}
