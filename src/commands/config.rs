//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use webauthz_core::config::AppConfig;
use webauthz_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Summarise the configuration that was loaded
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(config, format),
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration '{}' is valid", config_path));
            output::print_kv("Separator", &config.token.separator.to_string());
            output::print_kv("Store", &config.store.provider);
            output::print_kv("Log level", &config.logging.level);
        }
    }
    Ok(())
}
