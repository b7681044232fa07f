//! Token issue and verification commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use webauthz_core::config::AppConfig;
use webauthz_core::error::AppError;
use webauthz_core::types::{Metadata, NOT_AFTER_KEY, TokenRecord};
use webauthz_token::TokenRequest;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a new token
    Mint {
        /// Token type (client, grant, refresh, access, or any other tag)
        #[arg(short = 't', long = "type")]
        category: String,
        /// Owning client identifier
        #[arg(long)]
        client_id: String,
        /// Metadata entry as key=value; values that parse as JSON are stored as JSON
        #[arg(short, long = "meta", value_parser = parse_meta)]
        meta: Vec<(String, serde_json::Value)>,
        /// Expiry recorded with the token (RFC 3339), for the caller to enforce
        #[arg(long)]
        not_after: Option<DateTime<Utc>>,
    },
    /// Verify a token and print its record
    Check {
        /// Bearer token as issued
        token: String,
    },
}

/// Execute token commands
pub async fn execute(
    args: &TokenArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = super::create_token_service(config).await?;

    match &args.command {
        TokenCommand::Mint {
            category,
            client_id,
            meta,
            not_after,
        } => {
            let metadata: Metadata = meta.iter().cloned().collect();
            let mut request =
                TokenRequest::new(category.as_str(), client_id.as_str()).with_metadata(metadata);
            if let Some(at) = not_after {
                request = request.not_after(*at);
            }

            match service.generate_token(request).await? {
                Some(token) => println!("{}", token.as_str()),
                None => {
                    return Err(AppError::conflict(
                        "Token store did not accept the record; no token issued",
                    ));
                }
            }
        }
        TokenCommand::Check { token } => {
            let record = service.check_token(token).await?;
            match format {
                OutputFormat::Json => output::print_item(&record, format),
                OutputFormat::Text => {
                    output::print_success("Token is valid");
                    for (key, value) in record_fields(&record) {
                        output::print_kv(&key, &value);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Label/value pairs for the text rendering of a record.
fn record_fields(record: &TokenRecord) -> Vec<(String, String)> {
    let mut fields = vec![
        ("Type".to_string(), record.category.to_string()),
        ("Client".to_string(), record.client_id.clone()),
    ];
    if let Some(not_after) = record.not_after() {
        fields.push(("Not after".to_string(), not_after.to_rfc3339()));
    }
    fields.extend(
        record
            .metadata
            .iter()
            .filter(|(key, _)| key.as_str() != NOT_AFTER_KEY)
            .map(|(key, value)| (key.clone(), value.to_string())),
    );
    fields
}

/// Parse a `key=value` metadata argument.
fn parse_meta(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty metadata key in '{raw}'"));
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_meta_string() {
        assert_eq!(
            parse_meta("scope=read write").unwrap(),
            ("scope".to_string(), json!("read write"))
        );
    }

    #[test]
    fn test_parse_meta_json() {
        assert_eq!(parse_meta("n=3").unwrap(), ("n".to_string(), json!(3)));
        assert_eq!(
            parse_meta("roles=[\"a\",\"b\"]").unwrap(),
            ("roles".to_string(), json!(["a", "b"]))
        );
    }

    #[test]
    fn test_record_fields_list_not_after_once() {
        let mut metadata = Metadata::new();
        metadata.insert(NOT_AFTER_KEY.to_string(), json!("2030-01-02T03:04:05Z"));
        metadata.insert("scope".to_string(), json!("read"));
        let record = TokenRecord {
            category: "access".into(),
            client_id: "c1".to_string(),
            token_buffer_length: 96,
            metadata,
        };

        let fields = record_fields(&record);
        let labels: Vec<&str> = fields.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(labels, ["Type", "Client", "Not after", "scope"]);
        assert_eq!(fields[2].1, "2030-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_parse_meta_rejects_malformed() {
        assert!(parse_meta("scope").is_err());
        assert!(parse_meta("=read").is_err());
    }
}
