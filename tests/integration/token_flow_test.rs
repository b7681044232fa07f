//! Integration tests for the configured token flow.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use webauthz_core::config::AppConfig;
use webauthz_core::error::{AppError, ErrorKind};
use webauthz_core::traits::TokenDatabase;
use webauthz_store::StoreManager;
use webauthz_token::{TokenError, TokenRequest, TokenService};

/// Test application context
struct TestApp {
    service: TokenService,
    store: StoreManager,
}

impl TestApp {
    async fn new() -> Self {
        let config = AppConfig::load("config/default.toml").expect("Failed to load config");
        Self::with_config(config).await
    }

    async fn with_config(config: AppConfig) -> Self {
        let store = StoreManager::new(&config.store)
            .await
            .expect("Failed to init store");
        let service = TokenService::new(Arc::new(store.clone()), &config.token)
            .expect("Failed to build token service");
        Self { service, store }
    }
}

#[tokio::test]
async fn test_default_config_flow() {
    let app = TestApp::new().await;
    assert!(app.store.health_check().await.unwrap());

    let token = app
        .service
        .generate_token(TokenRequest::new("access", "c1").with("scope", "read"))
        .await
        .unwrap()
        .expect("token issued");
    assert!(token.as_str().starts_with("access:c1:"));

    let record = app.service.check_token(token.as_str()).await.unwrap();
    assert_eq!(record.client_id, "c1");
    assert_eq!(record.get("scope"), Some(&json!("read")));
}

#[tokio::test]
async fn test_not_after_is_returned_not_enforced() {
    let app = TestApp::new().await;
    let expired = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();

    let token = app
        .service
        .generate_token(TokenRequest::new("refresh", "c1").not_after(expired))
        .await
        .unwrap()
        .unwrap();

    // Verification succeeds; the caller owns the expiry decision.
    let record = app.service.check_token(token.as_str()).await.unwrap();
    let not_after = record.not_after().unwrap();
    assert_eq!(not_after, expired);
    assert!(not_after < Utc::now() - Duration::days(1));
}

#[tokio::test]
async fn test_separator_from_config() {
    let mut config = AppConfig::default();
    config.token.separator = '~';
    let app = TestApp::with_config(config).await;

    let token = app
        .service
        .generate_token(TokenRequest::new("grant", "c1"))
        .await
        .unwrap()
        .unwrap();
    assert!(token.as_str().starts_with("grant~c1~"));
    assert_eq!(app.service.separator(), '~');
}

#[tokio::test]
async fn test_failures_map_to_app_errors() {
    let app = TestApp::new().await;

    let err: AppError = app.service.check_token("garbage").await.unwrap_err().into();
    assert_eq!(err.kind, ErrorKind::Authentication);

    let forged = format!("access:c1:{}", "A".repeat(128));
    let err = app.service.check_token(&forged).await.unwrap_err();
    assert!(matches!(err, TokenError::TokenNotFound));
    assert_eq!(AppError::from(err).kind, ErrorKind::NotFound);
}
