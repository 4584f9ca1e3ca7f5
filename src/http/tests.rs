//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
    assert!(config.access_token.is_none());
    assert!(config.user_agent.starts_with("console-pager/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://console.example.com/api")
        .timeout(Duration::from_secs(5))
        .rate_limit(RateLimiterConfig::new(2, 2))
        .access_token("token-123")
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://console.example.com/api".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 2)));
    assert_eq!(config.access_token, Some("token-123".to_string()));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[tokio::test]
async fn test_post_json_with_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/describeUsers"))
        .and(header("Authorization", "Bearer token-123"))
        .and(body_json(json!({"MaxResults": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Users": [{"UserId": "alice"}],
            "NextToken": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(format!("{}/", mock_server.uri()))
        .access_token("token-123")
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let body: serde_json::Value = client
        .post_json("/describeUsers", &json!({"MaxResults": 5}))
        .await
        .unwrap();

    assert_eq!(body["Users"][0]["UserId"], "alice");
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/describeServers"))
        .and(header("X-Console-Client", "cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Console-Client", "cli")
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let body: serde_json::Value = client.post_json("describeServers", &json!({})).await.unwrap();
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_error_status_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/describeSessions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let result: Result<serde_json::Value, _> =
        client.post_json("/describeSessions", &json!({})).await;

    match result.unwrap_err() {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/describeSessions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let result: Result<serde_json::Value, _> =
        client.post_json("/describeSessions", &json!({})).await;

    assert!(matches!(result.unwrap_err(), Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_full_url_bypasses_base() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url("http://unused.invalid")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let body: serde_json::Value = client
        .post_json(&format!("{}/elsewhere", mock_server.uri()), &json!({}))
        .await
        .unwrap();
    assert_eq!(body["ok"], true);
}

#[test]
fn test_debug_hides_token() {
    let config = HttpClientConfig::builder().access_token("secret").build();
    let client = HttpClient::with_config(config).unwrap();
    let debug = format!("{client:?}");
    assert!(!debug.contains("secret"));
    assert!(debug.contains("has_access_token: true"));
}
