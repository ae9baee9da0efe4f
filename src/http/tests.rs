//! Tests for the HTTP client module

use super::*;
use crate::config::{CatalogConfig, RateLimitConfig};
use crate::error::FetchError;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/3", server.uri()))
        .api_key("test-key")
        .build();
    CatalogClient::new(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.base_url, "https://api.themoviedb.org/3");
    assert!(config.api_key.is_none());
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("movie-feed/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://catalog.example.com/v3")
        .api_key("k")
        .timeout(Duration::from_secs(5))
        .rate_limit(RateLimitConfig {
            requests_per_second: 2,
            burst: None,
        })
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, "https://catalog.example.com/v3");
    assert_eq!(config.api_key.as_deref(), Some("k"));
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert!(config.rate_limit.is_some());
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_from_catalog_config() {
    let catalog = CatalogConfig {
        api_key: Some("abc".to_string()),
        timeout_secs: 7,
        ..CatalogConfig::default()
    };
    let config = HttpClientConfig::from_catalog(&catalog);
    assert_eq!(config.api_key.as_deref(), Some("abc"));
    assert_eq!(config.timeout, Duration::from_secs(7));
}

#[test]
fn test_base_url_gets_trailing_slash() {
    let client = CatalogClient::new(
        HttpClientConfig::builder()
            .base_url("https://api.themoviedb.org/3")
            .build(),
    )
    .unwrap();
    assert_eq!(client.base_url().as_str(), "https://api.themoviedb.org/3/");
    assert!(!client.has_rate_limiter());
}

#[test]
fn test_invalid_base_url() {
    let result = CatalogClient::new(HttpClientConfig::builder().base_url("not a url").build());
    assert!(result.is_err());
}

#[tokio::test]
async fn test_get_json_sends_auth_and_accept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .and(query_param("page", "1"))
        .and(header("Authorization", "Bearer test-key"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 42})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = client.base_url().join("discover/movie?page=1").unwrap();
    let data: Value = client.get_json(url).await.unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_get_json_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status_message": "Invalid API key"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = client.base_url().join("discover/movie").unwrap();
    let err = client.get_json::<Value>(url).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 401 }));
    assert_eq!(err.to_string(), "Failed to fetch movies");
}

#[tokio::test]
async fn test_get_json_does_not_retry_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = client.base_url().join("discover/movie").unwrap();
    let err = client.get_json::<Value>(url).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_get_json_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = client.base_url().join("discover/movie").unwrap();
    let err = client.get_json::<Value>(url).await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_get_json_connection_refused() {
    // Nothing listens on the discard port
    let client = CatalogClient::new(
        HttpClientConfig::builder()
            .base_url("http://127.0.0.1:9")
            .timeout(Duration::from_secs(2))
            .build(),
    )
    .unwrap();
    let url = client.base_url().join("discover/movie").unwrap();
    let err = client.get_json::<Value>(url).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("X-Request-Source", "feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(
        HttpClientConfig::builder()
            .base_url(mock_server.uri())
            .header("X-Request-Source", "feed")
            .build(),
    )
    .unwrap();
    let url = client.base_url().join("anything").unwrap();
    let _: Value = client.get_json(url).await.unwrap();
}
