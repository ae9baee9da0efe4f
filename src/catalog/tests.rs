//! Tests for the catalog module

use super::*;
use crate::analytics::SearchRecorder;
use crate::error::{AnalyticsError, FetchError};
use crate::http::{CatalogClient, HttpClientConfig};
use crate::types::{Movie, QueryKey};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use test_case::test_case;
use tokio::sync::Notify;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Recorder that remembers every call and can be told to fail
#[derive(Default)]
struct RecordingRecorder {
    calls: Mutex<Vec<(String, u64)>>,
    fail: bool,
    notify: Notify,
}

impl RecordingRecorder {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<(String, u64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchRecorder for RecordingRecorder {
    async fn record(&self, search_term: &str, movie: &Movie) -> Result<(), AnalyticsError> {
        self.calls
            .lock()
            .unwrap()
            .push((search_term.to_string(), movie.id));
        self.notify.notify_one();
        if self.fail {
            return Err(AnalyticsError::store("backend unavailable"));
        }
        Ok(())
    }
}

fn movies(ids: &[u64]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| json!({"id": id, "title": format!("Movie {id}")}))
            .collect(),
    )
}

fn fetcher_for(server: &MockServer, recorder: Arc<RecordingRecorder>) -> CatalogFetcher {
    let client = CatalogClient::new(
        HttpClientConfig::builder()
            .base_url(format!("{}/3", server.uri()))
            .api_key("test-key")
            .build(),
    )
    .unwrap();
    CatalogFetcher::new(client, recorder)
}

// ============================================================================
// QueryShape Tests
// ============================================================================

#[test_case(None, QueryShape::Discover ; "no term")]
#[test_case(Some(""), QueryShape::Discover ; "empty term")]
#[test_case(Some("  "), QueryShape::Discover ; "blank term")]
#[test_case(Some("dune"), QueryShape::Search { term: "dune".to_string() } ; "search term")]
fn test_shape_for_key(term: Option<&str>, expected: QueryShape) {
    assert_eq!(QueryShape::for_key(&QueryKey::new(term)), expected);
}

#[test]
fn test_discover_endpoint() {
    let base = Url::parse("https://api.themoviedb.org/3/").unwrap();
    let url = QueryShape::Discover.endpoint(&base, 1).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.themoviedb.org/3/discover/movie?sort_by=popularity.desc&page=1"
    );
}

#[test]
fn test_search_endpoint_escapes_term() {
    let base = Url::parse("https://api.themoviedb.org/3/").unwrap();
    let shape = QueryShape::Search {
        term: "star wars & co".to_string(),
    };
    let url = shape.endpoint(&base, 2).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.themoviedb.org/3/search/movie?query=star+wars+%26+co&page=2"
    );

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs[0], ("query".to_string(), "star wars & co".to_string()));
}

// ============================================================================
// CatalogFetcher Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_discover_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("page", "1"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": movies(&[1, 2, 3]),
            "total_pages": 5,
            "total_results": 100
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let recorder = Arc::new(RecordingRecorder::default());
    let fetcher = fetcher_for(&mock_server, recorder.clone());
    let page = fetcher.fetch(&QueryKey::discover(), 1).await.unwrap();

    let ids: Vec<u64> = page.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(page.next_cursor, 2);
    assert_eq!(page.total_pages, 5);
    assert!(recorder.calls().is_empty());
}

#[tokio::test]
async fn test_fetch_search_records_first_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "the thing"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": movies(&[1091, 2]),
            "total_pages": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let recorder = Arc::new(RecordingRecorder::default());
    let fetcher = fetcher_for(&mock_server, recorder.clone());
    let page = fetcher
        .fetch(&QueryKey::search("the thing"), 3)
        .await
        .unwrap();

    assert_eq!(page.next_cursor, 4);
    assert_eq!(recorder.calls(), vec![("the thing".to_string(), 1091)]);
}

#[tokio::test]
async fn test_fetch_search_without_results_skips_analytics() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "total_pages": 0
        })))
        .mount(&mock_server)
        .await;

    let recorder = Arc::new(RecordingRecorder::default());
    let fetcher = fetcher_for(&mock_server, recorder.clone());
    let page = fetcher.fetch(&QueryKey::search("zzzz"), 1).await.unwrap();

    assert!(page.items.is_empty());
    assert!(recorder.calls().is_empty());
}

#[tokio::test]
async fn test_analytics_failure_does_not_fail_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": movies(&[7]),
            "total_pages": 1
        })))
        .mount(&mock_server)
        .await;

    let recorder = Arc::new(RecordingRecorder::failing());
    let fetcher = fetcher_for(&mock_server, recorder.clone());
    let page = fetcher.fetch(&QueryKey::search("se7en"), 1).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(recorder.calls().len(), 1);
}

#[tokio::test]
async fn test_detached_analytics_runs_in_background() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": movies(&[42]),
            "total_pages": 1
        })))
        .mount(&mock_server)
        .await;

    let recorder = Arc::new(RecordingRecorder::failing());
    let fetcher =
        fetcher_for(&mock_server, recorder.clone()).with_dispatch(AnalyticsDispatch::Detached);
    let page = fetcher.fetch(&QueryKey::search("answer"), 1).await.unwrap();
    assert_eq!(page.items.len(), 1);

    tokio::time::timeout(Duration::from_secs(5), recorder.notify.notified())
        .await
        .expect("recorder was not called");
    assert_eq!(recorder.calls(), vec![("answer".to_string(), 42)]);
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server, Arc::new(RecordingRecorder::default()));
    let err = fetcher.fetch(&QueryKey::discover(), 1).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 500 }));
    assert_eq!(err.to_string(), "Failed to fetch movies");
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"title": "missing id"}],
            "total_pages": 1
        })))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server, Arc::new(RecordingRecorder::default()));
    let err = fetcher.fetch(&QueryKey::discover(), 1).await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_fetch_tolerates_missing_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": 1})))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server, Arc::new(RecordingRecorder::default()));
    let page = fetcher.fetch(&QueryKey::discover(), 1).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn test_fetch_rejects_cursor_zero() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server, Arc::new(RecordingRecorder::default()));
    let err = fetcher.fetch(&QueryKey::discover(), 0).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidCursor(0)));
}

#[tokio::test]
async fn test_fetch_rejects_last_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": movies(&[1]),
            "total_pages": 1
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server, Arc::new(RecordingRecorder::default()));
    let err = fetcher
        .fetch(&QueryKey::discover(), u32::MAX)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::InvalidCursor(u32::MAX)));
}
