use std::time::Duration;

use harvester_core::{CdxQuery, Domain, ResumeKey, DEFAULT_PAGE_SIZE};
use harvester_engine::{FailureKind, FetchSettings, IndexClient, ReqwestIndexClient};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CDX_PATH: &str = "/cdx/search/cdx";

fn client_for(server: &MockServer, settings: FetchSettings) -> ReqwestIndexClient {
    ReqwestIndexClient::new(FetchSettings {
        endpoint: format!("{}{}", server.uri(), CDX_PATH),
        ..settings
    })
    .expect("client")
}

fn query(resume_key: Option<&str>) -> CdxQuery {
    CdxQuery::new(
        Domain::parse("example.com").unwrap(),
        DEFAULT_PAGE_SIZE,
        true,
        resume_key.and_then(ResumeKey::new),
    )
}

#[tokio::test]
async fn sends_cdx_parameters_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CDX_PATH))
        .and(query_param("url", "example.com/*"))
        .and(query_param("output", "json"))
        .and(query_param("fl", "original"))
        .and(query_param("limit", "5000"))
        .and(query_param("showResumeKey", "true"))
        .and(query_param("collapse", "original"))
        .and(query_param_is_missing("resumeKey"))
        .and(header("user-agent", "wayback-resume-harvester/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            ["original"],
            ["http://example.com/a"],
            [],
            ["key-1"]
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, FetchSettings::default());
    let rows = client.fetch_page(&query(None)).await.expect("fetch ok");

    assert_eq!(
        rows,
        vec![
            vec!["original".to_string()],
            vec!["http://example.com/a".to_string()],
            Vec::new(),
            vec!["key-1".to_string()],
        ]
    );
}

#[tokio::test]
async fn resume_key_is_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CDX_PATH))
        .and(query_param("resumeKey", "com,example)/a+2024 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([["original"]])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, FetchSettings::default());
    let rows = client
        .fetch_page(&query(Some("com,example)/a+2024 1")))
        .await
        .expect("fetch ok");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CDX_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server, FetchSettings::default());
    let err = client.fetch_page(&query(None)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CDX_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!([["original"]])),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        read_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let client = client_for(&server, settings);
    let err = client.fetch_page(&query(None)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert!(err.is_transient());
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CDX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, FetchSettings::default());
    let err = client.fetch_page(&query(None)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CDX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("[[\"original\"],[\"http://example.com/a\"]]"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let client = client_for(&server, settings);
    let err = client.fetch_page(&query(None)).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }));
}

#[test]
fn body_cap_grows_with_page_size() {
    let default_cap = FetchSettings::default().max_bytes;
    assert_eq!(FetchSettings::default().sized_for_page(10).max_bytes, default_cap);

    let large = FetchSettings::default().sized_for_page(100_000);
    assert_eq!(large.max_bytes, 100_000 * FetchSettings::BYTES_PER_RECORD);
    assert!(large.max_bytes > default_cap);
}

#[test]
fn invalid_endpoint_is_rejected_up_front() {
    let err = ReqwestIndexClient::new(FetchSettings {
        endpoint: "not a url".to_string(),
        ..FetchSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
