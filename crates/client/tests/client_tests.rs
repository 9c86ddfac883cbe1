//! Client construction tests.
//!
//! Covers repository discovery, the construction-time schema fetch and
//! the headers every request carries:
//! - With no repository pinned, the first repository listed by the
//!   server is selected
//! - A pinned repository skips discovery entirely
//! - Construction fails when the schema endpoint errors
//! - Requests carry `Authorization: Bearer`, `Accept: application/hal+json`
//!   and the configured user agent

mod common;

use common::*;
use dms_client::DmsError;
use secrecy::SecretString;
use wiremock::matchers::{header, method, path};

#[tokio::test]
async fn test_build_discovers_first_repository() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dms/r/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("repositories/list.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_source_mapping(&mock_server).await;

    let client = DmsClientBuilder::new()
        .hostname(mock_server.uri())
        .api_key(SecretString::new(TEST_API_KEY.to_string().into()))
        .build()
        .await
        .unwrap();

    assert_eq!(client.repository(), "repo1");
    assert_eq!(
        client.mappings().key_to_display_name("a-long-property-guid-1234"),
        "Invoice number"
    );
}

#[tokio::test]
async fn test_build_pinned_repository_skips_discovery() {
    let mock_server = MockServer::start().await;

    // No /dms/r/ mock mounted: discovery would fail with 404.
    let client = test_client(&mock_server).await;

    assert_eq!(client.repository(), "repo1");
    assert_eq!(client.mappings().categories.len(), 2);
}

#[tokio::test]
async fn test_build_fails_on_schema_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dms/r/repo1/source"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let result = DmsClientBuilder::new()
        .hostname(mock_server.uri())
        .api_key(SecretString::new(TEST_API_KEY.to_string().into()))
        .repository(TEST_REPOSITORY)
        .build()
        .await;

    assert!(matches!(result, Err(DmsError::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_build_fails_on_empty_repository_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dms/r/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "repositories": [] })),
        )
        .mount(&mock_server)
        .await;

    let result = DmsClientBuilder::new()
        .hostname(mock_server.uri())
        .api_key(SecretString::new(TEST_API_KEY.to_string().into()))
        .build()
        .await;

    assert!(matches!(result, Err(DmsError::SchemaMismatch(_))));
}

#[tokio::test]
async fn test_requests_carry_auth_and_accept_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dms/r/repo1/source"))
        .and(header("Authorization", "Bearer secret-key"))
        .and(header("Accept", "application/hal+json"))
        .and(header("User-Agent", "custom-agent/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("mappings/source.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = DmsClientBuilder::new()
        .hostname(mock_server.uri())
        .api_key(SecretString::new("secret-key".to_string().into()))
        .repository(TEST_REPOSITORY)
        .user_agent("custom-agent/1.0")
        .build()
        .await;

    assert!(result.is_ok());
}
