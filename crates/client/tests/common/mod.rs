//! Common test utilities for integration tests.
//!
//! Provides shared helpers and re-exports commonly used types for
//! testing the DMS client against a wiremock server.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON

use secrecy::SecretString;

// Re-export test utilities from dms-client
#[allow(unused_imports)]
pub use dms_client::testing::load_fixture;

// Re-export commonly used types for test convenience
// These are used via `use common::*;` in test files
#[allow(unused_imports)]
pub use dms_client::{DmsClient, DmsClientBuilder, DocumentQuery, endpoints};
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Repository id used by the canned fixtures.
#[allow(dead_code)]
pub const TEST_REPOSITORY: &str = "repo1";

/// API key sent by clients built through [`test_client`].
#[allow(dead_code)]
pub const TEST_API_KEY: &str = "test-api-key";

/// Mount the schema endpoint for the fixture repository.
///
/// The builder fetches the schema during construction, so almost every
/// client-level test needs this mock.
#[allow(dead_code)]
pub async fn mount_source_mapping(mock_server: &MockServer) {
    Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/dms/r/repo1/source"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("mappings/source.json")),
        )
        .mount(mock_server)
        .await;
}

/// Build a client against the mock server with the fixture repository
/// pinned, mounting the schema endpoint it fetches on construction.
#[allow(dead_code)]
pub async fn test_client(mock_server: &MockServer) -> DmsClient {
    mount_source_mapping(mock_server).await;

    DmsClientBuilder::new()
        .hostname(mock_server.uri())
        .api_key(SecretString::new(TEST_API_KEY.to_string().into()))
        .repository(TEST_REPOSITORY)
        .build()
        .await
        .expect("client construction against mock server failed")
}

/// Build a minimal document object for synthesized result pages.
#[allow(dead_code)]
pub fn doc_item(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "_links": {
            "self": { "href": format!("/dms/r/repo1/o2m/{id}") },
            "mainblobcontent": { "href": format!("/dms/r/repo1/o2m/{id}/v/current/b/main/c") }
        },
        "sourceProperties": [
            { "key": "property_filename", "value": format!("{id}.pdf") }
        ],
        "sourceCategories": ["category-invoices-0001"]
    })
}
