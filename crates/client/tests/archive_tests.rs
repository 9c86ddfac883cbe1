//! Archive workflow tests: blob upload followed by document creation
//! or versioning.
//!
//! # Invariants
//! - The blob upload succeeds only on exactly HTTP 201 with a
//!   `Location` header; anything else aborts before the document step
//! - A `property_state = Release` entry is always appended to the
//!   submitted properties
//! - The returned id is the trailing path segment of the document
//!   response's `Location` header, or `"unknown"` when that header is
//!   absent

mod common;

use common::*;
use dms_client::DmsError;
use dms_client::models::UploadProperty;
use wiremock::matchers::{body_string_contains, header, method, path};

fn write_temp_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

async fn mount_blob_upload(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/dms/r/repo1/blob/chunk/"))
        .and(header("Content-Type", "application/octet-stream"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", "/dms/r/repo1/blob/chunk/B777"),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_archive_file_creates_document() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server).await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "invoice.pdf", b"%PDF-1.7 content");

    mount_blob_upload(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/dms/r/repo1/o2m"))
        .and(body_string_contains("invoice.pdf"))
        .and(body_string_contains("category-invoices-0001"))
        .and(body_string_contains("/dms/r/repo1/blob/chunk/B777"))
        .and(body_string_contains("property_state"))
        .and(body_string_contains("Release"))
        .respond_with(
            ResponseTemplate::new(201).insert_header("Location", "/dms/r/repo1/o2m/D555"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let new_id = client
        .archive_file(&file, "category-invoices-0001", Vec::new(), None, None)
        .await
        .unwrap();
    assert_eq!(new_id, "D555");
}

#[tokio::test]
async fn test_archive_file_strips_location_query() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server).await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "invoice.pdf", b"content");

    mount_blob_upload(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/dms/r/repo1/o2m"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", "/dms/r/repo1/o2m/D556?version=1"),
        )
        .mount(&mock_server)
        .await;

    let new_id = client
        .archive_file(&file, "category-invoices-0001", Vec::new(), None, None)
        .await
        .unwrap();
    assert_eq!(new_id, "D556");
}

#[tokio::test]
async fn test_archive_file_submits_supplied_properties() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server).await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "invoice.pdf", b"content");

    mount_blob_upload(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/dms/r/repo1/o2m"))
        .and(body_string_contains("a-long-property-guid-1234"))
        .and(body_string_contains("INV-2024-010"))
        .and(body_string_contains("property_state"))
        .respond_with(
            ResponseTemplate::new(201).insert_header("Location", "/dms/r/repo1/o2m/D557"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let properties = vec![UploadProperty {
        key: "a-long-property-guid-1234".to_string(),
        values: vec!["INV-2024-010".to_string()],
    }];
    let new_id = client
        .archive_file(&file, "category-invoices-0001", properties, None, None)
        .await
        .unwrap();
    assert_eq!(new_id, "D557");
}

#[tokio::test]
async fn test_archive_file_versions_existing_document() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server).await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "invoice-v2.pdf", b"updated content");

    mount_blob_upload(&mock_server).await;
    Mock::given(method("PUT"))
        .and(path("/dms/r/repo1/o2m/D100"))
        .and(body_string_contains("alterationText"))
        .and(body_string_contains("second version"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Location", "/dms/r/repo1/o2m/D100"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let new_id = client
        .archive_file(
            &file,
            "category-invoices-0001",
            Vec::new(),
            Some("D100"),
            Some("second version"),
        )
        .await
        .unwrap();
    assert_eq!(new_id, "D100");
}

#[tokio::test]
async fn test_archive_file_fails_on_non_201_upload() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server).await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "invoice.pdf", b"content");

    Mock::given(method("POST"))
        .and(path("/dms/r/repo1/blob/chunk/"))
        .respond_with(ResponseTemplate::new(200).insert_header("Location", "/blob/B1"))
        .mount(&mock_server)
        .await;
    // The document endpoint must never be reached.
    Mock::given(method("POST"))
        .and(path("/dms/r/repo1/o2m"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client
        .archive_file(&file, "category-invoices-0001", Vec::new(), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DmsError::Api { status: 200, .. }));
}

#[tokio::test]
async fn test_archive_file_fails_when_upload_lacks_location() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server).await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "invoice.pdf", b"content");

    Mock::given(method("POST"))
        .and(path("/dms/r/repo1/blob/chunk/"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let err = client
        .archive_file(&file, "category-invoices-0001", Vec::new(), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DmsError::MissingHeader { header: "Location", .. }));
}

#[tokio::test]
async fn test_archive_file_unknown_id_when_document_location_missing() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server).await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "invoice.pdf", b"content");

    mount_blob_upload(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/dms/r/repo1/o2m"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let new_id = client
        .archive_file(&file, "category-invoices-0001", Vec::new(), None, None)
        .await
        .unwrap();
    assert_eq!(new_id, "unknown");
}

#[tokio::test]
async fn test_archive_missing_file_is_io_error() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server).await;
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.pdf");

    let err = client
        .archive_file(&missing, "category-invoices-0001", Vec::new(), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DmsError::Io(_)));
}
