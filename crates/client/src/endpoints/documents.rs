//! Document search, retrieval, mutation and blob transfer endpoints.

use reqwest::{Client, Method};
use secrecy::SecretString;

use crate::endpoints::pagination::accumulate;
use crate::endpoints::request::{
    document_id_from_location, get_binary, get_json, location_header, post_binary, send_json,
};
use crate::error::{DmsError, Result};
use crate::models::document::DmsDocument;
use crate::models::search::{ArchiveDocumentRequest, UpdateDocumentRequest};

/// Fetch documents from a search (`srm`) or direct (`o2m/{id}`) URL,
/// accumulating continuation pages and normalizing every result.
///
/// Tolerates the server answering with a single object instead of an
/// `items` array; the result is then a one-element list.
pub async fn fetch_documents(
    http: &Client,
    host_base: &str,
    url: &str,
    api_key: &SecretString,
    user_agent: &str,
    query: &[(String, String)],
    limit: Option<usize>,
) -> Result<Vec<DmsDocument>> {
    let first_page = get_json(http, url, api_key, user_agent, query, None).await?;
    let items = accumulate(http, host_base, api_key, user_agent, first_page, limit).await?;
    items.into_iter().map(DmsDocument::from_value).collect()
}

/// Issue a property-update request against a document URL.
///
/// Any non-2xx status is an error; the response body is not used.
pub async fn update_document(
    http: &Client,
    url: &str,
    api_key: &SecretString,
    user_agent: &str,
    body: &UpdateDocumentRequest,
) -> Result<()> {
    send_json(http, Method::PUT, url, api_key, user_agent, body).await?;
    Ok(())
}

/// Upload file content as a binary blob.
///
/// The server contract for a successful upload is exactly HTTP 201
/// with a `Location` header addressing the stored blob; anything else
/// fails the call.
pub async fn upload_blob(
    http: &Client,
    repo_url: &str,
    api_key: &SecretString,
    user_agent: &str,
    content: Vec<u8>,
) -> Result<String> {
    let url = format!("{repo_url}/blob/chunk/");
    let response = post_binary(http, &url, api_key, user_agent, content).await?;

    let status = response.status().as_u16();
    if status != 201 {
        let url = response.url().to_string();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "could not read error response body".to_string());
        return Err(DmsError::Api {
            status,
            url,
            message,
        });
    }

    location_header(&response)
}

/// Create a new document referencing an uploaded blob.
///
/// Returns the new document's id parsed from the `Location` header,
/// degrading to the `"unknown"` sentinel when the header is absent or
/// unparsable.
pub async fn create_document(
    http: &Client,
    repo_url: &str,
    api_key: &SecretString,
    user_agent: &str,
    body: &ArchiveDocumentRequest,
) -> Result<String> {
    let url = format!("{repo_url}/o2m");
    let response = send_json(http, Method::POST, &url, api_key, user_agent, body).await?;
    Ok(location_header(&response)
        .map(|location| document_id_from_location(&location))
        .unwrap_or_else(|_| document_id_from_location("")))
}

/// Create a new version of an existing document from an uploaded blob.
///
/// Same `Location` handling as [`create_document`].
pub async fn create_document_version(
    http: &Client,
    document_url: &str,
    api_key: &SecretString,
    user_agent: &str,
    body: &ArchiveDocumentRequest,
) -> Result<String> {
    let response = send_json(http, Method::PUT, document_url, api_key, user_agent, body).await?;
    Ok(location_header(&response)
        .map(|location| document_id_from_location(&location))
        .unwrap_or_else(|_| document_id_from_location("")))
}

/// Download a blob by its href, resolved against the host base.
pub async fn download_blob(
    http: &Client,
    host_base: &str,
    api_key: &SecretString,
    user_agent: &str,
    href: &str,
) -> Result<Vec<u8>> {
    let url = if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{host_base}{href}")
    };
    get_binary(http, &url, api_key, user_agent).await
}
