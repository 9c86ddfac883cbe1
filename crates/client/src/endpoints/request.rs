//! Request assembly and response classification.
//!
//! Every outbound call goes through the helpers here: bearer-token
//! headers, non-2xx classification into [`DmsError::Api`], and JSON
//! parsing that keeps the raw body for diagnosis. GET responses are
//! optionally served from the injected [`ResponseCache`].
//!
//! No retries happen at this layer; a transport failure is surfaced to
//! the caller as-is.

use reqwest::{Client, Method, Response, header};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::auth::bearer_header;
use crate::client::cache::{CacheEntry, CacheKey, CachePolicy, ResponseCache};
use crate::error::{DmsError, Result};

/// Accept header for HAL+JSON resources.
pub(crate) const ACCEPT_HAL_JSON: &str = "application/hal+json";
/// Accept / Content-Type header for binary blob transfer.
pub(crate) const ACCEPT_OCTET_STREAM: &str = "application/octet-stream";

/// Sentinel document id used when the `Location` header of a creation
/// response cannot be parsed. The id is cosmetic for callers that
/// proceed by other means, so this degrades instead of failing.
pub(crate) const UNKNOWN_DOCUMENT_ID: &str = "unknown";

fn base_headers(
    builder: reqwest::RequestBuilder,
    api_key: &SecretString,
    user_agent: &str,
    accept: &str,
) -> reqwest::RequestBuilder {
    builder
        .header(header::ACCEPT, accept)
        .header(header::AUTHORIZATION, bearer_header(api_key))
        .header(header::USER_AGENT, user_agent)
}

/// Map a non-success response to [`DmsError::Api`], reading the body
/// as the server-provided message.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "could not read error response body".to_string());
    error!(status = status.as_u16(), url, "DMS request failed");
    Err(DmsError::Api {
        status: status.as_u16(),
        url,
        message,
    })
}

fn parse_json(url: &str, body: String) -> Result<Value> {
    serde_json::from_str(&body).map_err(|e| DmsError::InvalidResponse {
        context: format!("invalid JSON from {url}: {e}"),
        body,
    })
}

/// Issue an authenticated HAL+JSON GET and parse the body.
///
/// When a cache is supplied and its policy allows caching the URL, the
/// response body is served from / stored into it.
pub async fn get_json(
    http: &Client,
    url: &str,
    api_key: &SecretString,
    user_agent: &str,
    query: &[(String, String)],
    cache: Option<&ResponseCache>,
) -> Result<Value> {
    let policy = cache
        .map(|c| c.policy_for(url))
        .unwrap_or(CachePolicy::NoCache);
    let cache_key = CacheKey::new(url.to_string(), query.to_vec());

    if let (Some(cache), CachePolicy::CacheWithTtl(_)) = (cache, policy)
        && let Some(entry) = cache.get(&cache_key).await
    {
        return parse_json(url, entry.body);
    }

    let mut builder = base_headers(http.get(url), api_key, user_agent, ACCEPT_HAL_JSON);
    if !query.is_empty() {
        builder = builder.query(query);
    }

    debug!(method = "GET", url, "Sending DMS request");
    let response = check_status(builder.send().await?).await?;
    let final_url = response.url().to_string();
    let body = response.text().await?;

    if let (Some(cache), CachePolicy::CacheWithTtl(ttl)) = (cache, policy) {
        cache
            .insert(cache_key, CacheEntry::new(body.clone(), ttl))
            .await;
    }

    parse_json(&final_url, body)
}

/// Issue an authenticated GET for binary content.
pub(crate) async fn get_binary(
    http: &Client,
    url: &str,
    api_key: &SecretString,
    user_agent: &str,
) -> Result<Vec<u8>> {
    debug!(method = "GET", url, "Downloading binary content");
    let builder = base_headers(http.get(url), api_key, user_agent, ACCEPT_OCTET_STREAM);
    let response = check_status(builder.send().await?).await?;
    Ok(response.bytes().await?.to_vec())
}

/// Issue an authenticated request with a JSON body and classify the
/// status, returning the raw response for header extraction.
pub(crate) async fn send_json<B: Serialize + ?Sized>(
    http: &Client,
    method: Method,
    url: &str,
    api_key: &SecretString,
    user_agent: &str,
    body: &B,
) -> Result<Response> {
    debug!(method = %method, url, "Sending DMS request");
    let builder = base_headers(
        http.request(method, url),
        api_key,
        user_agent,
        ACCEPT_HAL_JSON,
    )
    .json(body);
    check_status(builder.send().await?).await
}

/// POST binary content without status classification; blob upload has
/// its own success contract (exactly 201).
pub(crate) async fn post_binary(
    http: &Client,
    url: &str,
    api_key: &SecretString,
    user_agent: &str,
    content: Vec<u8>,
) -> Result<Response> {
    debug!(method = "POST", url, bytes = content.len(), "Uploading blob");
    let builder = base_headers(http.post(url), api_key, user_agent, ACCEPT_HAL_JSON)
        .header(header::CONTENT_TYPE, ACCEPT_OCTET_STREAM)
        .body(content);
    Ok(builder.send().await?)
}

/// Extract the `Location` header of a response.
pub(crate) fn location_header(response: &Response) -> Result<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| DmsError::MissingHeader {
            header: "Location",
            url: response.url().to_string(),
        })
}

/// Parse a document id out of a `Location` header value: the last path
/// segment, stripped of any query string.
///
/// Returns [`UNKNOWN_DOCUMENT_ID`] when no segment can be extracted;
/// this never fails.
pub fn document_id_from_location(location: &str) -> String {
    location
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_DOCUMENT_ID.to_string())
}
