//! Pagination accumulator for HAL+JSON list responses.
//!
//! List payloads carry their items under an `items` key and signal a
//! continuation page through `_links.next.href` (a path relative to
//! the host base). The accumulator concatenates pages in order, with
//! no dedup or reordering, and stops at a page boundary once the
//! caller-supplied limit is reached. A failure on any continuation
//! page fails the whole accumulation; no partial result is returned.

use reqwest::Client;
use secrecy::SecretString;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::endpoints::request::get_json;
use crate::error::{DmsError, Result};

/// Accumulate the items of a paginated response, starting from an
/// already-fetched first page.
///
/// A response without an `items` key is a single-object payload and
/// comes back as a one-element list, so callers need not care whether
/// the server answered with an object or an array.
pub(crate) async fn accumulate(
    http: &Client,
    host_base: &str,
    api_key: &SecretString,
    user_agent: &str,
    first_page: Value,
    limit: Option<usize>,
) -> Result<Vec<Value>> {
    let mut page = first_page;

    let mut items = match take_items(&mut page) {
        Some(items) => items,
        None => return Ok(vec![page]),
    };

    loop {
        if let Some(limit) = limit
            && items.len() >= limit
        {
            break;
        }
        let Some(next) = next_href(&page) else {
            break;
        };

        let url = join_href(host_base, &next)?;
        debug!(url, accumulated = items.len(), "Following pagination link");
        page = get_json(http, &url, api_key, user_agent, &[], None).await?;

        match take_items(&mut page) {
            Some(mut more) => items.append(&mut more),
            None => {
                return Err(DmsError::SchemaMismatch(format!(
                    "continuation page at {url} is missing 'items'"
                )));
            }
        }
    }

    Ok(items)
}

fn take_items(page: &mut Value) -> Option<Vec<Value>> {
    match page.get_mut("items") {
        Some(Value::Array(items)) => Some(std::mem::take(items)),
        _ => None,
    }
}

fn next_href(page: &Value) -> Option<String> {
    page.get("_links")?
        .get("next")?
        .get("href")?
        .as_str()
        .map(str::to_string)
}

fn join_href(host_base: &str, href: &str) -> Result<String> {
    let base = Url::parse(host_base)
        .map_err(|e| DmsError::InvalidUrl(format!("invalid host base '{host_base}': {e}")))?;
    let joined = base
        .join(href)
        .map_err(|e| DmsError::InvalidUrl(format!("invalid continuation href '{href}': {e}")))?;
    Ok(joined.to_string())
}
