//! Search filters and mutation request bodies.

use serde::Serialize;
use serde_json::{Map, Value};

/// A property constraint for a document search: key plus the list of
/// acceptable values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchProperty {
    pub key: String,
    pub values: Vec<String>,
}

/// Encode search property constraints as the JSON object the server
/// expects in the `sourceproperties` query parameter:
/// `{"<key>": ["value", ...], ...}`.
pub fn encode_search_properties(properties: &[SearchProperty]) -> String {
    let map: Map<String, Value> = properties
        .iter()
        .map(|p| (p.key.clone(), Value::from(p.values.clone())))
        .collect();
    Value::Object(map).to_string()
}

/// One or more values for a property, accepted from scalars or lists.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValues(pub Vec<String>);

impl From<&str> for PropertyValues {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for PropertyValues {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for PropertyValues {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<Vec<&str>> for PropertyValues {
    fn from(values: Vec<&str>) -> Self {
        Self(values.into_iter().map(str::to_string).collect())
    }
}

/// A key/values pair in a document creation or update body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadProperty {
    pub key: String,
    pub values: Vec<String>,
}

/// `sourceProperties` envelope of mutation bodies.
#[derive(Debug, Clone, Serialize)]
pub struct SourcePropertiesBody {
    pub properties: Vec<UploadProperty>,
}

/// Body of a property-update request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub source_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alteration_text: Option<String>,
    pub source_properties: SourcePropertiesBody,
}

/// Body of a document creation / new-version request referencing an
/// uploaded blob.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveDocumentRequest {
    pub source_id: String,
    pub filename: String,
    pub source_category: String,
    pub source_properties: SourcePropertiesBody,
    pub content_location_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alteration_text: Option<String>,
}
