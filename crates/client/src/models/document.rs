//! Document model and HAL+JSON normalization.
//!
//! The server returns documents as property bags with an embedded
//! `_links` object. Deserialization happens in two steps: serde maps
//! the wire shape into [`RawDocument`], then a fallible conversion
//! validates the mandatory link relations and derives the convenience
//! fields from well-known property keys.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{DmsError, Result};

/// Well-known property key for the creation timestamp.
pub const PROP_CREATION_DATE: &str = "property_creation_date";
/// Well-known property key for the last-modified timestamp.
pub const PROP_LAST_MODIFIED_DATE: &str = "property_last_modified_date";
/// Well-known property key for the current editor.
pub const PROP_EDITOR: &str = "property_editor";
/// Well-known property key for the owner.
pub const PROP_OWNER: &str = "property_owner";
/// Well-known property key for the document state.
pub const PROP_STATE: &str = "property_state";
/// Well-known property key for the file name.
pub const PROP_FILENAME: &str = "property_filename";

/// Fixed timestamp format used by date-valued properties,
/// e.g. `2024-03-07T10:15:30.123456+0100`.
const DMS_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// A document's property value instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceProperty {
    pub key: String,
    /// Single value, string-typed regardless of the declared type.
    #[serde(default)]
    pub value: String,
    /// Values of a multi-value property, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Human-readable rendering of the value, when the server sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_multi_value: Option<bool>,
}

/// A single HAL link object.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Link {
    pub href: String,
}

/// Wire shape of a document, before normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDocument {
    pub id: String,
    #[serde(rename = "_links", default)]
    pub links: HashMap<String, Link>,
    #[serde(default)]
    pub source_properties: Vec<SourceProperty>,
    #[serde(default)]
    pub source_categories: Vec<String>,
}

/// Navigational links of a document.
///
/// `links_self` and `mainblobcontent` are guaranteed by the server
/// contract; every other relation depends on document state and the
/// caller's permissions and is absent rather than fabricated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentLinks {
    pub links_self: String,
    pub mainblobcontent: String,
    pub pdfblobcontent: Option<String>,
    pub preview_readonly: Option<String>,
    pub update: Option<String>,
    pub update_with_content: Option<String>,
    pub delete_with_reason: Option<String>,
    pub versions: Option<String>,
    pub display_version: Option<String>,
    pub notes: Option<String>,
}

impl DocumentLinks {
    fn from_map(doc_id: &str, mut links: HashMap<String, Link>) -> Result<Self> {
        let mut take = |rel: &str| links.remove(rel).map(|l| l.href);

        let links_self = take("self").ok_or_else(|| {
            DmsError::SchemaMismatch(format!(
                "document '{doc_id}' is missing mandatory link relation 'self'"
            ))
        })?;
        let mainblobcontent = take("mainblobcontent").ok_or_else(|| {
            DmsError::SchemaMismatch(format!(
                "document '{doc_id}' is missing mandatory link relation 'mainblobcontent'"
            ))
        })?;

        Ok(Self {
            links_self,
            mainblobcontent,
            pdfblobcontent: take("pdfblobcontent"),
            preview_readonly: take("previewReadonly"),
            update: take("update"),
            update_with_content: take("updateWithContent"),
            delete_with_reason: take("deleteWithReason"),
            versions: take("versions"),
            display_version: take("displayVersion"),
            notes: take("notes"),
        })
    }
}

/// A normalized DMS document.
#[derive(Debug, Clone)]
pub struct DmsDocument {
    pub id: String,
    pub links: DocumentLinks,
    pub source_properties: Vec<SourceProperty>,
    pub source_categories: Vec<String>,
    /// Derived from [`PROP_EDITOR`].
    pub editor: Option<String>,
    /// Derived from [`PROP_OWNER`].
    pub owner: Option<String>,
    /// Derived from [`PROP_STATE`].
    pub state: Option<String>,
    /// Derived from [`PROP_FILENAME`].
    pub filename: Option<String>,
    /// Derived from [`PROP_CREATION_DATE`]; `None` when the property
    /// is absent or its value does not parse.
    pub creation_date: Option<DateTime<FixedOffset>>,
    /// Derived from [`PROP_LAST_MODIFIED_DATE`], same parse rules.
    pub last_modified_date: Option<DateTime<FixedOffset>>,
}

impl DmsDocument {
    /// Normalize a raw JSON document payload.
    ///
    /// # Errors
    ///
    /// Returns [`DmsError::SchemaMismatch`] when required fields or
    /// mandatory link relations are absent. Unknown wire fields are
    /// ignored; missing or unparsable date properties degrade to
    /// `None` instead of failing.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawDocument = serde_json::from_value(value)
            .map_err(|e| DmsError::SchemaMismatch(format!("malformed document payload: {e}")))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> Result<Self> {
        let links = DocumentLinks::from_map(&raw.id, raw.links)?;
        let props = raw.source_properties;

        Ok(Self {
            editor: derived_string(&props, PROP_EDITOR),
            owner: derived_string(&props, PROP_OWNER),
            state: derived_string(&props, PROP_STATE),
            filename: derived_string(&props, PROP_FILENAME),
            creation_date: derived_date(&props, PROP_CREATION_DATE),
            last_modified_date: derived_date(&props, PROP_LAST_MODIFIED_DATE),
            id: raw.id,
            links,
            source_properties: props,
            source_categories: raw.source_categories,
        })
    }

    /// Look up a source property by its key.
    pub fn property(&self, key: &str) -> Option<&SourceProperty> {
        self.source_properties.iter().find(|p| p.key == key)
    }
}

/// Parse a date-valued property in the fixed DMS timestamp format.
///
/// Unparsable input yields `None`; derived date fields are best-effort.
pub fn parse_dms_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, DMS_DATETIME_FORMAT).ok()
}

fn derived_string(props: &[SourceProperty], key: &str) -> Option<String> {
    props
        .iter()
        .find(|p| p.key == key)
        .map(|p| p.value.clone())
        .filter(|v| !v.is_empty())
}

fn derived_date(props: &[SourceProperty], key: &str) -> Option<DateTime<FixedOffset>> {
    props
        .iter()
        .find(|p| p.key == key)
        .and_then(|p| parse_dms_datetime(&p.value))
}
