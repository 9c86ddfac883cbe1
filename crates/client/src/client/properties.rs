//! Display-name resolution and property-bag builders.
//!
//! All methods here are pure data-building against the cached schema;
//! none of them perform I/O. Display names are resolved to keys via
//! the schema; a string that already equals an existing key is
//! accepted as an explicit key.

use std::collections::BTreeMap;

use crate::client::DmsClient;
use crate::error::{DmsError, Result};
use crate::models::document::{DmsDocument, SourceProperty};
use crate::models::mappings::Category;
use crate::models::search::{PropertyValues, SearchProperty, UploadProperty};

/// Property key → values map for update requests.
pub type PropertyMap = BTreeMap<String, Vec<String>>;

impl DmsClient {
    /// Resolve a property display name, or accept an existing key.
    fn property_key_for(&self, name: &str) -> Result<String> {
        if let Some(key) = self.mappings.resolve_property_key(name) {
            return Ok(key.to_string());
        }
        if self.mappings.has_property_key(name) {
            return Ok(name.to_string());
        }
        Err(DmsError::NotFound(format!(
            "no property named '{name}' in the repository schema"
        )))
    }

    /// Resolve a category display name, or accept an existing key.
    fn category_key_for(&self, name: &str) -> Result<String> {
        if let Some(key) = self.mappings.resolve_category_key(name) {
            return Ok(key.to_string());
        }
        if self.mappings.has_category_key(name) {
            return Ok(name.to_string());
        }
        Err(DmsError::NotFound(format!(
            "no category named '{name}' in the repository schema"
        )))
    }

    /// Add a property entry to an update map, resolving the display
    /// name to its key. An existing entry for the same key is
    /// replaced.
    pub fn add_property(
        &self,
        display_name: &str,
        values: impl Into<PropertyValues>,
        mut properties: PropertyMap,
    ) -> Result<PropertyMap> {
        let key = self.property_key_for(display_name)?;
        properties.insert(key, values.into().0);
        Ok(properties)
    }

    /// Append a search constraint, resolving the display name.
    pub fn add_search_property(
        &self,
        display_name: &str,
        values: impl Into<PropertyValues>,
        mut properties: Vec<SearchProperty>,
    ) -> Result<Vec<SearchProperty>> {
        let key = self.property_key_for(display_name)?;
        properties.push(SearchProperty {
            key,
            values: values.into().0,
        });
        Ok(properties)
    }

    /// Append an upload property for an archive request, resolving the
    /// display name.
    pub fn add_upload_property(
        &self,
        display_name: &str,
        values: impl Into<PropertyValues>,
        mut properties: Vec<UploadProperty>,
    ) -> Result<Vec<UploadProperty>> {
        let key = self.property_key_for(display_name)?;
        properties.push(UploadProperty {
            key,
            values: values.into().0,
        });
        Ok(properties)
    }

    /// Append a category key, resolving the display name.
    pub fn add_category(
        &self,
        display_name: &str,
        mut categories: Vec<String>,
    ) -> Result<Vec<String>> {
        let key = self.category_key_for(display_name)?;
        categories.push(key);
        Ok(categories)
    }

    /// The cached schema's category list. No I/O.
    pub fn get_categories(&self) -> &[Category] {
        &self.mappings.categories
    }

    /// Resolve a key back to its display name; empty string when the
    /// key matches neither a property nor a category.
    pub fn key_to_display_name(&self, key: &str) -> String {
        self.mappings.key_to_display_name(key)
    }

    /// Resolve a multi-value candidate key list back to a display
    /// name; see [`crate::models::Mappings::select_candidate_key`].
    pub fn candidate_key_to_display_name(&self, candidates: &[String]) -> String {
        self.mappings.candidate_key_to_display_name(candidates)
    }

    /// Look up a property's value on a fetched document by display
    /// name (or explicit key).
    pub fn get_property_value(&self, document: &DmsDocument, display_name: &str) -> Option<String> {
        let key = self.property_key_for(display_name).ok()?;
        document.property(&key).map(|p| p.value.clone())
    }

    /// Look up a property record on a fetched document by its explicit
    /// key, exposing display value and multi-values alongside the
    /// value.
    pub fn get_property_value2<'a>(
        &self,
        document: &'a DmsDocument,
        key: &str,
    ) -> Option<&'a SourceProperty> {
        document.property(key)
    }
}
