//! Repository schema ("source mappings") and key resolution.
//!
//! The schema describes the properties and categories available in a
//! repository. It is fetched once when the client is built and treated
//! as immutable for the client's lifetime; all display-name lookups
//! resolve against this snapshot.

use serde::{Deserialize, Serialize};

/// Declared type of a repository property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    ColorCode,
    Date,
    DateTime,
    Double,
    Money,
    String,
}

/// A typed, named field attachable to documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Stable key the server addresses this property by.
    pub key: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Human-readable name shown to users.
    pub display_name: String,
}

/// A named classification assignable to documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub key: String,
    pub display_name: String,
}

/// Schema snapshot for a repository.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mappings {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Keys shorter than this are treated as short codes rather than real
/// property keys when picking a key out of a multi-value candidate
/// list. Undocumented upstream; do not read more into it than "keys
/// are long, other tokens are short".
const MIN_KEY_LENGTH: usize = 10;

impl Mappings {
    /// Resolve a property display name to its key.
    ///
    /// Matching is a case-insensitive exact comparison. `None` means
    /// the schema has no such property; the caller decides whether
    /// that is fatal.
    pub fn resolve_property_key(&self, display_name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.display_name.eq_ignore_ascii_case(display_name))
            .map(|p| p.key.as_str())
    }

    /// Resolve a category display name to its key.
    pub fn resolve_category_key(&self, display_name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.display_name.eq_ignore_ascii_case(display_name))
            .map(|c| c.key.as_str())
    }

    /// Check whether `key` is a known property key.
    pub fn has_property_key(&self, key: &str) -> bool {
        self.properties.iter().any(|p| p.key == key)
    }

    /// Check whether `key` is a known category key.
    pub fn has_category_key(&self, key: &str) -> bool {
        self.categories.iter().any(|c| c.key == key)
    }

    /// Resolve a key back to its display name.
    ///
    /// Property keys are checked before category keys. Returns an
    /// empty string when the key matches neither.
    pub fn key_to_display_name(&self, key: &str) -> String {
        if let Some(p) = self.properties.iter().find(|p| p.key == key) {
            return p.display_name.clone();
        }
        if let Some(c) = self.categories.iter().find(|c| c.key == key) {
            return c.display_name.clone();
        }
        String::new()
    }

    /// Resolve a list of candidate keys (as multi-value properties
    /// sometimes carry) back to a display name.
    ///
    /// Delegates key selection to [`Mappings::select_candidate_key`];
    /// when no candidate qualifies, returns an empty string.
    pub fn candidate_key_to_display_name(&self, candidates: &[String]) -> String {
        Self::select_candidate_key(candidates)
            .map(|key| self.key_to_display_name(key))
            .unwrap_or_default()
    }

    /// Pick the canonical key out of a candidate list: the first
    /// element longer than ten characters.
    ///
    /// This length heuristic mirrors the upstream behavior for telling
    /// a real property key apart from a short code. It is provisional
    /// until the API owner confirms the actual disambiguation rule,
    /// which is why it is isolated here.
    pub fn select_candidate_key(candidates: &[String]) -> Option<&str> {
        candidates
            .iter()
            .find(|c| c.len() > MIN_KEY_LENGTH)
            .map(String::as_str)
    }
}
