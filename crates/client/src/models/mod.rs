//! Data models for the DMS API.
//!
//! Wire payloads use camelCase; raw deserialization types live next to
//! the normalized types they convert into.

pub mod document;
pub mod mappings;
pub mod search;
pub mod user;

pub use document::{DmsDocument, DocumentLinks, SourceProperty};
pub use mappings::{Category, Mappings, Property, PropertyType};
pub use search::{
    ArchiveDocumentRequest, PropertyValues, SearchProperty, SourcePropertiesBody,
    UpdateDocumentRequest, UploadProperty,
};
pub use user::DmsUser;
