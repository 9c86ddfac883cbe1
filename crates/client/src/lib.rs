//! DMS REST API client.
//!
//! This crate provides a typed client for a d.velop-style document
//! management system's HAL+JSON HTTP API: repository schema lookup,
//! document search and retrieval, property updates, blob upload and
//! download, and identity-provider user listing.
//!
//! The client caches the repository schema ("mappings") once at
//! construction and resolves human display names to property and
//! category keys against it for the lifetime of the instance.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use client::DmsClient;
pub use client::builder::DmsClientBuilder;
pub use client::cache::{CacheConfig, CachePolicy, ResponseCache};
pub use client::documents::DocumentQuery;
pub use client::properties::PropertyMap;
pub use error::{DmsError, Result};
pub use models::{
    Category, DmsDocument, DmsUser, DocumentLinks, Mappings, Property, PropertyType,
    PropertyValues, SearchProperty, SourceProperty, UploadProperty,
};
