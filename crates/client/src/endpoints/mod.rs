//! REST API endpoint implementations.
//!
//! Free async functions that take the HTTP client, the relevant URLs
//! and the API key explicitly, so they can be exercised directly in
//! integration tests against a mock server.

mod documents;
mod mappings;
mod pagination;
mod repositories;
mod request;
mod url_encoding;
mod users;

pub use documents::{
    create_document, create_document_version, download_blob, fetch_documents, update_document,
    upload_blob,
};
pub use mappings::get_mappings;
pub use repositories::first_repository_id;
pub use request::{document_id_from_location, get_json};
pub use url_encoding::encode_path_segment;
pub use users::list_users;
