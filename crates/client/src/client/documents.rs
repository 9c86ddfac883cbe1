//! Document operations for [`DmsClient`]: search, retrieval, property
//! updates, the archive workflow and blob download.

use std::path::Path;

use tracing::{debug, warn};

use crate::client::DmsClient;
use crate::client::properties::PropertyMap;
use crate::endpoints;
use crate::error::{DmsError, Result};
use crate::models::document::{DmsDocument, PROP_EDITOR, PROP_STATE};
use crate::models::search::{
    ArchiveDocumentRequest, SearchProperty, SourcePropertiesBody, UpdateDocumentRequest,
    UploadProperty, encode_search_properties,
};

/// State value appended to every archived document.
const RELEASE_STATE: &str = "Release";

/// Parameters for [`DmsClient::get_documents`].
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    /// Property constraints; each key must match one of its values.
    pub search_properties: Option<Vec<SearchProperty>>,
    /// Category keys to restrict the search to.
    pub categories: Option<Vec<String>>,
    /// Stop accumulating results once at least this many documents
    /// have been fetched (search never stops mid-page).
    pub limit: Option<usize>,
    /// Fetch this single document directly, bypassing the search.
    pub doc_id: Option<String>,
}

impl DocumentQuery {
    /// Query for a single document by id.
    pub fn by_id(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: Some(doc_id.into()),
            ..Self::default()
        }
    }
}

impl DmsClient {
    /// Search for documents, or fetch one directly when
    /// [`DocumentQuery::doc_id`] is set.
    ///
    /// Every result is normalized into a [`DmsDocument`]; a server
    /// answering with a single object instead of a list yields a
    /// one-element result.
    pub async fn get_documents(&self, query: &DocumentQuery) -> Result<Vec<DmsDocument>> {
        let mut params: Vec<(String, String)> = vec![("sourceid".to_string(), self.source_id())];

        if let Some(props) = &query.search_properties {
            params.push((
                "sourceproperties".to_string(),
                encode_search_properties(props),
            ));
        }
        if let Some(categories) = &query.categories {
            params.push((
                "sourcecategories".to_string(),
                serde_json::to_string(categories).unwrap_or_else(|_| "[]".to_string()),
            ));
        }

        // A direct id lookup needs no search round-trip.
        let url = match &query.doc_id {
            Some(doc_id) => format!(
                "{}/o2m/{}",
                self.repo_url,
                endpoints::encode_path_segment(doc_id)
            ),
            None => format!("{}/srm", self.repo_url),
        };

        endpoints::fetch_documents(
            &self.http,
            &self.host_base,
            &url,
            &self.api_key,
            &self.user_agent,
            &params,
            query.limit,
        )
        .await
    }

    /// Fetch a single document, mapping a missing document to
    /// [`DmsError::NotFound`].
    async fn get_document_or_not_found(&self, doc_id: &str) -> Result<DmsDocument> {
        let docs = match self.get_documents(&DocumentQuery::by_id(doc_id)).await {
            Ok(docs) => docs,
            Err(DmsError::Api { status: 404, .. }) => Vec::new(),
            Err(e) => return Err(e),
        };
        docs.into_iter()
            .next()
            .ok_or_else(|| DmsError::NotFound(format!("document '{doc_id}' not found")))
    }

    /// Update a document's properties.
    ///
    /// With `state_change` set, the update is issued against the
    /// document's current-version sub-resource; otherwise against the
    /// document itself. Any non-2xx status is an error.
    pub async fn update_properties(
        &self,
        doc_id: &str,
        properties: &PropertyMap,
        message: Option<&str>,
        state_change: bool,
    ) -> Result<()> {
        let encoded_id = endpoints::encode_path_segment(doc_id);
        let url = if state_change {
            format!("{}/o2m/{}/v/current", self.repo_url, encoded_id)
        } else {
            format!("{}/o2m/{}", self.repo_url, encoded_id)
        };

        let body = UpdateDocumentRequest {
            source_id: self.source_id(),
            alteration_text: message.map(str::to_string),
            source_properties: SourcePropertiesBody {
                properties: properties
                    .iter()
                    .map(|(key, values)| UploadProperty {
                        key: key.clone(),
                        values: values.clone(),
                    })
                    .collect(),
            },
        };

        endpoints::update_document(&self.http, &url, &self.api_key, &self.user_agent, &body)
            .await?;
        self.cache
            .invalidate_prefix(&format!("{}/o2m", self.repo_url))
            .await;
        Ok(())
    }

    /// Set a document's state and/or editor, defaulting unset values
    /// to those of the current document.
    ///
    /// This is a plain read-then-write: the server offers no
    /// concurrency token, so a concurrent update by another actor
    /// between the read and the write is silently overwritten.
    pub async fn set_state_editor(
        &self,
        doc_id: &str,
        editor: Option<&str>,
        state: Option<&str>,
        message: Option<&str>,
    ) -> Result<()> {
        let current = self.get_document_or_not_found(doc_id).await?;

        let editor = editor.map(str::to_string).or(current.editor);
        let state = state.map(str::to_string).or(current.state);

        let mut properties = PropertyMap::new();
        if let Some(editor) = editor {
            properties.insert(PROP_EDITOR.to_string(), vec![editor]);
        }
        if let Some(state) = state {
            properties.insert(PROP_STATE.to_string(), vec![state]);
        }

        self.update_properties(doc_id, &properties, message, true)
            .await
    }

    /// Archive a file: upload its content as a blob, then create a new
    /// document (or a new version of `doc_id`) referencing it.
    ///
    /// A `property_state = Release` entry is always appended to the
    /// supplied properties. Returns the new document id parsed from
    /// the response's `Location` header, or the `"unknown"` sentinel
    /// when that header cannot be parsed.
    ///
    /// When the document step fails after a successful upload, the
    /// blob stays behind server-side; no cleanup is attempted.
    pub async fn archive_file(
        &self,
        filepath: impl AsRef<Path>,
        category_key: &str,
        properties: Vec<UploadProperty>,
        doc_id: Option<&str>,
        message: Option<&str>,
    ) -> Result<String> {
        let filepath = filepath.as_ref();
        let filename = filepath
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("no usable file name in '{}'", filepath.display()),
                )
            })?;
        let content = tokio::fs::read(filepath).await?;

        let location = endpoints::upload_blob(
            &self.http,
            &self.repo_url,
            &self.api_key,
            &self.user_agent,
            content,
        )
        .await?;
        debug!(location, filename, "Blob uploaded");

        let mut properties = properties;
        properties.push(UploadProperty {
            key: PROP_STATE.to_string(),
            values: vec![RELEASE_STATE.to_string()],
        });

        let body = ArchiveDocumentRequest {
            source_id: self.source_id(),
            filename,
            source_category: category_key.to_string(),
            source_properties: SourcePropertiesBody { properties },
            content_location_uri: location,
            alteration_text: message.map(str::to_string),
        };

        let new_id = match doc_id {
            Some(doc_id) => {
                let url = format!(
                    "{}/o2m/{}",
                    self.repo_url,
                    endpoints::encode_path_segment(doc_id)
                );
                endpoints::create_document_version(
                    &self.http,
                    &url,
                    &self.api_key,
                    &self.user_agent,
                    &body,
                )
                .await?
            }
            None => {
                endpoints::create_document(
                    &self.http,
                    &self.repo_url,
                    &self.api_key,
                    &self.user_agent,
                    &body,
                )
                .await?
            }
        };

        self.cache
            .invalidate_prefix(&format!("{}/o2m", self.repo_url))
            .await;
        Ok(new_id)
    }

    /// Download a document's main blob to `dest_path`.
    ///
    /// When no `href` is supplied, the document is fetched to resolve
    /// its `mainblobcontent` link; an unknown document fails with
    /// [`DmsError::NotFound`] and the destination is never created or
    /// truncated. The file is written only after the full body has
    /// been received.
    pub async fn download_doc_blob(
        &self,
        doc_id: &str,
        dest_path: impl AsRef<Path>,
        href: Option<&str>,
    ) -> Result<()> {
        let href = match href {
            Some(href) => href.to_string(),
            None => {
                let document = self.get_document_or_not_found(doc_id).await?;
                document.links.mainblobcontent
            }
        };

        let bytes = endpoints::download_blob(
            &self.http,
            &self.host_base,
            &self.api_key,
            &self.user_agent,
            &href,
        )
        .await?;

        if bytes.is_empty() {
            warn!(doc_id, "Downloaded blob is empty");
        }
        tokio::fs::write(dest_path.as_ref(), &bytes).await?;
        Ok(())
    }
}
