//! Error types for the DMS client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, DmsError>;

/// Errors that can occur during DMS client operations.
///
/// Transport failures, malformed bodies, non-success status codes and
/// missing resources are kept as distinct variants so callers can react
/// to each; nothing is retried automatically.
#[derive(Error, Debug)]
pub enum DmsError {
    /// Network-level HTTP failure (DNS, connect, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code returned by the server.
    #[error("API error ({status}) at {url}: {message}")]
    Api {
        status: u16,
        url: String,
        message: String,
    },

    /// Response body could not be parsed as the expected format.
    ///
    /// Carries the raw body text for diagnosis.
    #[error("Invalid response: {context}")]
    InvalidResponse { context: String, body: String },

    /// A required field or link relation was absent from an otherwise
    /// well-formed response.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The requested resource does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A URL could not be constructed or parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A response is missing a header the workflow depends on.
    #[error("Missing '{header}' header in response from {url}")]
    MissingHeader { header: &'static str, url: String },

    /// Local file I/O failure (blob upload source, download target).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The client builder was given incomplete or invalid settings.
    #[error("Client configuration error: {0}")]
    Configuration(String),
}

impl DmsError {
    /// Check whether this error means the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Api { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        let err = DmsError::NotFound("doc".to_string());
        assert!(err.is_not_found());

        let err = DmsError::Api {
            status: 404,
            url: "https://dms.example.com/dms/r/repo1/o2m/missing".to_string(),
            message: "not found".to_string(),
        };
        assert!(err.is_not_found());

        let err = DmsError::Api {
            status: 500,
            url: "https://dms.example.com".to_string(),
            message: "boom".to_string(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_response_keeps_body() {
        let err = DmsError::InvalidResponse {
            context: "invalid JSON".to_string(),
            body: "<html>gateway error</html>".to_string(),
        };
        match err {
            DmsError::InvalidResponse { body, .. } => {
                assert!(body.contains("gateway error"));
            }
            _ => unreachable!(),
        }
    }
}
