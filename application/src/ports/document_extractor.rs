//! Document text extraction port
//!
//! Defines the interface for turning a binary document into per-page text.

use async_trait::async_trait;
use paperchat_domain::ExtractedDocument;
use thiserror::Error;

/// Message shown to the user when a document cannot be decoded
pub const UNREADABLE_DOCUMENT: &str =
    "Could not read the PDF file. It might be corrupted or protected.";

/// Errors that can occur while extracting a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The payload could not be parsed as a document
    #[error("{}", UNREADABLE_DOCUMENT)]
    Corrupted(String),

    /// The document is encrypted or otherwise access-protected
    #[error("{}", UNREADABLE_DOCUMENT)]
    Protected,

    /// The document parsed but has no pages
    #[error("Could not read the PDF file. It does not contain any pages.")]
    NoPages,

    /// The extraction itself could not run (worker failure)
    #[error("Failed to process the document: {0}")]
    Internal(String),
}

impl ExtractionError {
    /// Underlying cause for diagnostics, when there is one beyond the user-facing message
    pub fn detail(&self) -> Option<&str> {
        match self {
            ExtractionError::Corrupted(detail) | ExtractionError::Internal(detail) => {
                Some(detail)
            }
            ExtractionError::Protected => Some("document is encrypted"),
            ExtractionError::NoPages => None,
        }
    }
}

/// Extracts page-delimited text from a binary document.
///
/// Extraction has no effect on application state. Implementations live in
/// the infrastructure layer.
#[async_trait]
pub trait DocumentTextExtractor: Send + Sync {
    /// Decode `payload` into its pages, in order
    async fn extract(&self, payload: &[u8]) -> Result<ExtractedDocument, ExtractionError>;
}
