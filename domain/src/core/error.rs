//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unsupported document type: {0} (only .pdf files are accepted)")]
    UnsupportedDocumentType(String),

    #[error("Document name cannot be empty")]
    EmptyDocumentName,
}
