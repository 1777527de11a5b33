//! Reading a document file from disk into an upload

use paperchat_domain::{DocumentUpload, DomainError};
use std::path::Path;
use thiserror::Error;

/// Errors raised before a document reaches the session
#[derive(Error, Debug)]
pub enum UploadError {
    /// Not a `.pdf` file
    #[error(transparent)]
    Rejected(#[from] DomainError),

    #[error("Could not open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read `path` as a PDF upload named after its file name.
///
/// The extension is checked before the file is read.
pub async fn read_upload(path: &Path) -> Result<DocumentUpload, UploadError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    DocumentUpload::check_name(&name)?;

    let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(DocumentUpload::pdf(name, bytes)?)
}
