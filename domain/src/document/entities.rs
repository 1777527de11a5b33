//! Document domain entities

use crate::core::error::DomainError;

/// The only accepted document extension
pub const PDF_EXTENSION: &str = "pdf";

/// A binary document selected for ingestion (Value Object)
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    name: String,
    bytes: Vec<u8>,
}

impl DocumentUpload {
    /// Create an upload for a PDF document.
    ///
    /// The name must end in `.pdf` (case-insensitive).
    pub fn pdf(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, DomainError> {
        let name = name.into();
        Self::check_name(&name)?;
        Ok(Self { name, bytes })
    }

    /// Check a document name without a payload, e.g. before reading a file.
    pub fn check_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyDocumentName);
        }
        let is_pdf = name
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(PDF_EXTENSION));
        if !is_pdf {
            return Err(DomainError::UnsupportedDocumentType(name.to_string()));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Text fragments of a single page, in reading order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    fragments: Vec<String>,
}

impl ExtractedPage {
    pub fn new(fragments: Vec<String>) -> Self {
        Self { fragments }
    }

    /// Flattened page text: trimmed fragments joined by single spaces.
    ///
    /// Unlike a raw `join(" ")` of the fragments, surrounding whitespace of
    /// each fragment is dropped and blank fragments are skipped, so a page
    /// never gains doubled or leading separators.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of extracting a document, one entry per page (Entity)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pages: Vec<ExtractedPage>,
}

impl ExtractedDocument {
    pub fn new(pages: Vec<ExtractedPage>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[ExtractedPage] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Label for the page at the 1-based `number`
    pub fn page_label(number: usize) -> String {
        format!("Page {}:", number)
    }

    /// Compose the context string used in prompts.
    ///
    /// Every page contributes `"Page N:\n<text>\n\n"` in order; the
    /// concatenation is trimmed of leading and trailing whitespace.
    pub fn to_context(&self) -> String {
        let mut full = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            full.push_str(&Self::page_label(index + 1));
            full.push('\n');
            full.push_str(&page.text());
            full.push_str("\n\n");
        }
        full.trim().to_string()
    }
}
