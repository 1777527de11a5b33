//! `lopdf`-backed document text extractor

use async_trait::async_trait;
use lopdf::Document;
use paperchat_application::ports::document_extractor::{DocumentTextExtractor, ExtractionError};
use paperchat_domain::{ExtractedDocument, ExtractedPage};
use tracing::{debug, warn};

/// Extracts per-page text from PDF bytes.
///
/// Parsing is CPU bound and runs on the blocking thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfTextExtractor;

impl LopdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(payload: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        let document = Document::load_mem(payload).map_err(|e| {
            let detail = e.to_string();
            debug!("PDF load failed: {}", detail);
            let lowered = detail.to_lowercase();
            if lowered.contains("encrypt") || lowered.contains("password") {
                ExtractionError::Protected
            } else {
                ExtractionError::Corrupted(detail)
            }
        })?;

        // Loading already decrypts with the empty user password; only a
        // document still lacking an encryption state needs a real password.
        if document.is_encrypted() && document.encryption_state.is_none() {
            debug!("PDF requires a password");
            return Err(ExtractionError::Protected);
        }

        // BTreeMap keyed by page number, so iteration is in page order
        let pages = document.get_pages();
        if pages.is_empty() {
            return Err(ExtractionError::NoPages);
        }

        let extracted = pages
            .keys()
            .map(|&number| ExtractedPage::new(Self::page_fragments(&document, number)))
            .collect::<Vec<_>>();

        debug!("Extracted {} pages", extracted.len());
        Ok(ExtractedDocument::new(extracted))
    }

    /// Non-blank lines of one page. An undecodable page yields no fragments.
    fn page_fragments(document: &Document, number: u32) -> Vec<String> {
        match document.extract_text(&[number]) {
            Ok(text) => text
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                warn!("Could not extract text from page {}: {}", number, e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl DocumentTextExtractor for LopdfTextExtractor {
    async fn extract(&self, payload: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        let payload = payload.to_vec();
        tokio::task::spawn_blocking(move || Self::extract_blocking(&payload))
            .await
            .map_err(|e| ExtractionError::Internal(e.to_string()))?
    }
}
