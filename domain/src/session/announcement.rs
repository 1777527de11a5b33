//! Texts of the synthetic agent messages and transcript error notices

/// Guidance appended to every model failure recorded in the transcript
pub const CONFIGURATION_GUIDANCE: &str = "Ensure your environment is properly configured.";

/// Builders for messages authored by the session itself rather than the model
pub struct Announcement;

impl Announcement {
    /// Announces a successful ingestion
    pub fn document_ingested(document_name: &str, characters: usize) -> String {
        format!(
            "Document analysis initialized for \"{}\". I've ingested {} characters of context. You may begin your inquiry.",
            document_name, characters
        )
    }

    /// Announces a new thread over the already loaded document
    pub fn session_refreshed(document_name: &str) -> String {
        format!(
            "Refreshed analysis session for \"{}\". Past context is retained.",
            document_name
        )
    }

    /// Transcript text for a failed model call
    pub fn model_failure(error: &dyn std::fmt::Display) -> String {
        format!("Error: {}. {}", error, CONFIGURATION_GUIDANCE)
    }
}
