//! Conversational model client port
//!
//! Defines the interface for asking a hosted generation service a question
//! about a document.

use async_trait::async_trait;
use paperchat_domain::Turn;
use thiserror::Error;

/// Errors that can occur during a model call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("API Key is missing. Please ensure environment variables are set.")]
    MissingCredential,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Client for a hosted conversational model.
///
/// Every call is exactly one request/response round trip. Implementations
/// build the instruction preamble from `context`, send `history` followed by
/// `question`, and return the generated text (or the fixed fallback when the
/// service answers with nothing).
#[async_trait]
pub trait ConversationalModelClient: Send + Sync {
    /// Identifier of the model answering (for logs)
    fn model_name(&self) -> &str;

    /// Ask `question` against `context`, carrying the prior `history`
    async fn ask(
        &self,
        question: &str,
        context: &str,
        history: &[Turn],
    ) -> Result<String, ModelError>;
}
