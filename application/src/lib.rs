//! Application layer for paperchat
//!
//! This crate contains the session use case and the port definitions that
//! infrastructure adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    document_extractor::{DocumentTextExtractor, ExtractionError},
    model_client::{ConversationalModelClient, ModelError},
    progress::{NoProgress, SessionProgressNotifier},
};
pub use use_cases::document_session::{
    Activity, DocumentSessionUseCase, IngestOutcome, IngestReport, SendOutcome, SkipReason,
};
