//! Domain layer for paperchat
//!
//! This crate contains the core entities and pure logic of a document
//! question-answering session. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! - **Session**: the ordered transcript, the extracted document context and
//!   the active document name
//! - **Context**: the page-labelled plain text of the loaded document, used
//!   verbatim in every model prompt
//! - **Turn**: a role-tagged projection of a [`Message`] sent to the model as
//!   conversation history

pub mod config;
pub mod core;
pub mod document;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::validation::{ConfigIssue, ConfigIssueCode};
pub use core::{error::DomainError, question::Question};
pub use document::entities::{DocumentUpload, ExtractedDocument, ExtractedPage};
pub use prompt::{EMPTY_RESPONSE_FALLBACK, PromptTemplate};
pub use session::{
    announcement::{Announcement, CONFIGURATION_GUIDANCE},
    entities::{Message, MessageId, Sender, Session},
    turn::{Turn, TurnRole, derive_history},
};
