//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording session events
//! (ingestions, questions, answers, model failures, resets) to a
//! structured, write-only transcript log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! transcript in a machine-readable format (JSONL).

use paperchat_domain::Message;
use serde::Serialize;

/// A transcript event. Serializes with a snake_case `type` tag; message
/// events carry the full [`Message`] fields inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    DocumentIngested {
        document: String,
        characters: usize,
        pages: usize,
    },
    UserMessage {
        #[serde(flatten)]
        message: Message,
    },
    AgentMessage {
        #[serde(flatten)]
        message: Message,
        model: String,
    },
    AgentError {
        #[serde(flatten)]
        message: Message,
        error: String,
    },
    SessionReset {
        document: Option<String>,
    },
}

impl ConversationEvent {
    pub fn document_ingested(document_name: &str, characters: usize, pages: usize) -> Self {
        Self::DocumentIngested {
            document: document_name.to_string(),
            characters,
            pages,
        }
    }

    pub fn user_message(message: &Message) -> Self {
        Self::UserMessage {
            message: message.clone(),
        }
    }

    pub fn agent_message(message: &Message, model: &str) -> Self {
        Self::AgentMessage {
            message: message.clone(),
            model: model.to_string(),
        }
    }

    pub fn agent_error(message: &Message, error: &str) -> Self {
        Self::AgentError {
            message: message.clone(),
            error: error.to_string(),
        }
    }

    pub fn session_reset(document_name: Option<&str>) -> Self {
        Self::SessionReset {
            document: document_name.map(str::to_string),
        }
    }

    /// The `type` tag written for this event
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DocumentIngested { .. } => "document_ingested",
            Self::UserMessage { .. } => "user_message",
            Self::AgentMessage { .. } => "agent_message",
            Self::AgentError { .. } => "agent_error",
            Self::SessionReset { .. } => "session_reset",
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures
/// never disturb the session.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_serializes_message_fields() {
        let message = Message::human("What is on page 2?");
        let value = serde_json::to_value(ConversationEvent::user_message(&message)).unwrap();

        assert_eq!(value["type"], "user_message");
        assert_eq!(value["sender"], "human");
        assert_eq!(value["text"], "What is on page 2?");
        assert_eq!(value["id"], serde_json::to_value(message.id()).unwrap());
        assert!(value["created_at"].is_string());
    }

    #[test]
    fn test_agent_error_carries_error_text() {
        let message = Message::agent("Error: boom. Ensure your environment is properly configured.");
        let event = ConversationEvent::agent_error(&message, "boom");
        assert_eq!(event.kind(), "agent_error");

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "agent_error");
        assert_eq!(value["sender"], "agent");
        assert_eq!(value["error"], "boom");
    }

    #[test]
    fn test_kind_matches_serialized_tag() {
        let message = Message::agent("ok");
        let events = [
            ConversationEvent::document_ingested("a.pdf", 28, 2),
            ConversationEvent::user_message(&message),
            ConversationEvent::agent_message(&message, "m"),
            ConversationEvent::agent_error(&message, "e"),
            ConversationEvent::session_reset(None),
        ];
        for event in &events {
            let value = serde_json::to_value(event).unwrap();
            assert_eq!(value["type"], event.kind());
        }
    }

    #[test]
    fn test_session_reset_without_document() {
        let value = serde_json::to_value(ConversationEvent::session_reset(None)).unwrap();
        assert_eq!(value, json!({ "type": "session_reset", "document": null }));
    }
}
