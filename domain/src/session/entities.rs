//! Session domain entities

use super::announcement::Announcement;
use super::turn::{Turn, derive_history};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The person asking questions
    Human,
    /// The research assistant (model answers and synthetic announcements)
    Agent,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Human => "human",
            Sender::Agent => "agent",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message identifier
///
/// Drawn from a process-wide counter: unique for the lifetime of the process
/// and ordered by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(u64);

impl MessageId {
    fn next() -> Self {
        Self(NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

/// A message in the transcript (Entity)
///
/// Immutable once created: there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender: Sender,
    text: String,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn human(text: impl Into<String>) -> Self {
        Self::new(Sender::Human, text.into())
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Sender::Agent, text.into())
    }

    fn new(sender: Sender, text: String) -> Self {
        Self {
            id: MessageId::next(),
            sender,
            text,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A document chat session (Entity)
///
/// Holds the transcript, the extracted context of the active document and
/// its name. An empty context means no document is loaded. Context and
/// document name only ever change together, through [`Session::load_document`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    messages: Vec<Message>,
    context: String,
    document_name: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn document_name(&self) -> Option<&str> {
        self.document_name.as_deref()
    }

    /// Whether a non-empty document context is loaded (sending is only allowed then)
    pub fn has_context(&self) -> bool {
        !self.context.is_empty()
    }

    /// Number of characters in the context (Unicode scalar values)
    pub fn context_chars(&self) -> usize {
        self.context.chars().count()
    }

    /// Append a message to the end of the transcript
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Install a newly extracted document.
    ///
    /// Replaces the context and document name, and replaces the transcript
    /// with a single agent message announcing the ingestion.
    pub fn load_document(&mut self, name: impl Into<String>, context: impl Into<String>) -> &Message {
        let name = name.into();
        self.context = context.into();
        let announcement = Announcement::document_ingested(&name, self.context_chars());
        self.document_name = Some(name);
        self.messages = vec![Message::agent(announcement)];
        &self.messages[0]
    }

    /// Start a new thread over the same document.
    ///
    /// With a document loaded the transcript becomes a single refresh
    /// announcement; otherwise it is emptied. Context and document name are
    /// left untouched either way.
    pub fn reset(&mut self) -> Option<&Message> {
        match &self.document_name {
            Some(name) => {
                self.messages = vec![Message::agent(Announcement::session_refreshed(name))];
                self.messages.first()
            }
            None => {
                self.messages.clear();
                None
            }
        }
    }

    /// Conversation history for the model, derived from the whole transcript
    pub fn history(&self) -> Vec<Turn> {
        derive_history(&self.messages)
    }
}
