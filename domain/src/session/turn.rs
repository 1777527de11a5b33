//! Conversation turns sent to the model as history

use super::entities::{Message, Sender};
use serde::{Deserialize, Serialize};

/// Role of a turn as understood by the generation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

impl From<Sender> for TurnRole {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::Human => TurnRole::User,
            Sender::Agent => TurnRole::Model,
        }
    }
}

/// One role-tagged utterance of the conversation history (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: TurnRole,
    text: String,
}

impl Turn {
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// A question from the user, not yet part of the transcript
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnRole::User, text)
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<&Message> for Turn {
    fn from(message: &Message) -> Self {
        Self::new(message.sender().into(), message.text())
    }
}

/// Project a transcript onto model history, preserving order.
///
/// Synthetic announcements are agent messages and map to `model` like any
/// other agent message.
pub fn derive_history(messages: &[Message]) -> Vec<Turn> {
    messages.iter().map(Turn::from).collect()
}
