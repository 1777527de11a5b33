//! Wire types for the Gemini `generateContent` API
//!
//! Converts domain turns into the request body and the response body back
//! into answer text.

use paperchat_domain::{EMPTY_RESPONSE_FALLBACK, PromptTemplate, Turn, TurnRole};
use serde::{Deserialize, Serialize};

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Full history in order, then the new question as a `user` turn.
    pub fn new(question: &str, context: &str, history: &[Turn], temperature: f32) -> Self {
        let question = Turn::user(question);
        let contents = history
            .iter()
            .chain(std::iter::once(&question))
            .map(Content::turn)
            .collect();

        Self {
            contents,
            system_instruction: Content::instruction(PromptTemplate::document_assistant(context)),
            generation_config: GenerationConfig { temperature },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<TurnRole>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn turn(turn: &Turn) -> Self {
        Self {
            role: Some(turn.role()),
            parts: vec![Part::text(turn.text())],
        }
    }

    fn instruction(text: String) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: Some(text) }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated.
    ///
    /// Falls back to [`EMPTY_RESPONSE_FALLBACK`] when that is empty.
    pub fn into_text(self) -> String {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            EMPTY_RESPONSE_FALLBACK.to_string()
        } else {
            text
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Message of a non-2xx response: the service's `error.message`, or the
/// raw body when it carries none.
pub fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}
