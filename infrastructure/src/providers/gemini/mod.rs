//! Google Gemini provider
//!
//! Answers document questions through the `generateContent` REST endpoint,
//! authenticated with an API key header.

mod adapter;
mod types;

pub use adapter::{GeminiModelClient, GeminiSettings};

/// Model used when the config does not name one
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
/// Low sampling temperature keeps answers close to the document
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";
