//! Conversational model providers

pub mod gemini;

pub use gemini::{GeminiModelClient, GeminiSettings};
