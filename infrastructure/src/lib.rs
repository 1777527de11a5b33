//! Infrastructure layer for paperchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod logging;
pub mod pdf;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGeminiConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig,
};
pub use logging::JsonlConversationLogger;
pub use pdf::LopdfTextExtractor;
pub use providers::{GeminiModelClient, GeminiSettings};
