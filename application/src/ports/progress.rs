//! Progress notification port
//!
//! Reports the in-flight phases of a session so the presentation can show
//! activity and hold back conflicting input.

/// Callbacks bracketing the suspended part of ingest and send
pub trait SessionProgressNotifier: Send + Sync {
    /// Called when document extraction starts
    fn on_ingest_start(&self, _document_name: &str) {}

    /// Called when document extraction finishes, successfully or not
    fn on_ingest_end(&self, _success: bool) {}

    /// Called when a question has been handed to the model
    fn on_thinking_start(&self) {}

    /// Called when the model call returns, successfully or not
    fn on_thinking_end(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl SessionProgressNotifier for NoProgress {}
