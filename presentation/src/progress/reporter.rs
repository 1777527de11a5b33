//! Progress reporting while a document is read or a question is answered

use indicatif::{ProgressBar, ProgressStyle};
use paperchat_application::SessionProgressNotifier;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Spinner shown for the duration of an ingest or send
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, prefix: &str, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix.to_string());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));

        let previous = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(pb);
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn finish(&self) {
        let spinner = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
    }

    fn is_active(&self) -> bool {
        self.spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProgressNotifier for ProgressReporter {
    fn on_ingest_start(&self, document_name: &str) {
        self.start("Analyzing...", document_name.to_string());
    }

    fn on_ingest_end(&self, _success: bool) {
        self.finish();
    }

    fn on_thinking_start(&self) {
        self.start("Synthesis Phase", "Research Agent is reading the source".to_string());
    }

    fn on_thinking_end(&self, _success: bool) {
        self.finish();
    }
}
