//! JSONL transcript writer.
//!
//! Every [`ConversationEvent`] becomes one JSON object per line: the event's
//! `type` tag and fields plus a `timestamp`.

use chrono::{SecondsFormat, Utc};
use paperchat_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde::Serialize;
use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// One line of the transcript file
#[derive(Serialize)]
struct TranscriptLine<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a ConversationEvent,
}

/// Writes the session transcript as JSON lines.
///
/// Each line is flushed as soon as it is complete. Write failures are
/// reported once through `tracing` and otherwise ignored.
pub struct JsonlConversationLogger {
    file: Mutex<LineWriter<File>>,
    path: PathBuf,
    write_failed: AtomicBool,
}

impl JsonlConversationLogger {
    /// Create (or truncate) the transcript at `path`, creating parent
    /// directories. Returns `None` when the file cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let opened = path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|()| File::create(&path));

        match opened {
            Ok(file) => Some(Self {
                file: Mutex::new(LineWriter::new(file)),
                path,
                write_failed: AtomicBool::new(false),
            }),
            Err(e) => {
                warn!("Transcript disabled, cannot create {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Create a transcript for a new session inside `dir`, named after the
    /// session start time, e.g. `session-20260101-120000.jsonl`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let name = format!(
            "session-{}.jsonl",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        Self::new(dir.as_ref().join(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, line: &TranscriptLine<'_>) -> io::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        serde_json::to_writer(&mut *file, line)?;
        file.write_all(b"\n")
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let line = TranscriptLine {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event: &event,
        };

        if let Err(e) = self.write_line(&line)
            && !self.write_failed.swap(true, Ordering::Relaxed)
        {
            warn!(
                "Could not write transcript {} ({} dropped): {}",
                self.path.display(),
                event.kind(),
                e
            );
        }
    }
}
