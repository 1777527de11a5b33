//! Console output formatter for document chat sessions

use colored::Colorize;
use paperchat_domain::{Message, Sender, Session};

pub const STATUS_ACTIVE: &str = "Source Analysis Active";
pub const STATUS_WAITING: &str = "Waiting for Source Document...";
pub const HINT_READY: &str =
    "Knowledge store ready. You can query specific details or ask for summaries.";
pub const HINT_AWAITING: &str =
    "Awaiting PDF ingestion. Use /load <path> to upload a research paper or report.";
pub const NO_CONTEXT: &str = "No context data available.";

/// Formats session state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Speaker label shown above a message
    pub fn speaker_label(sender: Sender) -> &'static str {
        match sender {
            Sender::Human => "Investigator",
            Sender::Agent => "Research Agent",
        }
    }

    /// Format a single transcript message with speaker and local `HH:MM` time
    pub fn format_message(message: &Message) -> String {
        let time = message
            .created_at()
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string();
        let label = Self::speaker_label(message.sender());
        let header = format!("{} · {}", label, time);
        let header = match message.sender() {
            Sender::Human => header.cyan().bold(),
            Sender::Agent => header.green().bold(),
        };

        format!("{}\n{}\n", header, Self::indent(message.text(), "  "))
    }

    /// Format the whole transcript, or the empty-state hint when there is none
    pub fn format_transcript(session: &Session) -> String {
        if session.messages().is_empty() {
            return format!("{}\n", Self::empty_hint(session).dimmed());
        }
        session
            .messages()
            .iter()
            .map(Self::format_message)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Hint shown while the transcript is empty
    pub fn empty_hint(session: &Session) -> &'static str {
        if session.has_context() {
            HINT_READY
        } else {
            HINT_AWAITING
        }
    }

    /// One-line header reflecting whether a document is loaded
    pub fn format_status_line(session: &Session) -> String {
        if session.has_context() {
            format!("{} {}", "●".green(), STATUS_ACTIVE.bold())
        } else {
            format!("{} {}", "○".dimmed(), STATUS_WAITING.bold())
        }
    }

    /// Detailed status for the `/status` command
    pub fn format_status(session: &Session, model: &str) -> String {
        let mut output = String::new();
        output.push_str(&Self::format_status_line(session));
        output.push('\n');
        output.push_str(&format!(
            "  {} {}\n",
            "Document:".cyan().bold(),
            session.document_name().unwrap_or("(none)")
        ));
        output.push_str(&format!(
            "  {} {} characters\n",
            "Context: ".cyan().bold(),
            session.context_chars()
        ));
        output.push_str(&format!(
            "  {} {}\n",
            "Messages:".cyan().bold(),
            session.messages().len()
        ));
        output.push_str(&format!("  {} {}\n", "Model:   ".cyan().bold(), model));
        output
    }

    /// The extracted context with the document name as header
    pub fn format_context(session: &Session) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Source Context Explorer"));
        if let Some(name) = session.document_name() {
            output.push_str(&format!("{}\n", name.cyan().bold()));
        }
        output.push('\n');
        if session.has_context() {
            output.push_str(session.context());
        } else {
            output.push_str(NO_CONTEXT);
        }
        output.push('\n');
        output.push_str(&Self::footer());
        output
    }

    /// Blocking notice for a failed ingestion
    pub fn format_error_notice(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{}\n{}\n", line.cyan(), title.cyan().bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent every line of `text` with `prefix`
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
