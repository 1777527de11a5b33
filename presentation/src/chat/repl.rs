//! REPL (Read-Eval-Print Loop) for interactive document chat

use super::command::ReplCommand;
use super::upload::read_upload;
use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use crate::output::console::HINT_AWAITING;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use paperchat_application::{
    DocumentSessionUseCase, IngestOutcome, NoProgress, SendOutcome, SessionProgressNotifier,
    SkipReason,
};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// Whether the loop keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: Arc<DocumentSessionUseCase>,
    model_name: String,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: Arc<DocumentSessionUseCase>, model_name: impl Into<String>) -> Self {
        Self {
            use_case,
            model_name: model_name.into(),
            show_progress: true,
            history_file: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Persist line history to this file
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Apply REPL settings from configuration
    pub fn with_config(self, config: ReplConfig) -> Self {
        self.with_progress(config.show_progress)
            .with_history_file(config.history_file)
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = self.build_editor();
        self.print_welcome();

        loop {
            let prompt = self.prompt();
            match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let Some(command) = ReplCommand::parse(&line) else {
                        continue;
                    };
                    if self.execute(command).await == Flow::Exit {
                        break;
                    }
                }
                Ok(Signal::CtrlC) => {
                    println!("^C");
                }
                Ok(Signal::CtrlD) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    /// Load a document into the session, printing the outcome.
    ///
    /// Returns `true` when the document became the active one.
    pub async fn load_document(&self, path: &Path) -> bool {
        let upload = match read_upload(path).await {
            Ok(upload) => upload,
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::format_error_notice(&e.to_string()));
                return false;
            }
        };

        let progress = self.progress();
        match self
            .use_case
            .ingest_with_progress(&upload, progress.as_ref())
            .await
        {
            Ok(IngestOutcome::Ingested(_)) => {
                self.print_latest_message();
                true
            }
            Ok(IngestOutcome::Ignored) => {
                println!("{}", "Still working on the previous request.".yellow());
                false
            }
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::format_error_notice(&e.to_string()));
                false
            }
        }
    }

    /// Execute one parsed command
    pub async fn execute(&self, command: ReplCommand) -> Flow {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return Flow::Exit;
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::Load(path) => {
                self.load_document(&path).await;
            }
            ReplCommand::New => match self.use_case.reset() {
                Some(announcement) => {
                    println!();
                    println!("{}", ConsoleFormatter::format_message(&announcement));
                }
                None => println!("{}", HINT_AWAITING.dimmed()),
            },
            ReplCommand::Context => {
                if self.use_case.toggle_context_view() {
                    println!("{}", ConsoleFormatter::format_context(&self.use_case.snapshot()));
                } else {
                    println!("{}", "Context view closed.".dimmed());
                }
            }
            ReplCommand::Status => {
                println!(
                    "{}",
                    ConsoleFormatter::format_status(&self.use_case.snapshot(), &self.model_name)
                );
            }
            ReplCommand::MissingArgument(usage) => println!("Usage: {}", usage),
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
            ReplCommand::Ask(text) => self.ask(&text).await,
        }
        Flow::Continue
    }

    async fn ask(&self, question: &str) {
        let progress = self.progress();
        match self
            .use_case
            .send_with_progress(question, progress.as_ref())
            .await
        {
            SendOutcome::Answered(message) | SendOutcome::Failed(message) => {
                println!();
                println!("{}", ConsoleFormatter::format_message(&message));
            }
            SendOutcome::Ignored(SkipReason::NoContext) => {
                println!("{}", HINT_AWAITING.dimmed());
            }
            SendOutcome::Ignored(SkipReason::Busy) => {
                println!("{}", "Still working on the previous request.".yellow());
            }
            SendOutcome::Ignored(SkipReason::EmptyInput) => {}
        }
    }

    fn progress(&self) -> Box<dyn SessionProgressNotifier> {
        if self.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoProgress)
        }
    }

    fn print_latest_message(&self) {
        let session = self.use_case.snapshot();
        if let Some(message) = session.messages().last() {
            println!();
            println!("{}", ConsoleFormatter::format_message(message));
        }
    }

    fn build_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_file else {
            return editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    fn prompt(&self) -> DefaultPrompt {
        let session = self.use_case.snapshot();
        let left = session.document_name().unwrap_or("paperchat").to_string();
        DefaultPrompt::new(
            DefaultPromptSegment::Basic(left),
            DefaultPromptSegment::Empty,
        )
    }

    fn print_welcome(&self) {
        let session = self.use_case.snapshot();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        paperchat - Document Research        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("{}", ConsoleFormatter::format_status_line(&session));
        println!("Model: {}", self.model_name);
        println!();
        println!("{}", ConsoleFormatter::format_transcript(&session));
        println!("Type /help for available commands");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /load <path>      - Load a PDF (replaces the current document)");
        println!("  /new              - Start a new thread over the same document");
        println!("  /context          - Show or hide the extracted context");
        println!("  /status           - Show the active document and transcript size");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
        println!("Anything else is sent as a question about the document.");
        println!();
    }
}
