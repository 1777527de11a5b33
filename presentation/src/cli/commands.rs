//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for paperchat
#[derive(Parser, Debug)]
#[command(name = "paperchat")]
#[command(author, version, about = "Ask questions about a PDF document")]
#[command(long_about = r#"
paperchat extracts the text of a PDF and answers questions about it with a
hosted language model, strictly from the document's content.

Without --question an interactive chat starts. Inside the chat:
  /load <path>   Load a PDF (replaces the current document and transcript)
  /new           Start a new thread over the same document
  /context       Show the extracted text
  /status        Show the active document and transcript size
  /quit          Exit

Configuration files are loaded from (in priority order):
1. --config <path>                      Explicit config file
2. ./paperchat.toml                     Project-level config
3. ~/.config/paperchat/config.toml      Global config

The API key is read from the API_KEY environment variable
(see gemini.api_key_env).

Example:
  paperchat paper.pdf
  paperchat paper.pdf -q "What is the main contribution?"
"#)]
pub struct Cli {
    /// PDF document to load on startup
    pub document: Option<PathBuf>,

    /// Ask a single question about DOCUMENT and exit
    #[arg(short, long, value_name = "QUESTION", requires = "document")]
    pub question: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// One-shot mode: a document and a question were both given
    pub fn one_shot(&self) -> Option<(&PathBuf, &str)> {
        match (&self.document, &self.question) {
            (Some(document), Some(question)) => Some((document, question.as_str())),
            _ => None,
        }
    }
}
