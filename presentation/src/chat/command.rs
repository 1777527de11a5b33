//! Parsing of REPL input lines

use std::path::PathBuf;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `/load <path>`
    Load(PathBuf),
    /// `/new`
    New,
    /// `/context`
    Context,
    /// `/status`
    Status,
    /// `/help`, `/h`, `/?`
    Help,
    /// `/quit`, `/exit`, `/q`
    Quit,
    /// `/load` without a path
    MissingArgument(&'static str),
    /// Any other slash command
    Unknown(String),
    /// Free text, sent as a question
    Ask(String),
}

impl ReplCommand {
    /// Parse a line; blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if !line.starts_with('/') {
            return Some(ReplCommand::Ask(line.to_string()));
        }

        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        let command = match cmd {
            "/load" | "/open" if arg.is_empty() => ReplCommand::MissingArgument("/load <path>"),
            "/load" | "/open" => ReplCommand::Load(PathBuf::from(unquote(arg))),
            "/new" | "/reset" => ReplCommand::New,
            "/context" | "/ctx" => ReplCommand::Context,
            "/status" => ReplCommand::Status,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(cmd.to_string()),
        };
        Some(command)
    }
}

/// Strip one pair of matching surrounding quotes (paths dragged into a terminal)
fn unquote(arg: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = arg
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    arg
}
