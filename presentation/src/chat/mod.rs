//! Interactive chat module
//!
//! Provides a reedline-based interactive chat over one document session.

mod command;
mod repl;
mod upload;

pub use command::ReplCommand;
pub use repl::{ChatRepl, Flow};
pub use upload::{UploadError, read_upload};
