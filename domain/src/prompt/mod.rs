//! Prompt domain
//!
//! The instruction preamble that constrains the model to the document context.

mod template;

pub use template::{EMPTY_RESPONSE_FALLBACK, PromptTemplate};
