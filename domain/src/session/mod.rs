//! Chat session domain.
//!
//! - [`entities::Session`]: the transcript, document context and document name
//! - [`entities::Message`]: a single immutable transcript entry
//! - [`turn::Turn`]: the role-tagged history entry sent to the model
//! - [`announcement::Announcement`]: texts of synthetic agent messages

pub mod announcement;
pub mod entities;
pub mod turn;
