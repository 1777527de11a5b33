//! Document domain.
//!
//! - [`entities::DocumentUpload`]: a binary document handed to ingestion
//! - [`entities::ExtractedDocument`]: per-page text fragments and the
//!   page-labelled context built from them

pub mod entities;
