//! PDF text extraction
//!
//! This module implements the [`DocumentTextExtractor`] port with `lopdf`.
//!
//! # Components
//!
//! - [`LopdfTextExtractor`] - Decodes an in-memory PDF into per-page text fragments
//!
//! [`DocumentTextExtractor`]: paperchat_application::DocumentTextExtractor

mod extractor;

pub use extractor::LopdfTextExtractor;
