//! Output rendering for assembled documents
//!
//! Plain text for reading in a terminal and JSON for handing the document to
//! another renderer.

mod text;

pub use text::{format_forest_text, format_listing_text, format_post_text};

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serializes any assembled document as pretty-printed JSON
pub fn to_json<T: Serialize>(value: &T) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
