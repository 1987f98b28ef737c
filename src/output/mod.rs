//! Output module for presenting scan results
//!
//! This module handles:
//! - Rendering a human-readable summary of a scan
//! - Serializing the full result as JSON

mod json;
mod summary;

pub use json::{to_json_string, write_json};
pub use summary::{format_summary, print_summary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
