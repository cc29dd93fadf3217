//! Error types for level data loading.

use thiserror::Error;

/// Errors that can occur when loading level data.
#[derive(Debug, Error)]
pub enum LevelLoadError {
    /// File could not be read.
    #[error("Failed to read level file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// No level files were found at all.
    #[error("No level files found under '{dir}'")]
    NoLevels { dir: String },
}
