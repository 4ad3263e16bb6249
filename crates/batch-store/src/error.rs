//! Store error types.
//!
//! Errors carry the file they relate to and offer user-facing messages and
//! remediation hints for whatever front-end reports them.

use std::path::PathBuf;

use thiserror::Error;

use crate::xml::XmlError;

/// Document store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file to load does not exist.
    #[error("Batch file not found: {path}")]
    NotFound { path: PathBuf },

    /// The file content is not a well-formed batch document.
    #[error("Failed to parse batch file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: XmlError,
    },

    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be rendered as XML.
    #[error("Failed to serialize batch document: {message}")]
    Serialization { message: String },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The root element does not match the configured schema.
    #[error("Unexpected root element <{found}> in {path} (expected <{expected}>)")]
    UnexpectedRoot {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { path } => {
                format!("The batch file {} does not exist.", path.display())
            }
            Self::Parse { path, source } => {
                format!(
                    "The file at {} could not be read as a batch file: {}",
                    path.display(),
                    source
                )
            }
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Serialization { .. } => {
                "An error occurred while preparing the batch file for saving.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::UnexpectedRoot {
                path,
                expected,
                found,
            } => {
                format!(
                    "The file at {} has a <{}> root element, but batch files start with <{}>.",
                    path.display(),
                    found,
                    expected
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NotFound { .. } => {
                Some("Check the path, or create a new batch file instead.".into())
            }
            Self::Parse { .. } => Some("Fix the XML syntax and open the file again.".into()),
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that you have permission to read the file.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            Self::UnexpectedRoot { .. } => {
                Some("Make sure you selected a batch file, or adjust the schema.".into())
            }
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
