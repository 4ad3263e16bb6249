//! XML encoding of batch documents.

mod read;
mod write;

use thiserror::Error;

pub use read::{parse_document, parse_tree};
pub use write::write_document;

/// Reasons a batch file's content is not a usable document.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: String },
    #[error("unknown entity reference &{0};")]
    UnknownEntity(String),
    #[error("document has no root element")]
    MissingRoot,
    #[error("document has more than one root element")]
    MultipleRoots,
    #[error("text found outside the root element")]
    TextOutsideRoot,
    #[error("element <{0}> is never closed")]
    Unclosed(String),
}
