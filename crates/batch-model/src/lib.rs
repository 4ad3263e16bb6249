//! Batch file data model: the element tree and the tier schema that the
//! cascaded editor is configured with.

pub mod document;
pub mod error;
pub mod schema;

pub use document::{Document, Element, ElementTree, NodeId};
pub use error::{DocumentError, Result, SchemaError};
pub use schema::{BatchSchema, DEFAULT_NAME_ATTRIBUTE, DEFAULT_ROOT_TAG, TierKind, TierSpec};
