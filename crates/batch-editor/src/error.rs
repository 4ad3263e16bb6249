//! Editor error types.

use batch_model::{DocumentError, SchemaError};
use batch_store::StoreError;
use thiserror::Error;

use crate::session::SessionState;

/// Rejected list operation. The document is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("tier {tier} has no parent selection")]
    NoParentSelected { tier: usize },

    #[error("an entry named '{name}' already exists in tier {tier}")]
    DuplicateName { tier: usize, name: String },

    #[error("index {index} is out of range for tier {tier} with {len} entries")]
    IndexOutOfRange { tier: usize, index: usize, len: usize },

    #[error("entry name must not be empty")]
    EmptyName,

    #[error("tier {tier} does not exist")]
    UnknownTier { tier: usize },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Editing session failure.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    List(#[from] ListError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("cannot {operation} while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}

impl SessionError {
    /// Whether the user can correct the input and try again in the same session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
