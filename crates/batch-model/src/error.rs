use std::path::PathBuf;

use thiserror::Error;

use crate::document::NodeId;

/// Structural misuse of a [`Document`](crate::Document).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("node {0} is not part of this document")]
    UnknownNode(NodeId),
    #[error("the root element cannot be removed")]
    RootRemoval,
}

/// Failure to load or validate a [`BatchSchema`](crate::BatchSchema).
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse schema: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid schema: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, DocumentError>;
