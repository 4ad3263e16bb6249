//! Batch file loading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use batch_model::Document;

use crate::error::{Result, StoreError};
use crate::xml::{XmlError, parse_document};

/// Read and parse the batch file at `path`.
pub fn load_document(path: &Path) -> Result<Document> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(StoreError::Parse {
                path: path.to_path_buf(),
                source: XmlError::Malformed {
                    position: 0,
                    message: "file is not valid UTF-8".to_string(),
                },
            });
        }
        Err(e) => {
            return Err(StoreError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let document = parse_document(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Loaded batch file from {}", path.display());
    Ok(document)
}
