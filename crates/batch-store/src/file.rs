//! A document bound to the path it was opened from or will be saved to.

use std::path::{Path, PathBuf};

use batch_model::Document;

use crate::error::{Result, StoreError};
use crate::io::{load_document, save_document};

/// In-memory batch document plus its associated file path.
#[derive(Debug, Clone)]
pub struct BatchFile {
    document: Document,
    path: PathBuf,
}

impl BatchFile {
    /// Create a document holding only a `root_tag` element.
    ///
    /// Nothing is written until [`save`](Self::save) is called.
    pub fn create_empty(root_tag: &str, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        tracing::info!(root = root_tag, "Created new batch file {}", path.display());
        Self {
            document: Document::new(root_tag),
            path,
        }
    }

    /// Load the batch file at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = load_document(&path)?;
        Ok(Self { document, path })
    }

    /// Fail with [`StoreError::UnexpectedRoot`] unless the root tag is `expected`.
    pub fn expect_root(&self, expected: &str) -> Result<()> {
        let found = self.document.root_tag();
        if found == expected {
            Ok(())
        } else {
            Err(StoreError::UnexpectedRoot {
                path: self.path.clone(),
                expected: expected.to_string(),
                found: found.to_string(),
            })
        }
    }

    /// Save to the associated path.
    pub fn save(&self) -> Result<()> {
        save_document(&self.document, &self.path)
    }

    /// Save to `path` and associate the document with it.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        save_document(&self.document, &path)?;
        self.path = path;
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
