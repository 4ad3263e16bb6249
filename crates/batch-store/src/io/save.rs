//! Batch file saving.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use batch_model::Document;

use crate::error::{Result, StoreError};
use crate::xml::write_document;

/// Save a document to `path`.
///
/// Uses atomic write (temp file + rename) so the destination is either the
/// previous file or the complete new one, never a partial write.
pub fn save_document(document: &Document, path: &Path) -> Result<()> {
    let bytes = write_document(document)?;
    let temp_path = temp_path_for(path)?;

    // Create parent directory if needed
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    if let Err(error) = write_temp(&temp_path, &bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source,
        });
    }

    tracing::info!("Saved batch file to {}", path.display());
    Ok(())
}

fn write_temp(temp_path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })
}

/// Sibling temp file, e.g. `batch.xml` -> `batch.xml.tmp`.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(StoreError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path does not name a file",
            ),
        });
    };
    let mut temp_name = OsString::from(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.xml");

        save_document(&Document::new("ComponentSets"), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<?xml"));
        assert!(content.contains("<ComponentSets/>"));
        assert!(!dir.path().join("batch.xml.tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("batch.xml");

        save_document(&Document::new("ComponentSets"), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_failed_rename_leaves_target_and_no_temp() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("batch.xml");
        // A non-empty directory cannot be replaced by a file.
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "keep").unwrap();

        let result = save_document(&Document::new("ComponentSets"), &target);

        assert!(matches!(result, Err(StoreError::AtomicWriteFailed { .. })));
        assert!(target.join("keep").exists());
        assert!(!dir.path().join("batch.xml.tmp").exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let temp = temp_path_for(Path::new("/data/run/batch.xml")).unwrap();
        assert_eq!(temp, PathBuf::from("/data/run/batch.xml.tmp"));
        assert!(temp_path_for(Path::new("/")).is_err());
    }
}
