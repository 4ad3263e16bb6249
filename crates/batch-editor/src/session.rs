//! Editing session over a single batch file.
//!
//! A session moves `Uninitialized -> Ready -> Closed`. It exclusively owns
//! the document and the tier cascade while it is ready; committing saves and
//! closes, discarding closes without writing. A file that fails to load
//! closes the session immediately.

use std::fmt;
use std::path::{Path, PathBuf};

use batch_model::{BatchSchema, Document, NodeId};
use batch_store::BatchFile;

use crate::cascade::Cascade;
use crate::error::{ListError, Result, SessionError};
use crate::event::ListEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Closed => "closed",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
pub struct EditorSession {
    schema: BatchSchema,
    state: SessionState,
    file: Option<BatchFile>,
    cascade: Cascade,
    dirty: bool,
}

impl EditorSession {
    /// Create an unopened session for the given vocabulary.
    pub fn new(schema: BatchSchema) -> Result<Self> {
        schema.validate()?;
        let cascade = Cascade::new(&schema);
        Ok(Self {
            schema,
            state: SessionState::Uninitialized,
            file: None,
            cascade,
            dirty: false,
        })
    }

    /// Create or load the batch file at `path` and become ready.
    ///
    /// On a load failure the session is closed and the error returned.
    pub fn open(&mut self, path: impl Into<PathBuf>, is_new: bool) -> Result<()> {
        if self.state != SessionState::Uninitialized {
            return Err(self.invalid_state("open"));
        }
        let path = path.into();
        let opened = if is_new {
            Ok(BatchFile::create_empty(&self.schema.root_tag, path))
        } else {
            BatchFile::load(path).and_then(|file| {
                file.expect_root(&self.schema.root_tag)?;
                Ok(file)
            })
        };

        match opened {
            Ok(file) => {
                self.cascade.attach(file.document());
                self.file = Some(file);
                self.state = SessionState::Ready;
                Ok(())
            }
            Err(error) => {
                tracing::error!(error = %error, "Failed to open batch file, closing session");
                self.state = SessionState::Closed;
                Err(error.into())
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn schema(&self) -> &BatchSchema {
        &self.schema
    }

    /// Whether the document changed since it was opened.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn document(&self) -> Option<&Document> {
        self.file.as_ref().map(BatchFile::document)
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(BatchFile::path)
    }

    pub fn tier_count(&self) -> usize {
        self.schema.tiers.len()
    }

    pub fn tier_label(&self, tier: usize) -> Result<&str> {
        self.schema
            .tiers
            .get(tier)
            .map(|spec| spec.label.as_str())
            .ok_or_else(|| ListError::UnknownTier { tier }.into())
    }

    /// Display names of a tier's visible entries.
    pub fn entries(&self, tier: usize) -> Result<Vec<String>> {
        let document = self.ready_document("read entries")?;
        Ok(self.cascade.tier(tier)?.entry_names(document))
    }

    pub fn selected_index(&self, tier: usize) -> Result<Option<usize>> {
        self.ready_document("read the selection")?;
        Ok(self.cascade.tier(tier)?.selected_index())
    }

    pub fn select(&mut self, tier: usize, index: usize) -> Result<NodeId> {
        let (document, cascade) = self.parts("select an entry")?;
        Ok(cascade.select(document, tier, index)?)
    }

    pub fn clear_selection(&mut self, tier: usize) -> Result<()> {
        let (document, cascade) = self.parts("clear a selection")?;
        Ok(cascade.clear_selection(document, tier)?)
    }

    pub fn add_entry(&mut self, tier: usize, name: &str) -> Result<NodeId> {
        let (document, cascade) = self.parts("add an entry")?;
        let id = cascade.add_entry(document, tier, name)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn remove_entry(&mut self, tier: usize, index: usize) -> Result<()> {
        let (document, cascade) = self.parts("remove an entry")?;
        cascade.remove_entry(document, tier, index)?;
        self.dirty = true;
        Ok(())
    }

    pub fn rename_entry(&mut self, tier: usize, index: usize, new_name: &str) -> Result<NodeId> {
        let (document, cascade) = self.parts("rename an entry")?;
        let id = cascade.rename_entry(document, tier, index, new_name)?;
        self.dirty = true;
        Ok(id)
    }

    /// Take queued list notifications.
    pub fn drain_events(&mut self) -> Vec<ListEvent> {
        self.cascade.drain_events()
    }

    /// Save the document and close. If saving fails the session stays ready.
    pub fn commit(&mut self) -> Result<PathBuf> {
        if self.state != SessionState::Ready {
            return Err(self.invalid_state("commit"));
        }
        let file = self.file.as_ref().ok_or(SessionError::InvalidState {
            operation: "commit",
            state: self.state,
        })?;
        file.save()?;
        let path = file.path().to_path_buf();
        self.close();
        tracing::info!("Committed batch file {}", path.display());
        Ok(path)
    }

    /// Close without saving.
    pub fn discard(&mut self) -> Result<()> {
        if self.state != SessionState::Ready {
            return Err(self.invalid_state("discard"));
        }
        if self.dirty {
            tracing::warn!("Discarding unsaved batch file changes");
        }
        self.close();
        tracing::info!("Discarded batch file session");
        Ok(())
    }

    fn close(&mut self) {
        self.state = SessionState::Closed;
        self.file = None;
        self.cascade = Cascade::new(&self.schema);
        self.dirty = false;
    }

    fn ready_document(&self, operation: &'static str) -> Result<&Document> {
        match (&self.state, &self.file) {
            (SessionState::Ready, Some(file)) => Ok(file.document()),
            _ => Err(self.invalid_state(operation)),
        }
    }

    fn parts(&mut self, operation: &'static str) -> Result<(&mut Document, &mut Cascade)> {
        let state = self.state;
        match (state, self.file.as_mut()) {
            (SessionState::Ready, Some(file)) => Ok((file.document_mut(), &mut self.cascade)),
            _ => Err(SessionError::InvalidState { operation, state }),
        }
    }

    fn invalid_state(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState {
            operation,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> EditorSession {
        let mut session = EditorSession::new(BatchSchema::default()).unwrap();
        session.open("unsaved.xml", true).unwrap();
        session
    }

    #[test]
    fn new_session_is_uninitialized() {
        let session = EditorSession::new(BatchSchema::default()).unwrap();
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(session.document().is_none());
        assert!(matches!(
            session.entries(0),
            Err(SessionError::InvalidState {
                state: SessionState::Uninitialized,
                ..
            })
        ));
    }

    #[test]
    fn invalid_schema_is_rejected() {
        let schema = BatchSchema {
            tiers: Vec::new(),
            ..BatchSchema::default()
        };
        assert!(matches!(
            EditorSession::new(schema),
            Err(SessionError::Schema(_))
        ));
    }

    #[test]
    fn open_new_creates_root_only_document() {
        let session = ready_session();
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.document().unwrap().root_tag(), "ComponentSets");
        assert_eq!(session.path(), Some(Path::new("unsaved.xml")));
        assert!(session.entries(0).unwrap().is_empty());
        assert!(!session.is_dirty());
    }

    #[test]
    fn open_twice_is_rejected() {
        let mut session = ready_session();
        assert!(matches!(
            session.open("other.xml", true),
            Err(SessionError::InvalidState { operation: "open", .. })
        ));
    }

    #[test]
    fn edits_mark_dirty_and_discard_closes() {
        let mut session = ready_session();
        session.add_entry(0, "Base").unwrap();
        assert!(session.is_dirty());

        session.discard().unwrap();
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.document().is_none());
        assert!(!session.is_dirty());
    }

    #[test]
    fn failed_edit_does_not_mark_dirty() {
        let mut session = ready_session();
        assert!(session.add_entry(1, "Main").is_err());
        assert!(!session.is_dirty());
    }

    #[test]
    fn closed_session_rejects_everything() {
        let mut session = ready_session();
        session.discard().unwrap();

        assert!(matches!(
            session.add_entry(0, "Base"),
            Err(SessionError::InvalidState {
                state: SessionState::Closed,
                ..
            })
        ));
        assert!(session.select(0, 0).is_err());
        assert!(session.entries(0).is_err());
        assert!(session.commit().is_err());
        assert!(session.discard().is_err());
    }

    #[test]
    fn list_errors_are_recoverable() {
        let mut session = ready_session();
        let error = session.select(0, 0).unwrap_err();
        assert!(error.is_recoverable());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn tier_labels_come_from_schema() {
        let session = EditorSession::new(BatchSchema::default()).unwrap();
        assert_eq!(session.tier_count(), 3);
        assert_eq!(session.tier_label(1).unwrap(), "File Sets");
        assert!(session.tier_label(3).is_err());
    }
}
