//! Cascaded list editing for batch files.
//!
//! An [`EditorSession`] owns one batch document and a chain of
//! [`TierList`]s. Selecting an entry in a tier makes the next tier list that
//! entry's children; edits are validated before they touch the document and
//! are propagated down the chain before the call returns.

mod cascade;
mod error;
mod event;
mod session;
mod tier;

pub use cascade::Cascade;
pub use error::{ListError, Result, SessionError};
pub use event::ListEvent;
pub use session::{EditorSession, SessionState};
pub use tier::TierList;
