//! Persistent storage for batch files.
//!
//! # Features
//!
//! - **XML encoding** with `quick-xml`, preserving element order, attributes
//!   and text
//! - **Atomic writes** to prevent partially overwritten batch files
//! - **Error classification** into not-found, parse and I/O failures, each
//!   with a user-facing message
//!
//! # Example
//!
//! ```ignore
//! use batch_store::BatchFile;
//!
//! let mut file = BatchFile::create_empty("ComponentSets", "batch.xml");
//! let root = file.document().root();
//! file.document_mut().append_child(root, "ComponentSet")?;
//! file.save()?;
//!
//! let loaded = BatchFile::load("batch.xml")?;
//! ```

mod error;
mod file;
mod io;
pub mod xml;

pub use error::{Result, StoreError};
pub use file::BatchFile;
pub use io::{load_document, save_document};
pub use xml::{XmlError, parse_document, parse_tree, write_document};
