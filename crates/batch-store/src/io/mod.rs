//! File I/O operations for batch files.
//!
//! This module handles:
//! - Loading batch files with not-found and parse classification
//! - Saving batch files with atomic writes

mod load;
mod save;

pub use load::load_document;
pub use save::save_document;
