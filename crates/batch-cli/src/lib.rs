//! CLI library components for the batch file editor.

pub mod logging;
pub mod render;
pub mod report;
pub mod script;
