//! Error reporting for the terminal.
//!
//! Store failures are shown with their user-facing message and hint; every
//! other error prints its context chain.

use std::io::{self, Write};

use batch_editor::SessionError;
use batch_store::StoreError;

/// Find the store failure behind an error, if there is one.
pub fn store_error(error: &anyhow::Error) -> Option<&StoreError> {
    error.chain().find_map(|cause| {
        cause
            .downcast_ref::<StoreError>()
            .or_else(|| match cause.downcast_ref::<SessionError>() {
                Some(SessionError::Store(store)) => Some(store),
                _ => None,
            })
    })
}

/// Write `error:` (and `hint:` for store failures) lines to `out`.
pub fn write_error<W: Write>(out: &mut W, error: &anyhow::Error) -> io::Result<()> {
    match store_error(error) {
        Some(store) => {
            writeln!(out, "error: {}", store.user_message())?;
            if let Some(hint) = store.suggestion() {
                writeln!(out, "hint: {hint}")?;
            }
        }
        None => writeln!(out, "error: {error:#}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use anyhow::Context;
    use batch_editor::ListError;

    use super::*;

    fn written(error: &anyhow::Error) -> String {
        let mut out = Vec::new();
        write_error(&mut out, error).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn store_errors_show_message_and_hint() {
        let error: anyhow::Error = SessionError::from(StoreError::NotFound {
            path: PathBuf::from("missing.xml"),
        })
        .into();
        let error = error.context("open missing.xml");

        insta::assert_snapshot!(written(&error), @r"
        error: The batch file missing.xml does not exist.
        hint: Check the path, or create a new batch file instead.
        ");
    }

    #[test]
    fn other_errors_print_the_chain() {
        let result: Result<(), SessionError> = Err(ListError::EmptyName.into());
        let error = result.context("add entry").unwrap_err();
        assert!(store_error(&error).is_none());
        assert_eq!(
            written(&error),
            "error: add entry: entry name must not be empty\n"
        );
    }
}
