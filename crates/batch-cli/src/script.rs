//! Line-based command interpreter driving an [`EditorSession`].
//!
//! Tiers and entries are numbered from 1 on the command line.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{error, info, warn};

use batch_editor::{EditorSession, SessionError, SessionState};

use crate::render::tiers_table;
use crate::report::write_error;

pub const HELP: &str = "\
commands (tiers and entries are numbered from 1):
  list                      show all tiers
  select TIER ENTRY         select an entry; the next tier lists its children
  clear TIER                clear the selection of a tier
  add TIER NAME             add an entry under the selection of the tier above
  remove TIER ENTRY         remove an entry and everything below it
  rename TIER ENTRY NAME    rename an entry
  commit                    save the batch file and quit
  discard                   quit without saving
  help                      show this message";

/// One user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Select { tier: usize, index: usize },
    Clear { tier: usize },
    Add { tier: usize, name: String },
    Remove { tier: usize, index: usize },
    Rename { tier: usize, index: usize, name: String },
    Commit,
    Discard,
    Help,
}

/// How an editing run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed(PathBuf),
    Discarded,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "select" => {
            let (tier, rest) = take_number(rest, "tier")?;
            let (index, _) = take_number(rest, "entry")?;
            Command::Select { tier, index }
        }
        "clear" => {
            let (tier, _) = take_number(rest, "tier")?;
            Command::Clear { tier }
        }
        "add" => {
            let (tier, name) = take_number(rest, "tier")?;
            Command::Add {
                tier,
                name: take_name(name)?,
            }
        }
        "remove" | "rm" => {
            let (tier, rest) = take_number(rest, "tier")?;
            let (index, _) = take_number(rest, "entry")?;
            Command::Remove { tier, index }
        }
        "rename" => {
            let (tier, rest) = take_number(rest, "tier")?;
            let (index, name) = take_number(rest, "entry")?;
            Command::Rename {
                tier,
                index,
                name: take_name(name)?,
            }
        }
        "commit" | "ok" => Command::Commit,
        "discard" | "cancel" => Command::Discard,
        "help" | "?" => Command::Help,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(command))
}

/// Split a 1-based number off the front of `input`, returned 0-based.
fn take_number<'a>(input: &'a str, what: &str) -> Result<(usize, &'a str)> {
    let input = input.trim_start();
    let (token, rest) = input
        .split_once(char::is_whitespace)
        .unwrap_or((input, ""));
    if token.is_empty() {
        bail!("missing {what} number");
    }
    let number: usize = token
        .parse()
        .with_context(|| format!("invalid {what} number '{token}'"))?;
    let index = number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("{what} numbers start at 1"))?;
    Ok((index, rest))
}

fn take_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.is_empty() {
        bail!("missing entry name");
    }
    Ok(name.to_string())
}

/// Feed commands from `input` to a ready session until it closes.
///
/// Rejected commands and failed saves are reported on `out` and the loop
/// continues. If the input ends while the session is still ready, the edits
/// are discarded.
pub fn run<R: BufRead, W: Write>(
    session: &mut EditorSession,
    input: R,
    out: &mut W,
) -> Result<Outcome> {
    if session.state() != SessionState::Ready {
        bail!("session is {}, nothing to edit", session.state());
    }
    writeln!(out, "{}", tiers_table(session)?)?;

    for line in input.lines() {
        let line = line.context("read command")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                write_error(out, &error)?;
                continue;
            }
        };
        match execute(session, &command, out) {
            Ok(Some(outcome)) => return Ok(outcome),
            Ok(None) => {}
            Err(error) => match error.downcast_ref::<SessionError>() {
                Some(session_error) if session_error.is_recoverable() => {
                    warn!(command = ?command, error = %error, "Command rejected");
                    write_error(out, &error)?;
                }
                // A failed save leaves the session ready.
                Some(_) if session.state() == SessionState::Ready => {
                    error!(command = ?command, error = %error, "Command failed");
                    write_error(out, &error)?;
                }
                _ => return Err(error),
            },
        }
    }

    if session.is_dirty() {
        writeln!(out, "input ended without commit; discarding changes")?;
    }
    session.discard()?;
    Ok(Outcome::Discarded)
}

fn execute<W: Write>(
    session: &mut EditorSession,
    command: &Command,
    out: &mut W,
) -> Result<Option<Outcome>> {
    match command {
        Command::List => {
            writeln!(out, "{}", tiers_table(session)?)?;
            return Ok(None);
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(None);
        }
        Command::Commit => {
            let path = session.commit()?;
            info!("Batch file saved to {}", path.display());
            writeln!(out, "saved {}", path.display())?;
            return Ok(Some(Outcome::Committed(path)));
        }
        Command::Discard => {
            session.discard()?;
            writeln!(out, "discarded changes")?;
            return Ok(Some(Outcome::Discarded));
        }
        Command::Select { tier, index } => {
            session.select(*tier, *index)?;
        }
        Command::Clear { tier } => session.clear_selection(*tier)?,
        Command::Add { tier, name } => {
            session.add_entry(*tier, name)?;
        }
        Command::Remove { tier, index } => session.remove_entry(*tier, *index)?,
        Command::Rename { tier, index, name } => {
            session.rename_entry(*tier, *index, name)?;
        }
    }

    if !session.drain_events().is_empty() {
        writeln!(out, "{}", tiers_table(session)?)?;
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_one_based() {
        assert_eq!(
            parse_command("select 1 2").unwrap(),
            Some(Command::Select { tier: 0, index: 1 })
        );
        assert_eq!(
            parse_command("  rm 3 1 ").unwrap(),
            Some(Command::Remove { tier: 2, index: 0 })
        );
    }

    #[test]
    fn names_keep_inner_spaces() {
        assert_eq!(
            parse_command("add 1 Reference Scenario").unwrap(),
            Some(Command::Add {
                tier: 0,
                name: "Reference Scenario".to_string()
            })
        );
        assert_eq!(
            parse_command("rename 3 2   ../input/a b.xml ").unwrap(),
            Some(Command::Rename {
                tier: 2,
                index: 1,
                name: "../input/a b.xml".to_string()
            })
        );
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   # setup").unwrap(), None);
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(parse_command("select 1").is_err());
        assert!(parse_command("select 0 1").is_err());
        assert!(parse_command("select x 1").is_err());
        assert!(parse_command("add 1").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn aliases() {
        assert_eq!(parse_command("OK").unwrap(), Some(Command::Commit));
        assert_eq!(parse_command("cancel").unwrap(), Some(Command::Discard));
        assert_eq!(parse_command("ls").unwrap(), Some(Command::List));
    }
}
