//! Formatter process dispatch.
//!
//! Idle -> Dispatch -> (Success | Failure) -> Idle, fully synchronous. The
//! calling handler blocks until the child exits; a hung formatter hangs the
//! invoking command, which is a known limitation of the protocol.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use masthead_config::Config;
use masthead_core::{Buffer, Selection};

use crate::registry::{command_for, is_supported};

/// Result of a formatter run, surfaced to the host.
#[derive(Debug, PartialEq, Eq)]
pub enum FormatOutcome {
    /// Every targeted selection was replaced with formatter output.
    Formatted {
        /// Number of selections replaced.
        replaced: usize,
    },
    /// No formatter is registered or resolved for the buffer's language.
    NoFormatter,
    /// The formatter exited nonzero or could not be spawned for at least
    /// one selection. Failing selections are left untouched; the others
    /// were still formatted. Carries the first failure's diagnostics.
    Failed {
        /// Child exit code, if the process ran at all.
        code: Option<i32>,
        /// Diagnostic text for the error dialog.
        message: String,
    },
}

/// Pipe the buffer's selections through the configured formatter.
///
/// With no selection (or an empty first selection) the whole buffer is
/// treated as one selection. Each non-empty selection is piped through a
/// fresh child process and replaced independently on a zero exit; a failing
/// selection is skipped and reported after the rest have run.
pub fn format_buffer(buffer: &mut Buffer, config: &Config) -> Result<FormatOutcome> {
    let Some(language) = buffer.language() else {
        return Ok(FormatOutcome::NoFormatter);
    };
    if !is_supported(language) {
        return Ok(FormatOutcome::NoFormatter);
    }
    let Some(command) = command_for(language, config) else {
        return Ok(FormatOutcome::NoFormatter);
    };

    if buffer.selections().is_empty() || buffer.selections()[0].is_empty() {
        buffer.set_selections(vec![Selection::new(0, buffer.text().len())]);
    }

    let mut replaced = 0;
    let mut failure: Option<(Option<i32>, String)> = None;
    for i in 0..buffer.selections().len() {
        let selection = buffer.selections()[i];
        if selection.is_empty() {
            continue;
        }

        let source = buffer.slice(selection).as_bytes().to_vec();
        match run_formatter(&command, &source)? {
            RunResult::Output(text) => {
                buffer.replace(selection.range(), &text);
                replaced += 1;
            }
            RunResult::Error { code, message } => {
                if failure.is_none() {
                    failure = Some((code, message));
                }
            }
        }
    }

    if let Some((code, message)) = failure {
        return Ok(FormatOutcome::Failed { code, message });
    }
    Ok(FormatOutcome::Formatted { replaced })
}

enum RunResult {
    Output(String),
    Error {
        code: Option<i32>,
        message: String,
    },
}

/// Spawn one formatter process and feed it `source` on stdin.
fn run_formatter(command: &[String], source: &[u8]) -> Result<RunResult> {
    let spawned = Command::new(&command[0])
        .args(&command[1..])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(err) => {
            // Missing binary or permission error is a user-visible failure,
            // not a crash.
            return Ok(RunResult::Error {
                code: None,
                message: format!("The formatter could not be started: {err}"),
            });
        }
    };

    if let Some(stdin) = child.stdin.as_mut() {
        // A child that exits without reading closes the pipe; its exit
        // status is the interesting part then.
        let _ = stdin.write_all(source);
    }
    drop(child.stdin.take());

    let output = child
        .wait_with_output()
        .context("Failed to collect formatter output")?;

    if output.status.success() {
        let text = String::from_utf8(output.stdout)
            .context("Formatter produced non-UTF-8 output")?;
        Ok(RunResult::Output(text))
    } else {
        Ok(RunResult::Error {
            code: output.status.code(),
            message: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
