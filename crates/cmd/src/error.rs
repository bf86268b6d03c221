// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by command execution.

use errand_core::SetupError;
use std::time::Duration;
use thiserror::Error;

/// Failure modes of a single execution, distinct so callers can branch.
///
/// A non-zero exit code is not an error; it is reported through
/// [`ExecResult::exit_code`](errand_core::ExecResult).
#[derive(Debug, Error)]
pub enum ExecError {
    /// Pre-spawn configuration failed; the process was never started.
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// The program could not be spawned.
    #[error("failed to spawn {command}: {source}")]
    Spawn {
        /// The effective command line, joined for display.
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO failure while pumping output or awaiting the process.
    #[error("i/o error while running {command}: {source}")]
    Io {
        /// The effective command line, joined for display.
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The configured timeout elapsed before the process exited.
    #[error("{command} timed out after {timeout:?}")]
    Timeout {
        /// The effective command line, joined for display.
        command: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The process was killed through its handle.
    #[error("{command} was killed before completion")]
    Killed {
        /// The effective command line, joined for display.
        command: String,
    },

    /// The detached lifecycle task was cancelled or panicked while awaited.
    #[error("execution task interrupted: {0}")]
    Interrupted(String),
}
