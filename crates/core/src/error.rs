// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while preparing a process for spawning.

use std::path::PathBuf;
use thiserror::Error;

/// Failures during resolution, before any process exists.
///
/// All variants are fatal: resolution aborts and nothing is spawned.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The request resolved to an empty command line.
    #[error("empty command")]
    EmptyCommand,

    /// Working directory could not be created.
    #[error("work directory {} can not be created", path.display())]
    CreateDir {
        /// The directory that was being created.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be created.
    #[error("output file {} can not be created", path.display())]
    CreateFile {
        /// The file that was being opened.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other IO failure inside a before-start hook.
    #[error("before-start hook failed: {0}")]
    Io(#[from] std::io::Error),
}
