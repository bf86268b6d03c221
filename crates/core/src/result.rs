// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of a finished process.

use serde::Serialize;

/// Result of one completed execution.
///
/// Produced once per run; issuing the request again produces a new value.
/// A non-zero exit code is still a result, not an error — only failures to
/// run the process at all surface as errors.
#[derive(Debug, Clone, Serialize)]
pub struct ExecResult {
    /// Exit code reported by the OS (-1 when unavailable, e.g. signal death).
    pub exit_code: i32,
    /// Captured standard output, when capture was enabled.
    pub output: Option<Vec<u8>>,
}

impl ExecResult {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Captured output decoded as UTF-8 (lossy).
    ///
    /// Empty when capture was disabled or the process wrote nothing.
    pub fn output_utf8(&self) -> String {
        match &self.output {
            Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
