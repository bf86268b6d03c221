// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutable pre-spawn process configuration and the started-process view.

use parking_lot::Mutex;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::hook::Hook;

/// Additional sink for a process output stream.
///
/// Shared between the output pump and whichever hook owns the underlying
/// resource (e.g. the output-file hook keeps the handle so it can close it
/// after stop).
pub type OutputSink = Arc<Mutex<dyn Write + Send>>;

/// Configuration of a not-yet-started process.
///
/// Handed to every before-start hook in registration order. Hooks may
/// adjust fields, attach output sinks, and append further hooks for later
/// lifecycle phases. Once the process is spawned the configuration is
/// frozen.
pub struct ProcessConfig {
    command: Vec<String>,
    dir: Option<PathBuf>,
    env: Vec<(String, String)>,
    timeout: Option<Duration>,
    capture: bool,
    stdout_sinks: Vec<OutputSink>,
    stderr_sinks: Vec<OutputSink>,
    added_hooks: Vec<Hook>,
}

impl ProcessConfig {
    /// New configuration for the given effective command line.
    ///
    /// Capture is on by default; a before-start hook may disable it.
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            dir: None,
            env: Vec::new(),
            timeout: None,
            capture: true,
            stdout_sinks: Vec::new(),
            stderr_sinks: Vec::new(),
            added_hooks: Vec::new(),
        }
    }

    /// The effective command line (program + arguments).
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Replace the effective command line.
    pub fn set_command(&mut self, command: Vec<String>) {
        self.command = command;
    }

    /// Working directory, when one was assigned.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Assign the working directory.
    pub fn set_dir(&mut self, dir: impl Into<PathBuf>) {
        self.dir = Some(dir.into());
    }

    /// Environment overrides layered onto the parent environment.
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Add one environment override.
    pub fn push_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env.push((key.into(), value.into()));
    }

    /// Timeout honored by the blocking execute path.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Set the timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Whether standard output is captured into the result.
    pub fn capture(&self) -> bool {
        self.capture
    }

    /// Enable or disable output capture.
    pub fn set_capture(&mut self, capture: bool) {
        self.capture = capture;
    }

    /// Duplicate standard output into an additional sink.
    ///
    /// The primary capture is not replaced; every sink sees the same bytes.
    pub fn add_stdout_sink(&mut self, sink: OutputSink) {
        self.stdout_sinks.push(sink);
    }

    /// Duplicate standard error into an additional sink.
    pub fn add_stderr_sink(&mut self, sink: OutputSink) {
        self.stderr_sinks.push(sink);
    }

    /// Sinks attached to standard output, in attachment order.
    pub fn stdout_sinks(&self) -> &[OutputSink] {
        &self.stdout_sinks
    }

    /// Sinks attached to standard error, in attachment order.
    pub fn stderr_sinks(&self) -> &[OutputSink] {
        &self.stderr_sinks
    }

    /// Register a hook from inside a before-start hook.
    ///
    /// The hook participates in all later phases of the in-flight run; its
    /// own before-start callback is not fired for this run.
    pub fn add_hook(&mut self, hook: Hook) {
        self.added_hooks.push(hook);
    }

    /// Drain hooks registered since the last call.
    pub fn take_added_hooks(&mut self) -> Vec<Hook> {
        std::mem::take(&mut self.added_hooks)
    }
}

impl fmt::Debug for ProcessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessConfig")
            .field("command", &self.command)
            .field("dir", &self.dir)
            .field("env", &self.env)
            .field("timeout", &self.timeout)
            .field("capture", &self.capture)
            .field("stdout_sinks", &self.stdout_sinks.len())
            .field("stderr_sinks", &self.stderr_sinks.len())
            .field("added_hooks", &self.added_hooks)
            .finish()
    }
}

/// Read-only view of a started process, handed to after-phase hooks.
#[derive(Debug, Clone)]
pub struct ProcessInfo {
    /// OS process id, when still known.
    pub pid: Option<u32>,
    /// The effective command line the process was started with.
    pub command: Vec<String>,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
