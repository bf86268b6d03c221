// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The immutable command-execution request.
//!
//! Every configuration method takes `&self` and returns a new [`Cmd`];
//! nothing observable happens until one of the execute/start methods
//! resolves the request. Two requests branched from the same base never
//! affect each other.

use std::path::{Path, PathBuf};
use std::time::Duration;

use errand_core::{ExecResult, Hook, Hooks, ProcessConfig, ProcessInfo};

use crate::error::ExecError;
use crate::exec;
use crate::handle::StartedCmd;

/// Command line representation with the additional features around a
/// process execution: interpreter prefixing, working-directory
/// provisioning and cleanup, output capture to file, and lifecycle hooks.
#[derive(Debug, Clone, Default)]
pub struct Cmd {
    command: Vec<String>,
    interpreter: String,
    dir: Option<PathBuf>,
    env: Vec<(String, String)>,
    output_file: Option<String>,
    clean_up: bool,
    timeout: Option<Duration>,
    hooks: Hooks,
}

impl Cmd {
    /// Request for the given program and arguments.
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Cmd::default().command(command)
    }

    /// Request running `script` through `sh -c`.
    pub fn script(script: impl Into<String>) -> Self {
        Cmd::new(["-c".to_string(), script.into()]).interpreter("sh")
    }

    /// Replace the command (program + arguments). Last call wins.
    pub fn command<I, S>(&self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.clone();
        next.command = command.into_iter().map(Into::into).collect();
        next
    }

    /// Specify the command interpreter prepended at resolution.
    ///
    /// A blank string disables interpreter prefixing.
    pub fn interpreter(&self, interpreter: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.interpreter = interpreter.into();
        next
    }

    /// Set the working directory.
    ///
    /// A missing directory is created before the process starts; creation
    /// failure aborts resolution.
    pub fn work_dir(&self, dir: impl Into<PathBuf>) -> Self {
        let mut next = self.clone();
        next.dir = Some(dir.into());
        next
    }

    /// Add one environment override layered onto the parent environment.
    pub fn env(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.env.push((key.into(), value.into()));
        next
    }

    /// Delete the working directory after the process stops — but only if
    /// this execution created it. A pre-existing directory is never
    /// deleted.
    pub fn clean_up(&self, clean_up: bool) -> Self {
        let mut next = self.clone();
        next.clean_up = clean_up;
        next
    }

    /// Additionally write process output to a file with this name,
    /// resolved relative to the working directory when one is set.
    ///
    /// A blank name disables the behavior. The primary capture is
    /// duplicated into the file, not replaced.
    pub fn output_file(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.output_file = Some(name.into());
        next
    }

    /// Timeout honored by [`execute`](Cmd::execute).
    pub fn timeout(&self, timeout: Duration) -> Self {
        let mut next = self.clone();
        next.timeout = Some(timeout);
        next
    }

    /// Append one hook to the registry.
    pub fn hook(&self, hook: Hook) -> Self {
        let mut next = self.clone();
        next.hooks = next.hooks.append([hook]);
        next
    }

    /// Append every hook of a prebuilt registry, preserving its order.
    pub fn hooks(&self, hooks: &Hooks) -> Self {
        let mut next = self.clone();
        next.hooks = next.hooks.append(hooks.iter().cloned());
        next
    }

    /// Append a before-start hook.
    pub fn before_start<F>(&self, f: F) -> Self
    where
        F: Fn(&mut ProcessConfig) -> Result<(), errand_core::SetupError> + Send + Sync + 'static,
    {
        self.hook(Hook::before_start(f))
    }

    /// Append an after-start hook.
    pub fn after_start<F>(&self, f: F) -> Self
    where
        F: Fn(&ProcessInfo) + Send + Sync + 'static,
    {
        self.hook(Hook::after_start(f))
    }

    /// Append an after-finish hook.
    pub fn after_finish<F>(&self, f: F) -> Self
    where
        F: Fn(&ProcessInfo, &ExecResult) + Send + Sync + 'static,
    {
        self.hook(Hook::after_finish(f))
    }

    /// Append an after-stop hook.
    pub fn after_stop<F>(&self, f: F) -> Self
    where
        F: Fn(&ProcessInfo) + Send + Sync + 'static,
    {
        self.hook(Hook::after_stop(f))
    }

    /// Open a fluent scope for registering several hooks, closed with
    /// [`Listening::back`].
    pub fn listening(&self) -> Listening {
        Listening {
            owner: self.clone(),
        }
    }

    /// The resolved command line: interpreter (when set and non-blank)
    /// followed by the command. String-level; nothing is executed.
    pub fn command_line(&self) -> Vec<String> {
        let mut line = Vec::with_capacity(self.command.len() + 1);
        if !self.interpreter.trim().is_empty() {
            line.push(self.interpreter.clone());
        }
        line.extend(self.command.iter().cloned());
        line
    }

    /// Run to completion, honoring the configured timeout.
    ///
    /// Returns the result even for a non-zero exit code; errors mean the
    /// process could not be run, timed out, or failed mid-flight.
    pub async fn execute(&self) -> Result<ExecResult, ExecError> {
        exec::spawn(self, true)?.wait(None).await
    }

    /// Run to completion, ignoring any configured timeout.
    pub async fn execute_no_timeout(&self) -> Result<ExecResult, ExecError> {
        exec::spawn(self, false)?.wait(None).await
    }

    /// Start without blocking and return a handle.
    ///
    /// The lifecycle (output pumping, after-finish/after-stop hooks) runs
    /// on a background task even if the handle is never awaited.
    /// Resolution and spawn failures surface here, synchronously.
    pub fn start(&self) -> Result<StartedCmd, ExecError> {
        Ok(StartedCmd::launch(exec::spawn(self, false)?))
    }

    pub(crate) fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub(crate) fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    pub(crate) fn output_file_name(&self) -> Option<&str> {
        self.output_file.as_deref()
    }

    pub(crate) fn is_clean_up(&self) -> bool {
        self.clean_up
    }

    pub(crate) fn timeout_value(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn hook_registry(&self) -> &Hooks {
        &self.hooks
    }
}

/// Fluent scope for registering several hooks before returning to the
/// request. A scoping convenience over the same registry, not a separate
/// data model.
#[derive(Debug, Clone)]
pub struct Listening {
    owner: Cmd,
}

impl Listening {
    /// Append a before-start hook.
    pub fn before_start<F>(self, f: F) -> Self
    where
        F: Fn(&mut ProcessConfig) -> Result<(), errand_core::SetupError> + Send + Sync + 'static,
    {
        Self {
            owner: self.owner.before_start(f),
        }
    }

    /// Append an after-start hook.
    pub fn after_start<F>(self, f: F) -> Self
    where
        F: Fn(&ProcessInfo) + Send + Sync + 'static,
    {
        Self {
            owner: self.owner.after_start(f),
        }
    }

    /// Append an after-finish hook.
    pub fn after_finish<F>(self, f: F) -> Self
    where
        F: Fn(&ProcessInfo, &ExecResult) + Send + Sync + 'static,
    {
        Self {
            owner: self.owner.after_finish(f),
        }
    }

    /// Append an after-stop hook.
    pub fn after_stop<F>(self, f: F) -> Self
    where
        F: Fn(&ProcessInfo) + Send + Sync + 'static,
    {
        Self {
            owner: self.owner.after_stop(f),
        }
    }

    /// Close the scope and return to the request.
    pub fn back(self) -> Cmd {
        self.owner
    }
}

#[cfg(test)]
#[path = "cmd_tests.rs"]
mod tests;
