// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution and the spawn/pump/wait lifecycle.
//!
//! Resolution turns an immutable [`Cmd`] into a spawn-ready configuration:
//! the interpreter prefix is applied, the derived-behavior hooks are placed
//! ahead of user hooks, and every before-start hook runs (side-effecting:
//! directory creation, file open). Failures abort before any process
//! exists. Spawning hands the configuration to `tokio::process` and fires
//! the remaining phases at the right lifecycle points.

use std::io::Write;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::sync::oneshot;

use errand_core::hook::{AfterFinishFn, AfterStartFn, AfterStopFn};
use errand_core::{ExecResult, Hook, OutputSink, ProcessConfig, ProcessInfo, SetupError};

use crate::cmd::Cmd;
use crate::error::ExecError;
use crate::listeners;

/// A resolved request: configuration after every before-start hook ran,
/// plus the later-phase hooks in firing order.
struct Resolved {
    config: ProcessConfig,
    after_start: Vec<Arc<AfterStartFn>>,
    after_finish: Vec<Arc<AfterFinishFn>>,
    after_stop: Vec<Arc<AfterStopFn>>,
}

/// Resolve a request without spawning.
///
/// Derived-behavior hooks (working-directory provisioning, output file)
/// are placed ahead of user hooks, so user hooks observe a directory that
/// exists and an output file already wired up. Hooks appended mid-run via
/// [`ProcessConfig::add_hook`] join the later phases only.
fn resolve(cmd: &Cmd) -> Result<Resolved, SetupError> {
    let line = cmd.command_line();
    if line.is_empty() {
        return Err(SetupError::EmptyCommand);
    }

    let mut config = ProcessConfig::new(line);
    if let Some(dir) = cmd.dir() {
        config.set_dir(dir);
    }
    for (key, value) in cmd.env_vars() {
        config.push_env(key.clone(), value.clone());
    }
    if let Some(timeout) = cmd.timeout_value() {
        config.set_timeout(timeout);
    }

    let mut ordered: Vec<Hook> = Vec::with_capacity(cmd.hook_registry().len() + 2);
    if let Some(dir) = cmd.dir() {
        ordered.push(listeners::provision_dir(dir, cmd.is_clean_up()));
    }
    if let Some(name) = cmd.output_file_name() {
        if !name.trim().is_empty() {
            ordered.push(listeners::output_file(name));
        }
    }
    ordered.extend(cmd.hook_registry().iter().cloned());

    let mut after_start = Vec::new();
    let mut after_finish = Vec::new();
    let mut after_stop = Vec::new();
    let mut late_after_start = Vec::new();
    let mut late_after_finish = Vec::new();
    let mut late_after_stop = Vec::new();

    for hook in ordered {
        match hook {
            Hook::BeforeStart(f) => {
                f(&mut config)?;
                for added in config.take_added_hooks() {
                    match added {
                        // Too late for this run's before-start phase;
                        // later phases only.
                        Hook::BeforeStart(_) => {}
                        Hook::AfterStart(f) => late_after_start.push(f),
                        Hook::AfterFinish(f) => late_after_finish.push(f),
                        Hook::AfterStop(f) => late_after_stop.push(f),
                    }
                }
            }
            Hook::AfterStart(f) => after_start.push(f),
            Hook::AfterFinish(f) => after_finish.push(f),
            Hook::AfterStop(f) => after_stop.push(f),
        }
    }

    // Hooks appended during before-start fire after the user-registered
    // hooks of their phase: an after-stop assertion hook still observes
    // the working directory and the open output file. After-stop
    // additions run in reverse registration order, releasing resources in
    // reverse of acquisition (the output file closes before its directory
    // is deleted).
    after_start.extend(late_after_start);
    after_finish.extend(late_after_finish);
    after_stop.extend(late_after_stop.into_iter().rev());

    Ok(Resolved {
        config,
        after_start,
        after_finish,
        after_stop,
    })
}

/// Resolve and spawn. After-start hooks fire once the OS process exists.
///
/// `honor_timeout` selects whether the configured timeout applies to the
/// returned lifecycle; the detached path ignores it in favor of the
/// handle's explicit `wait_timeout`.
pub(crate) fn spawn(cmd: &Cmd, honor_timeout: bool) -> Result<Running, ExecError> {
    let Resolved {
        config,
        after_start,
        after_finish,
        after_stop,
    } = resolve(cmd)?;

    // Before-start hooks may rewrite the command; re-check it.
    let (program, args) = match config.command().split_first() {
        Some(pair) => pair,
        None => return Err(SetupError::EmptyCommand.into()),
    };
    let cmdline = config.command().join(" ");

    let mut command = tokio::process::Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = config.dir() {
        command.current_dir(dir);
    }
    for (key, value) in config.env() {
        command.env(key, value);
    }

    tracing::info!(command = %cmdline, cwd = ?config.dir(), "starting process");

    let mut child = command.spawn().map_err(|source| ExecError::Spawn {
        command: cmdline.clone(),
        source,
    })?;

    let info = ProcessInfo {
        pid: child.id(),
        command: config.command().to_vec(),
    };
    for f in &after_start {
        f(&info);
    }

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    Ok(Running {
        child,
        stdout,
        stderr,
        stdout_sinks: config.stdout_sinks().to_vec(),
        stderr_sinks: config.stderr_sinks().to_vec(),
        capture: config.capture(),
        timeout: if honor_timeout { config.timeout() } else { None },
        info,
        display: cmdline,
        after_finish,
        after_stop,
    })
}

/// A spawned process with its pending lifecycle.
pub(crate) struct Running {
    child: tokio::process::Child,
    stdout: Option<tokio::process::ChildStdout>,
    stderr: Option<tokio::process::ChildStderr>,
    stdout_sinks: Vec<OutputSink>,
    stderr_sinks: Vec<OutputSink>,
    capture: bool,
    timeout: Option<Duration>,
    info: ProcessInfo,
    display: String,
    after_finish: Vec<Arc<AfterFinishFn>>,
    after_stop: Vec<Arc<AfterStopFn>>,
}

enum Stopped {
    Done(std::io::Result<(std::process::ExitStatus, Option<Vec<u8>>)>),
    TimedOut(Duration),
    Killed,
}

impl Running {
    pub(crate) fn pid(&self) -> Option<u32> {
        self.info.pid
    }

    pub(crate) fn display(&self) -> &str {
        &self.display
    }

    /// Pump output, await termination, fire the remaining hooks.
    ///
    /// After-stop hooks fire exactly once on every path out of here —
    /// normal exit, IO failure, timeout, and kill — so resource-owning
    /// hooks (cleanup, file close) never leak.
    pub(crate) async fn wait(
        mut self,
        kill: Option<oneshot::Receiver<()>>,
    ) -> Result<ExecResult, ExecError> {
        let stdout_pump = pump(self.stdout.take(), self.stdout_sinks.clone(), self.capture);
        let stderr_pump = pump(self.stderr.take(), self.stderr_sinks.clone(), false);
        let timeout = self.timeout;

        let stopped = {
            let child = &mut self.child;
            let drive = async {
                let (out, err) = tokio::join!(stdout_pump, stderr_pump);
                let out = out?;
                err?;
                let status = child.wait().await?;
                Ok::<_, std::io::Error>((status, out))
            };
            tokio::pin!(drive);

            let sleep = async move {
                match timeout {
                    Some(timeout) => {
                        tokio::time::sleep(timeout).await;
                        timeout
                    }
                    None => std::future::pending().await,
                }
            };
            tokio::pin!(sleep);

            let killed = async move {
                match kill {
                    // A dropped handle is not a kill request.
                    Some(rx) => match rx.await {
                        Ok(()) => (),
                        Err(_) => std::future::pending().await,
                    },
                    None => std::future::pending().await,
                }
            };
            tokio::pin!(killed);

            tokio::select! {
                // A finished process wins over a racing kill or timeout.
                biased;
                res = &mut drive => Stopped::Done(res),
                timeout = &mut sleep => Stopped::TimedOut(timeout),
                _ = &mut killed => Stopped::Killed,
            }
        };

        match stopped {
            Stopped::Done(Ok((status, output))) => {
                let exit_code = status.code().unwrap_or(-1);
                let result = ExecResult { exit_code, output };
                tracing::info!(command = %self.display, exit_code, "process finished");
                for f in &self.after_finish {
                    f(&self.info, &result);
                }
                self.fire_after_stop();
                Ok(result)
            }
            Stopped::Done(Err(source)) => {
                self.kill_child().await;
                self.fire_after_stop();
                Err(ExecError::Io {
                    command: self.display,
                    source,
                })
            }
            Stopped::TimedOut(timeout) => {
                tracing::warn!(command = %self.display, ?timeout, "process timed out");
                self.kill_child().await;
                self.fire_after_stop();
                Err(ExecError::Timeout {
                    command: self.display,
                    timeout,
                })
            }
            Stopped::Killed => {
                self.kill_child().await;
                self.fire_after_stop();
                Err(ExecError::Killed {
                    command: self.display,
                })
            }
        }
    }

    async fn kill_child(&mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::warn!(command = %self.display, error = %e, "kill failed");
        }
    }

    fn fire_after_stop(&self) {
        for f in &self.after_stop {
            f(&self.info);
        }
    }
}

/// Copy a child stream into the capture buffer and every attached sink.
async fn pump<R>(
    stream: Option<R>,
    sinks: Vec<OutputSink>,
    capture: bool,
) -> std::io::Result<Option<Vec<u8>>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let Some(mut stream) = stream else {
        return Ok(None);
    };
    let mut captured = capture.then(Vec::new);
    let mut buf = [0u8; 8192];
    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        if let Some(captured) = captured.as_mut() {
            captured.extend_from_slice(&buf[..n]);
        }
        for sink in &sinks {
            sink.lock().write_all(&buf[..n])?;
        }
    }
    for sink in &sinks {
        sink.lock().flush()?;
    }
    Ok(captured)
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
