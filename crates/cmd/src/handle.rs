// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handle to a process started without blocking the caller.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use errand_core::ExecResult;

use crate::error::ExecError;
use crate::exec::Running;

/// A detached execution.
///
/// The lifecycle (output pumping, after-finish/after-stop hooks) runs on a
/// background task; hooks fire even if the handle is never awaited.
/// Dropping the handle detaches the process without killing it.
#[derive(Debug)]
pub struct StartedCmd {
    pid: Option<u32>,
    command: String,
    kill_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<ExecResult, ExecError>>,
}

impl StartedCmd {
    pub(crate) fn launch(running: Running) -> Self {
        let (kill_tx, kill_rx) = oneshot::channel();
        let pid = running.pid();
        let command = running.display().to_string();
        let task = tokio::spawn(running.wait(Some(kill_rx)));
        Self {
            pid,
            command,
            kill_tx: Some(kill_tx),
            task,
        }
    }

    /// OS process id, when still known.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Request the process to be killed.
    ///
    /// After-stop hooks still fire on the lifecycle task; a subsequent
    /// [`wait`](StartedCmd::wait) reports [`ExecError::Killed`]. Killing a
    /// process that already exited is a no-op.
    pub fn kill(&mut self) {
        if let Some(tx) = self.kill_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Await completion and the result.
    pub async fn wait(self) -> Result<ExecResult, ExecError> {
        self.task
            .await
            .map_err(|e| ExecError::Interrupted(e.to_string()))?
    }

    /// Await completion for at most `timeout`.
    ///
    /// When the timeout elapses the process is killed; after-stop hooks
    /// run to completion before this returns.
    pub async fn wait_timeout(mut self, timeout: Duration) -> Result<ExecResult, ExecError> {
        match tokio::time::timeout(timeout, &mut self.task).await {
            Ok(res) => res.map_err(|e| ExecError::Interrupted(e.to_string()))?,
            Err(_) => {
                self.kill();
                // Let the lifecycle finish so cleanup hooks have run.
                let _ = (&mut self.task).await;
                Err(ExecError::Timeout {
                    command: self.command,
                    timeout,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
