// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! errand-cmd: command execution with composable lifecycle hooks.
//!
//! [`Cmd`] is an immutable request builder: every configuration call
//! returns a new value, so partially-configured requests can be shared and
//! branched. Resolution places the derived behaviors (working-directory
//! provisioning, cleanup-on-stop, output-to-file) ahead of user hooks and
//! hands the spawn to `tokio::process`.
//!
//! ```no_run
//! use errand_cmd::Cmd;
//!
//! # async fn demo() -> Result<(), errand_cmd::ExecError> {
//! let result = Cmd::new(["echo", "Hello world"]).execute().await?;
//! assert_eq!(result.output_utf8(), "Hello world\n");
//! # Ok(())
//! # }
//! ```

pub mod cmd;
pub mod error;
pub mod exec;
pub mod handle;
pub mod listeners;

pub use cmd::{Cmd, Listening};
pub use error::ExecError;
pub use handle::StartedCmd;

pub use errand_core::{ExecResult, Hook, Hooks, ProcessConfig, ProcessInfo, SetupError};
