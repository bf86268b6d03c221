// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! errand-core: process-lifecycle vocabulary for the errand workspace.
//!
//! Pure data and callback types: the mutable pre-spawn [`ProcessConfig`],
//! the four-phase [`Hook`] variants with their ordered immutable [`Hooks`]
//! registry, the [`ExecResult`] value, and the pre-spawn [`SetupError`]
//! taxonomy. No process is ever spawned from this crate.

pub mod config;
pub mod error;
pub mod hook;
pub mod result;

pub use config::{OutputSink, ProcessConfig, ProcessInfo};
pub use error::SetupError;
pub use hook::{Hook, Hooks, Phase};
pub use result::ExecResult;
