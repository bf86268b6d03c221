// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle hooks and their ordered, immutable registry.
//!
//! A [`Hook`] is one callback bound to one phase of a process lifecycle.
//! Hooks carry no ordering knowledge of their own; the [`Hooks`] registry
//! preserves registration order, and the engine fires same-phase hooks in
//! that order.

use std::fmt;
use std::sync::Arc;

use crate::config::{ProcessConfig, ProcessInfo};
use crate::error::SetupError;
use crate::result::ExecResult;

/// Callback fired before the process is spawned.
///
/// May mutate the configuration and append hooks for later phases. A
/// returned error aborts resolution; the process is never started.
pub type BeforeStartFn = dyn Fn(&mut ProcessConfig) -> Result<(), SetupError> + Send + Sync;

/// Callback fired once the OS process exists.
pub type AfterStartFn = dyn Fn(&ProcessInfo) + Send + Sync;

/// Callback fired on normal completion, with the captured result.
pub type AfterFinishFn = dyn Fn(&ProcessInfo, &ExecResult) + Send + Sync;

/// Callback fired when the process stops, normally or not (kill, timeout).
///
/// Infallible by signature: after-stop work is best-effort and reports its
/// own failures through `tracing`.
pub type AfterStopFn = dyn Fn(&ProcessInfo) + Send + Sync;

/// Lifecycle phase a hook is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BeforeStart,
    AfterStart,
    AfterFinish,
    AfterStop,
}

/// A lifecycle hook: one callback, one phase.
///
/// Hooks are `Arc`-backed values — cheap to clone, immutable, and safely
/// shared across registries and threads. A hook that owns per-run
/// resources must allocate them inside its callback, never in the value
/// itself, so one hook value can serve many runs.
#[derive(Clone)]
pub enum Hook {
    BeforeStart(Arc<BeforeStartFn>),
    AfterStart(Arc<AfterStartFn>),
    AfterFinish(Arc<AfterFinishFn>),
    AfterStop(Arc<AfterStopFn>),
}

impl Hook {
    /// Hook fired before the process is spawned.
    pub fn before_start<F>(f: F) -> Self
    where
        F: Fn(&mut ProcessConfig) -> Result<(), SetupError> + Send + Sync + 'static,
    {
        Hook::BeforeStart(Arc::new(f))
    }

    /// Hook fired once the OS process exists.
    pub fn after_start<F>(f: F) -> Self
    where
        F: Fn(&ProcessInfo) + Send + Sync + 'static,
    {
        Hook::AfterStart(Arc::new(f))
    }

    /// Hook fired on normal completion with the captured result.
    pub fn after_finish<F>(f: F) -> Self
    where
        F: Fn(&ProcessInfo, &ExecResult) + Send + Sync + 'static,
    {
        Hook::AfterFinish(Arc::new(f))
    }

    /// Hook fired on any termination, normal or abnormal.
    pub fn after_stop<F>(f: F) -> Self
    where
        F: Fn(&ProcessInfo) + Send + Sync + 'static,
    {
        Hook::AfterStop(Arc::new(f))
    }

    /// The phase this hook is bound to.
    pub fn phase(&self) -> Phase {
        match self {
            Hook::BeforeStart(_) => Phase::BeforeStart,
            Hook::AfterStart(_) => Phase::AfterStart,
            Hook::AfterFinish(_) => Phase::AfterFinish,
            Hook::AfterStop(_) => Phase::AfterStop,
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hook::{:?}", self.phase())
    }
}

/// Ordered, immutable collection of hooks.
///
/// Appending returns a new registry and never mutates the receiver, so a
/// partially-configured registry can be shared and branched freely across
/// requests and threads. Iteration order equals append order; same-phase
/// hooks fire in that order. No deduplication, no validation.
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    hooks: Vec<Hook>,
}

impl Hooks {
    /// The empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// New registry: existing hooks followed by `hooks`, order preserved.
    pub fn append<I>(&self, hooks: I) -> Self
    where
        I: IntoIterator<Item = Hook>,
    {
        let mut next = self.hooks.clone();
        next.extend(hooks);
        Self { hooks: next }
    }

    /// Hooks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Hook> {
        self.hooks.iter()
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl FromIterator<Hook> for Hooks {
    fn from_iter<I: IntoIterator<Item = Hook>>(iter: I) -> Self {
        Self {
            hooks: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;
