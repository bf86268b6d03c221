// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Predefined hooks.
//!
//! Every derived behavior of the engine — working-directory provisioning,
//! cleanup-on-stop, output-to-file — is built from these, with the same
//! [`Hook`] vocabulary callers use. There is no privileged internal hook
//! type: ordering relative to user hooks is explicit, a caller can replace
//! any of these with their own same-phase hook, and testing them is
//! testing an ordinary hook.
//!
//! Hooks allocate their per-run resources (file handles, created flags)
//! inside the before-start closure, never in the returned value, so one
//! hook value can serve many runs.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use errand_core::{Hook, SetupError};

/// Assign and create the working directory if it does not exist.
///
/// Records whether this run created it; with `clean_up` set, a freshly
/// created directory is deleted again after the process stops. A directory
/// that already existed is never deleted.
pub fn provision_dir(dir: impl Into<PathBuf>, clean_up: bool) -> Hook {
    let dir = dir.into();
    Hook::before_start(move |config| {
        config.set_dir(&dir);
        if dir.exists() {
            return Ok(());
        }
        std::fs::create_dir_all(&dir).map_err(|source| SetupError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!(dir = %dir.display(), "work directory created");
        if clean_up {
            config.add_hook(remove_dir(dir.clone()));
        }
        Ok(())
    })
}

/// Recursively delete a directory after the process stops.
///
/// Best-effort: failures are logged, never propagated — a failing cleanup
/// must not mask the process result the caller is about to receive.
pub fn remove_dir(dir: impl Into<PathBuf>) -> Hook {
    let dir = dir.into();
    Hook::after_stop(move |_| {
        if let Err(e) = std::fs::remove_dir_all(&dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "work directory can not be deleted");
        } else {
            tracing::debug!(dir = %dir.display(), "work directory deleted");
        }
    })
}

/// Additionally write process stdout to a file, resolved relative to the
/// working directory when one is set.
///
/// The file is opened create-or-append before start and closed exactly
/// once after stop, normal or abnormal. The primary capture still sees
/// every byte.
pub fn output_file(name: impl Into<String>) -> Hook {
    let name = name.into();
    Hook::before_start(move |config| {
        let path = resolve_output_path(&name, config.dir());
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SetupError::CreateFile {
                path: path.clone(),
                source,
            })?;

        let slot = Arc::new(Mutex::new(Some(file)));
        config.add_stdout_sink(Arc::new(Mutex::new(SharedFile(slot.clone()))));
        config.add_hook(Hook::after_stop(move |_| {
            // Take-and-drop closes the handle; a second stop is a no-op.
            if slot.lock().take().is_some() {
                tracing::debug!(path = %path.display(), "output file closed");
            }
        }));
        Ok(())
    })
}

/// Log captured stdout through `tracing` when the process finishes.
pub fn log_outputs() -> Hook {
    Hook::after_finish(|info, result| {
        if let Some(bytes) = result.output.as_deref() {
            if !bytes.is_empty() {
                tracing::info!(
                    command = %info.command.join(" "),
                    exit_code = result.exit_code,
                    stdout = %String::from_utf8_lossy(bytes),
                    "process stdout"
                );
            }
        }
    })
}

fn resolve_output_path(name: &str, dir: Option<&Path>) -> PathBuf {
    match dir {
        Some(dir) if !Path::new(name).is_absolute() => dir.join(name),
        _ => PathBuf::from(name),
    }
}

/// Write half of the output-file hook pair.
///
/// Shares the handle with the after-stop close hook; writes after close
/// are discarded.
struct SharedFile(Arc<Mutex<Option<File>>>);

impl Write for SharedFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.0.lock().as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.0.lock().as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "listeners_tests.rs"]
mod tests;
