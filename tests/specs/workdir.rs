// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Working-directory provisioning and conditional cleanup.

use crate::prelude::*;
use errand_cmd::{Cmd, ExecError, SetupError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn missing_directory_is_created_before_the_process_runs() {
    let (_scratch, dir) = fresh_dir();
    assert!(!dir.exists());

    let result = Cmd::new(["pwd"]).work_dir(&dir).execute().await.unwrap();

    assert!(dir.is_dir());
    let canonical = dir.canonicalize().unwrap();
    assert_eq!(result.output_utf8().trim(), canonical.to_string_lossy());
}

/// Fresh directory with cleanup: absent before, present during a
/// user-registered after-stop hook, absent once execute returns.
#[tokio::test]
async fn fresh_directory_cleanup_lifecycle() {
    let (_scratch, dir) = fresh_dir();
    assert!(!dir.exists());

    let seen_during_stop = Arc::new(AtomicBool::new(false));
    let result = Cmd::new(["echo", "hi"])
        .work_dir(&dir)
        .clean_up(true)
        .after_stop({
            let seen = seen_during_stop.clone();
            let dir = dir.clone();
            move |_| {
                seen.store(dir.is_dir(), Ordering::SeqCst);
            }
        })
        .execute()
        .await
        .unwrap();

    assert_eq!(result.output_utf8(), "hi\n");
    assert!(seen_during_stop.load(Ordering::SeqCst));
    assert!(!dir.exists());
}

/// A directory the caller owned before the run is never deleted.
#[tokio::test]
async fn preexisting_directory_survives_cleanup() {
    let (_scratch, dir) = fresh_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("keep.txt"), b"precious").unwrap();

    Cmd::new(["echo", "hi"])
        .work_dir(&dir)
        .clean_up(true)
        .execute()
        .await
        .unwrap();

    assert!(dir.is_dir());
    assert_eq!(std::fs::read(dir.join("keep.txt")).unwrap(), b"precious");
}

#[tokio::test]
async fn directory_creation_failure_aborts_before_spawn() {
    let (_scratch, dir) = fresh_dir();
    // A regular file where a parent directory is needed.
    std::fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, b"").unwrap();

    let started = Counter::new();
    let err = Cmd::new(["echo", "never"])
        .work_dir(blocker.join("sub"))
        .after_start({
            let started = started.clone();
            move |_| started.bump()
        })
        .execute()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExecError::Setup(SetupError::CreateDir { .. })
    ));
    assert_eq!(started.get(), 0);
}
