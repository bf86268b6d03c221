// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hook composition across a full execution, and lifecycle guarantees
//! under timeout and kill.

use crate::prelude::*;
use errand_cmd::{Cmd, ExecError, Hook, Hooks};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn phases_fire_in_lifecycle_order() {
    let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    Cmd::new(["echo", "hi"])
        .listening()
        .before_start({
            let log = log.clone();
            move |_| {
                log.lock().push("before_start");
                Ok(())
            }
        })
        .after_start({
            let log = log.clone();
            move |_| log.lock().push("after_start")
        })
        .after_finish({
            let log = log.clone();
            move |_, _| log.lock().push("after_finish")
        })
        .after_stop({
            let log = log.clone();
            move |_| log.lock().push("after_stop")
        })
        .back()
        .execute()
        .await
        .unwrap();

    assert_eq!(
        *log.lock(),
        vec!["before_start", "after_start", "after_finish", "after_stop"]
    );
}

/// Two branches configured from one base never affect each other.
#[tokio::test]
async fn branched_requests_stay_independent() {
    let base = Cmd::new(["echo", "base"]);
    let loud = base.command(["echo", "loud"]);
    let quiet = base.command(["echo", "quiet"]);

    assert_eq!(loud.execute().await.unwrap().output_utf8(), "loud\n");
    assert_eq!(quiet.execute().await.unwrap().output_utf8(), "quiet\n");
    assert_eq!(base.execute().await.unwrap().output_utf8(), "base\n");
}

/// A prebuilt registry can drive many requests; hooks are shared values.
#[tokio::test]
async fn registry_reused_across_requests() {
    let stops = Counter::new();
    let registry = Hooks::new().append([Hook::after_stop({
        let stops = stops.clone();
        move |_| stops.bump()
    })]);

    Cmd::new(["true"]).hooks(&registry).execute().await.unwrap();
    Cmd::new(["true"]).hooks(&registry).execute().await.unwrap();

    assert_eq!(stops.get(), 2);
}

/// Timeout-induced termination still runs cleanup: the freshly created
/// working directory is gone and after-stop fired exactly once.
#[tokio::test]
async fn timeout_still_releases_resources() {
    let (_scratch, dir) = fresh_dir();
    let stops = Counter::new();

    let err = Cmd::new(["sleep", "5"])
        .work_dir(&dir)
        .clean_up(true)
        .timeout(Duration::from_millis(50))
        .after_stop({
            let stops = stops.clone();
            move |_| stops.bump()
        })
        .execute()
        .await
        .unwrap_err();

    assert!(matches!(err, ExecError::Timeout { .. }));
    assert_eq!(stops.get(), 1);
    assert!(!dir.exists());
}

/// Killing a detached process runs the same cleanup path.
#[tokio::test]
async fn kill_still_releases_resources() {
    let (_scratch, dir) = fresh_dir();

    let mut handle = Cmd::new(["sleep", "5"])
        .work_dir(&dir)
        .clean_up(true)
        .start()
        .unwrap();
    assert!(dir.is_dir());

    handle.kill();
    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err, ExecError::Killed { .. }));
    assert!(!dir.exists());
}
