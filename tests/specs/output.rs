// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output capture duplicated into a file.

use crate::prelude::*;
use errand_cmd::Cmd;

#[tokio::test]
async fn output_file_matches_captured_output() {
    let (_scratch, dir) = fresh_dir();

    let result = Cmd::new(["echo", "hello world"])
        .work_dir(&dir)
        .output_file("test.output")
        .execute()
        .await
        .unwrap();

    let path = dir.join("test.output");
    assert!(path.is_file());
    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(Some(on_disk), result.output);
}

#[tokio::test]
async fn absolute_output_file_needs_no_working_directory() {
    let (_scratch, dir) = fresh_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("abs.output");

    Cmd::new(["echo", "anywhere"])
        .output_file(path.to_string_lossy())
        .execute()
        .await
        .unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"anywhere\n");
}

#[tokio::test]
async fn output_file_keeps_bytes_written_before_a_failure_exit() {
    let (_scratch, dir) = fresh_dir();

    let result = Cmd::script("echo partial; exit 2")
        .work_dir(&dir)
        .output_file("partial.log")
        .execute()
        .await
        .unwrap();

    assert_eq!(result.exit_code, 2);
    assert_eq!(
        std::fs::read(dir.join("partial.log")).unwrap(),
        b"partial\n"
    );
}

#[tokio::test]
async fn blank_output_file_name_is_disabled() {
    let (_scratch, dir) = fresh_dir();

    Cmd::new(["echo", "hi"])
        .work_dir(&dir)
        .output_file("  ")
        .execute()
        .await
        .unwrap();

    // Only the directory itself; no stray file was created.
    let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert!(entries.is_empty());
}
