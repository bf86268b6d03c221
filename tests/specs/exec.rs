// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Basic execution: capture, exit codes, interpreter prefixing.

use errand_cmd::Cmd;
use std::time::Duration;

/// Baseline: echo with no directory and no hooks.
#[tokio::test]
async fn echo_captures_hello_world() {
    let result = Cmd::new(["echo", "Hello world"]).execute().await.unwrap();
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.output_utf8(), "Hello world\n");
}

/// Interpreter prefixing is string-level; nothing is executed.
#[test]
fn interpreter_prefixes_the_command_line() {
    let cmd = Cmd::new(["-c", "echo $X"]).interpreter("sh");
    assert_eq!(cmd.command_line(), vec!["sh", "-c", "echo $X"]);
}

#[tokio::test]
async fn script_runs_through_the_shell() {
    let result = Cmd::script("echo one && echo two").execute().await.unwrap();
    assert_eq!(result.output_utf8(), "one\ntwo\n");
}

#[tokio::test]
async fn non_zero_exit_comes_back_as_a_result() {
    let result = Cmd::script("exit 7").execute().await.unwrap();
    assert_eq!(result.exit_code, 7);
    assert!(!result.success());
}

#[tokio::test]
async fn execute_no_timeout_outlives_the_configured_timeout() {
    let result = Cmd::script("sleep 0.2; echo survived")
        .timeout(Duration::from_millis(50))
        .execute_no_timeout()
        .await
        .unwrap();
    assert_eq!(result.output_utf8(), "survived\n");
}
