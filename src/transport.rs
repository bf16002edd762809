//! Completion transport — one query subprocess per trigger.
//!
//! Protocol: spawn `<gocode> -f csv autocomplete <caretByteOffset>`, write
//! the full buffer text to its stdin followed by the end-of-input marker
//! (0x1A), close stdin, wait for exit, read all of stdout. The exchange is
//! synchronous with respect to the trigger; there is no in-flight cancel,
//! only a deadline.
//!
//! Each query is a fresh short-lived child even though the daemon itself is
//! long-lived — gocode's CLI fronts the daemon and carries the answer back
//! on its own stdout.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::{CompletionError, Result};
use crate::request::CompletionRequest;

/// Marks end of the request body on the daemon's stdin (ASCII SUB).
const END_OF_INPUT: u8 = 0x1A;

/// Run one request/response exchange. Returns the daemon's raw output
/// lines in the order it produced them (possibly empty).
pub async fn query(
    daemon: &Path,
    request: &CompletionRequest,
    timeout_secs: u64,
) -> Result<Vec<String>> {
    let mut child = Command::new(daemon)
        .args(["-f", "csv", "autocomplete"])
        .arg(request.caret().to_string())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            CompletionError::Transport(format!("failed to spawn {}: {e}", daemon.display()))
        })?;

    {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CompletionError::Transport("query stdin not captured".into()))?;
        stdin
            .write_all(request.text())
            .await
            .map_err(|e| CompletionError::Transport(format!("writing request body: {e}")))?;
        stdin
            .write_all(&[END_OF_INPUT])
            .await
            .map_err(|e| CompletionError::Transport(format!("writing end-of-input: {e}")))?;
        stdin
            .flush()
            .await
            .map_err(|e| CompletionError::Transport(format!("flushing request: {e}")))?;
        // stdin drops here, closing the stream.
    }

    let output = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        child.wait_with_output(),
    )
    .await
    .map_err(|_| CompletionError::Timeout {
        seconds: timeout_secs,
    })?
    .map_err(|e| CompletionError::Transport(format!("reading query output: {e}")))?;

    if !output.status.success() {
        debug!(status = ?output.status, "query subprocess exited nonzero");
    }

    let lines = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    Ok(lines)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// Write an executable shell script standing in for gocode.
    fn fake_daemon(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("gocode");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn collects_output_lines_in_order() {
        let dir = TempDir::new().unwrap();
        let daemon = fake_daemon(
            &dir,
            "cat > /dev/null\necho 'func,,Println,,doc'\necho 'var,,x,,'",
        );
        let req = CompletionRequest::new(b"fmt.Pri".to_vec(), 7);
        let lines = query(&daemon, &req, 5).await.unwrap();
        assert_eq!(lines, vec!["func,,Println,,doc", "var,,x,,"]);
    }

    #[tokio::test]
    async fn empty_output_yields_empty_lines() {
        let dir = TempDir::new().unwrap();
        let daemon = fake_daemon(&dir, "cat > /dev/null");
        let req = CompletionRequest::new(b"x".to_vec(), 1);
        let lines = query(&daemon, &req, 5).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn daemon_receives_body_and_marker() {
        let dir = TempDir::new().unwrap();
        let capture = dir.path().join("stdin.bin");
        let daemon = fake_daemon(&dir, &format!("cat > {}", capture.display()));
        let req = CompletionRequest::new(b"package main\0\0".to_vec(), 12);
        query(&daemon, &req, 5).await.unwrap();

        let received = std::fs::read(&capture).unwrap();
        assert_eq!(received, b"package main\x1a");
    }

    #[tokio::test]
    async fn caret_offset_passed_as_argument() {
        let dir = TempDir::new().unwrap();
        let daemon = fake_daemon(&dir, "cat > /dev/null\necho \"args,,$4,,\"");
        let req = CompletionRequest::new(b"fmt.Pri".to_vec(), 7);
        let lines = query(&daemon, &req, 5).await.unwrap();
        assert_eq!(lines, vec!["args,,7,,"]);
    }

    #[tokio::test]
    async fn missing_executable_is_transport_error() {
        let req = CompletionRequest::new(b"x".to_vec(), 1);
        let err = query(Path::new("/nonexistent/gocode"), &req, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Transport(_)));
    }

    #[tokio::test]
    async fn slow_daemon_times_out() {
        let dir = TempDir::new().unwrap();
        let daemon = fake_daemon(&dir, "cat > /dev/null\nsleep 30");
        let req = CompletionRequest::new(b"x".to_vec(), 1);
        let err = query(&daemon, &req, 1).await.unwrap_err();
        assert!(matches!(err, CompletionError::Timeout { seconds: 1 }));
    }
}
