//! Auto-gather command execution.
//!
//! Gather failures are soft: a command that exits non-zero, times out, or
//! cannot be spawned leaves the input unresolved and lets the resolver move
//! on to its next rule. Commands like `git diff --cached` legitimately
//! produce empty output, and a broken gather command on an optional input
//! must not sink the whole invocation.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tracing::{debug, warn};

/// Run one auto-gather command for the named input. Returns the command's
/// stdout (one trailing newline trimmed) on a zero exit status, `None`
/// otherwise. `timeout_secs == 0` disables the timeout.
pub(crate) async fn gather(
    input: &str,
    command: &str,
    cwd: &Path,
    timeout_secs: u64,
) -> Option<String> {
    debug!(input, command, "auto-gathering input");

    let mut cmd = tokio::process::Command::new("sh");
    cmd.arg("-c")
        .arg(command)
        .current_dir(cwd)
        // Null stdin so interactive commands fail fast instead of hanging.
        .stdin(Stdio::null());

    let result = if timeout_secs == 0 {
        cmd.output().await
    } else {
        match tokio::time::timeout(Duration::from_secs(timeout_secs), cmd.output()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(input, command, timeout_secs, "gather command timed out, input unresolved");
                return None;
            }
        }
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            warn!(input, command, error = %e, "failed to run gather command, input unresolved");
            return None;
        }
    };

    if !output.status.success() {
        warn!(
            input,
            command,
            exit_code = output.status.code().unwrap_or(-1),
            "gather command failed, input unresolved"
        );
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let trimmed = stdout.strip_suffix('\n').unwrap_or(&stdout);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cwd() -> PathBuf {
        std::env::temp_dir()
    }

    #[tokio::test]
    async fn captures_stdout_and_trims_trailing_newline() {
        let out = gather("x", "echo hello", &cwd(), 10).await;
        assert_eq!(out.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn successful_empty_output_is_empty_string_not_none() {
        let out = gather("x", "true", &cwd(), 10).await;
        assert_eq!(out.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn nonzero_exit_is_unresolved() {
        assert!(gather("x", "false", &cwd(), 10).await.is_none());
    }

    #[tokio::test]
    async fn timeout_is_unresolved() {
        assert!(gather("x", "sleep 5", &cwd(), 1).await.is_none());
    }

    #[tokio::test]
    async fn runs_in_the_given_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "found").unwrap();
        let out = gather("x", "cat marker.txt", dir.path(), 10).await;
        assert_eq!(out.as_deref(), Some("found"));
    }

    #[tokio::test]
    async fn only_one_trailing_newline_is_trimmed() {
        let out = gather("x", "printf 'a\\n\\n'", &cwd(), 10).await;
        assert_eq!(out.as_deref(), Some("a\n"));
    }
}
