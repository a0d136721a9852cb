use std::ffi::OsStr;
use std::process::Stdio;

use tokio::process::Command;
use tokio::time::{timeout_at, Instant};
use tracing::trace;

use crate::error::DetectError;

/// Run an external program to completion and return its stdout.
///
/// The child is killed if it is still running at `deadline`, or if the
/// returned future is dropped first.
pub async fn run<I, S>(program: &str, args: I, deadline: Instant) -> Result<String, DetectError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| DetectError::Spawn {
            program: program.to_string(),
            source,
        })?;

    // Dropping the wait future on timeout drops the child, which kills it.
    let output = match timeout_at(deadline, child.wait_with_output()).await {
        Ok(result) => result.map_err(|source| DetectError::Spawn {
            program: program.to_string(),
            source,
        })?,
        Err(_) => {
            return Err(DetectError::Timeout {
                program: program.to_string(),
            })
        }
    };

    if !output.status.success() {
        return Err(DetectError::Exit {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    trace!(program, bytes = stdout.len(), "Command finished");
    Ok(stdout)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    fn in_secs(secs: u64) -> Instant {
        Instant::now() + Duration::from_secs(secs)
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let out = run("sh", ["-c", "echo hello"], in_secs(10)).await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_error() {
        let err = run("sh", ["-c", "echo oops >&2; exit 3"], in_secs(10))
            .await
            .unwrap_err();
        match err {
            DetectError::Exit { stderr, status, .. } => {
                assert_eq!(stderr, "oops");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("expected exit error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = run("soundtrack-no-such-program", ["x"], in_secs(10))
            .await
            .unwrap_err();
        assert!(matches!(err, DetectError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_deadline_kills_child() {
        let started = std::time::Instant::now();
        let deadline = Instant::now() + Duration::from_millis(200);
        let err = run("sleep", ["30"], deadline).await.unwrap_err();
        assert!(err.is_timeout());
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
