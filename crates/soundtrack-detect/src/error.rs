use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{program}` did not finish before the deadline")]
    Timeout { program: String },

    #[error("unreadable output: {0}")]
    Payload(String),
}

impl DetectError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, DetectError::Timeout { .. })
    }
}
