use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoundtrackError {
    #[error("config error: {0}")]
    Config(String),

    #[error("git error: {0}")]
    Git(String),

    #[error("not inside a git repository")]
    NotARepository,

    #[error("a hook already exists at {} (use --force to overwrite)", .0.display())]
    HookExists(PathBuf),

    #[error("failed to render output: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
