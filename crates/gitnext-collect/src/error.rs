use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("not a git repository: {}", path.display())]
    NotARepository { path: PathBuf },

    #[error("`git {command}` failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),
}
