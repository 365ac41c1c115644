use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InclusionError {
    #[error("{} is not inside the working directory {}", path.display(), cwd.display())]
    OutsideWorkingDir { path: PathBuf, cwd: PathBuf },

    #[error("Cannot read {}: {source}", file.display())]
    Io { file: PathBuf, source: std::io::Error },

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InclusionError {
    pub(crate) fn io(file: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { file: file.into(), source }
    }
}
