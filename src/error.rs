// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the outer layers (config files and snapshots). Matching and
/// classification never fail.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("corrupt snapshot: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("failed to persist snapshot: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
