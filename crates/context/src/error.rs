use std::path::PathBuf;
use thiserror::Error;

pub type ContextResult<T> = Result<T, ContextError>;

/// Errors from loading session settings. Resolution itself never fails.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to read settings '{path}': {source}")]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in '{path}': {source}")]
    ParseSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
