use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for the engine. Configuration and enumeration errors are
/// fatal to the operation that raised them; document and query errors are
/// isolated by the caller and never abort the surrounding batch.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot read document {path}: {source}")]
    DocumentAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("index file {path} is unreadable or malformed: {reason}")]
    IndexCorrupt { path: PathBuf, reason: String },

    #[error("query has {tokens} tokens after filtering, expected 1..=10")]
    QuerySyntax { tokens: usize },

    #[error("cannot enumerate documents under {path}: {reason}")]
    Enumeration { path: PathBuf, reason: String },

    #[error("index build was cancelled")]
    BuildAborted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
