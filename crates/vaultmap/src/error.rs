//! Library error type.

use std::path::PathBuf;

/// Errors surfaced by loading, validating, and writing vault documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("colour tag must be 1..=6, got {0:?}")]
    InvalidColor(String),

    #[error("duplicate node id {0:?}")]
    DuplicateNode(String),

    #[error("edge {edge:?} references missing node {node:?}")]
    DanglingEdge { edge: String, node: String },

    #[error("unknown layout scheme {0:?} (expected a built-in name or a .json path)")]
    UnknownScheme(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}
