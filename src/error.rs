// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A rule or remediation catalog is missing or malformed. Fatal: an
    /// invalid catalog makes every downstream result meaningless.
    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("invalid pattern `{id}`: {source}")]
    Pattern {
        id: String,
        source: regex::Error,
    },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("no recognizable build files under {0}; pass the ecosystem explicitly")]
    UnknownEcosystem(PathBuf),
}

pub type Result<T> = std::result::Result<T, EngineError>;

// Allow `?` on std::io::Error by converting to EngineError::Io with unknown path.
impl From<std::io::Error> for EngineError {
    fn from(source: std::io::Error) -> Self {
        EngineError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
