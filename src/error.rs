//! Error types for scanning and for the file/config layer around it.

use crate::record::MarkerKind;
use std::path::PathBuf;
use thiserror::Error;

/// Problems found in the scanned text itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A `TODOS.START` or `TODO: {` region reached the end of input.
    #[error("line {line}: unterminated {kind} region")]
    UnterminatedBlock { line: usize, kind: MarkerKind },
    /// Strict mode only; a marker with nothing after it.
    #[error("line {line}: {kind} marker has no body")]
    MalformedMarker { line: usize, kind: MarkerKind },
}

impl ScanError {
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnterminatedBlock { line, .. } | ScanError::MalformedMarker { line, .. } => {
                *line
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

pub type Result<T> = std::result::Result<T, Error>;
