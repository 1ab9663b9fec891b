// src/errors.rs
use std::io;

use thiserror::Error;

/// Failures while reading a collection out of a query string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("string of record ids is ill-formed: '{0}'")]
    MalformedIdList(String),
    #[error("could not decode query component: {0}")]
    DecodingFailed(String),
    #[error("invalid id pattern '{pattern}': {reason}")]
    InvalidIdPattern { pattern: String, reason: String },
}

/// Transport failures for a single retrieval.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {path}")]
    Status { status: String, path: String },
    #[error("timed out retrieving {0}")]
    Timeout(String),
    #[error("too many redirects retrieving {0}")]
    Redirect(String),
    #[error("malformed response for {path}: {reason}")]
    Malformed { path: String, reason: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("path escapes the site root: {0}")]
    OutsideRoot(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FetchError {
    /// Map a read/write error into `Timeout` when the socket gave up.
    pub fn from_io(err: io::Error, path: &str) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => FetchError::Timeout(s!(path)),
            _ => FetchError::Io(err),
        }
    }
}

/// Facet table could not be loaded; the filter stays inert.
#[derive(Debug, Error)]
pub enum FacetLoadError {
    #[error("facet table fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("facet table is malformed: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for FacetLoadError {
    fn from(err: serde_json::Error) -> Self {
        FacetLoadError::Malformed(err.to_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("resolution {generation} was superseded by {current}; output discarded")]
    Superseded { generation: u64, current: u64 },
}
