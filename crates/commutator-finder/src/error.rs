//! Error types shared by the parsers and the search drivers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read move notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid move {token:?} at position {position}")]
    InvalidMove { token: String, position: usize },
}

/// Configuration and I/O failures surfaced by the commutator finder.
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("output path is empty")]
    EmptyOutputPath,
    #[error("part B must allow at least one move, got {0}")]
    InvalidPartBLength(usize),
    #[error("cannot prepare output {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read criteria file {path:?}: {source}")]
    CriteriaRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid search criteria: {0}")]
    CriteriaParse(#[from] serde_json::Error),
}
