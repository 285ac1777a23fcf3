// File: src/error.rs
//! Error types for the canonicalization engine.
//!
//! An unresolvable word is not an error: it passes through unchanged. Only
//! loading the mapping data and file I/O can fail.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to build a mapping table from its source document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document is absent or unreadable
    #[error("failed to read mapping document {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON
    #[error("failed to parse mapping document {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("mapping document {origin} has no `reverse_lookup` table")]
    MissingReverseLookup { origin: String },

    /// A present key has the wrong shape
    #[error("invalid mapping document {origin}: {detail}")]
    InvalidEntry { origin: String, detail: String },

    /// A compiled snapshot could not be decoded
    #[error("failed to decode mapping snapshot {origin}: {source}")]
    Snapshot {
        origin: String,
        #[source]
        source: bincode::Error,
    },
}

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Source unreadable
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Destination unwritable
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode mapping snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

/// A `Label: value` report line whose value does not parse.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("invalid value for `{label}`: {value:?}")]
    InvalidValue { label: String, value: String },
}

impl Error {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Read { path: path.into(), source }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Write { path: path.into(), source }
    }

    /// True for load-time failures (bad or missing mapping data).
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Load(_))
    }
}
