//! Error type shared by the config and cheat stores.
//!
//! Malformed lines are deliberately absent from this list: the parsers stop
//! reading at the first line they cannot classify and keep everything read
//! so far (see [`crate::config::ConfigDocument::parse_str`]).

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the fallible store operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file to load does not exist.
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// A file system I/O error occurred while reading or writing.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `save()` was called on a document that was not loaded from a file.
    #[error("document has no file path to save to")]
    NoPath,

    /// A section pattern is not a valid regular expression.
    #[error("invalid section pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A block, code, or option index is past the end of its list.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ConfigError {
    /// Wraps an I/O error, mapping `NotFound` to [`ConfigError::NotFound`].
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound { path }
        } else {
            ConfigError::Io { path, source }
        }
    }
}
