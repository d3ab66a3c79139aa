//! Error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by a [`crate::DocumentStore`].
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    /// Reading the document failed.
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    /// Writing the document failed.
    Write {
        /// Path that was being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// The I/O error behind this failure.
    pub fn io(&self) -> &std::io::Error {
        match self {
            StorageError::Read { source, .. } | StorageError::Write { source, .. } => source,
        }
    }

    /// Returns `true` if the error means the file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        self.io().kind() == std::io::ErrorKind::NotFound
    }
}

#[derive(Debug, Error)]
/// Errors produced by a [`crate::Searcher`].
pub enum SearchError {
    #[error("Invalid pattern: {0}")]
    /// The query failed to compile as a regex.
    InvalidPattern(#[from] regex::Error),
}

#[derive(Debug, Error)]
/// Errors produced while loading an [`crate::EditorConfig`].
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    /// The config file could not be read.
    Read {
        /// Config file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    /// The config file is not valid TOML or has unknown/mistyped keys.
    Parse(#[from] toml::de::Error),
}
