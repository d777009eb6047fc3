//! Error types for distribution metadata.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading distribution metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Entry point value does not follow `module[:attr] [extras]`.
    #[error("Invalid entry point {name:?} in group {group:?}: {value:?}")]
    InvalidEntryPoint {
        name: String,
        group: String,
        value: String,
    },

    /// A metadata file is malformed.
    #[error("Invalid metadata in {path}: {reason}")]
    InvalidMetadata { path: PathBuf, reason: String },

    /// No distribution metadata at the given path.
    #[error("Distribution not found: {0}")]
    DistributionNotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for metadata operations.
pub type MetadataResult<T> = std::result::Result<T, MetadataError>;
