//! Error types for registry lookups.

use thiserror::Error;

/// Errors raised by strict registry lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No entry point with this name in the group.
    #[error("No entry point named {name:?} found in group {group:?}")]
    NotFound { name: String, group: String },

    /// The entry point exists but its value does not follow
    /// `module[:attr] [extras]`.
    #[error("Entry point {name:?} in group {group:?} has malformed value {value:?}")]
    Malformed {
        name: String,
        group: String,
        value: String,
    },
}

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
