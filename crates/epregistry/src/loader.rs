//! Resolving entry points to the objects they reference.
//!
//! The registry does not know how an entry point value maps to a live
//! object. A `Loader` supplies that, and its errors reach the caller as-is.

use epregistry_metadata::{EntryPoint, MetadataError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Turns an entry point into the object it references.
pub trait Loader {
    /// The loaded object type.
    type Output;

    /// Failure reported by the underlying loading mechanism.
    type Error;

    fn load(&self, entry_point: &EntryPoint) -> Result<Self::Output, Self::Error>;
}

impl<F, T, E> Loader for F
where
    F: Fn(&EntryPoint) -> Result<T, E>,
{
    type Output = T;
    type Error = E;

    fn load(&self, entry_point: &EntryPoint) -> Result<T, E> {
        self(entry_point)
    }
}

/// A loaded object that knows where it lives on disk.
pub trait Located {
    /// The file the object was loaded from, if it has one.
    fn origin(&self) -> Option<&Path>;
}

impl Located for PathBuf {
    fn origin(&self) -> Option<&Path> {
        Some(self)
    }
}

impl<T: Located + ?Sized> Located for Arc<T> {
    fn origin(&self) -> Option<&Path> {
        (**self).origin()
    }
}

/// Errors from `StaticLoader`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// No implementation registered for the entry point's target.
    #[error("Cannot resolve {target:?} for entry point {name:?} in group {group:?}")]
    Unresolved {
        target: String,
        name: String,
        group: String,
    },

    /// The entry point value does not follow `module[:attr] [extras]`.
    #[error("Entry point {name:?} in group {group:?} has malformed value {value:?}")]
    Malformed {
        value: String,
        name: String,
        group: String,
    },
}

/// A loader backed by a table of compiled-in implementations.
///
/// Implementations are keyed by `module:attr` (or just `module` for entry
/// points without an attribute). Extras are not part of the key.
#[derive(Debug, Clone)]
pub struct StaticLoader<T> {
    symbols: HashMap<String, T>,
}

impl<T> StaticLoader<T> {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
        }
    }

    /// Register an implementation for a target, builder style.
    pub fn with(mut self, target: impl Into<String>, value: T) -> Self {
        self.insert(target, value);
        self
    }

    /// Register an implementation, replacing any previous one for the target.
    pub fn insert(&mut self, target: impl Into<String>, value: T) -> Option<T> {
        self.symbols.insert(target.into(), value)
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no targets are registered.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<T> Default for StaticLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn target_of(entry_point: &EntryPoint) -> Result<String, LoadError> {
    let malformed = |_: MetadataError| LoadError::Malformed {
        value: entry_point.value().to_string(),
        name: entry_point.name().to_string(),
        group: entry_point.group().to_string(),
    };

    let module = entry_point.module().map_err(malformed)?;
    Ok(match entry_point.attr().map_err(malformed)? {
        Some(attr) => format!("{module}:{attr}"),
        None => module.to_string(),
    })
}

impl<T: Clone> Loader for StaticLoader<T> {
    type Output = T;
    type Error = LoadError;

    fn load(&self, entry_point: &EntryPoint) -> Result<T, LoadError> {
        let target = target_of(entry_point)?;
        match self.symbols.get(&target) {
            Some(value) => Ok(value.clone()),
            None => Err(LoadError::Unresolved {
                target,
                name: entry_point.name().to_string(),
                group: entry_point.group().to_string(),
            }),
        }
    }
}
