//! # epregistry
//!
//! Cached, group-scoped access to installed entry points.
//!
//! This crate provides:
//! - `EntryPointContext`, a one-shot snapshot of every entry point and of the
//!   package to distribution mapping exposed by a `MetadataSource`
//! - `EntryPointRegistry`, a view over one entry point group with lookup,
//!   membership, metadata, and loading through a `Loader`
//! - Wildcard filtering and substring search across all groups
//!
//! ## Snapshots
//!
//! The context scans its source at most once for entry points and at most
//! once for packages, on first use. Later changes to the installed
//! environment are not observed by the same context.
//!
//! ## Example
//!
//! ```
//! use epregistry::{EntryPointContext, StaticLoader};
//! use epregistry_metadata::{Distribution, MemorySource};
//!
//! let source = MemorySource::default()
//!     .with(Distribution::new("pkgA", "1.0").with_entry_point("plugins", "a", "pkg_a:Plugin"));
//! let context = EntryPointContext::shared(source);
//!
//! let loader = StaticLoader::new().with("pkg_a:Plugin", 42u32);
//! let registry = context.registry("plugins", loader);
//!
//! assert!(registry.contains("a"));
//! assert_eq!(registry.load("a").unwrap(), Some(42));
//! assert_eq!(registry.load("missing").unwrap(), None);
//! ```

pub mod cache;
pub mod context;
pub mod error;
pub mod loader;
pub mod packages;
pub mod pattern;
pub mod query;
pub mod registry;

pub use cache::{EntryPointCache, GroupEntries, GroupedEntryPoints};
pub use context::EntryPointContext;
pub use error::{RegistryError, RegistryResult};
pub use loader::{LoadError, Loader, Located, StaticLoader};
pub use packages::PackageIndex;
pub use pattern::wildcard_match;
pub use query::{EntryPointFilter, SearchOptions};
pub use registry::{EntryPointMetadata, EntryPointRegistry, Lookup};

pub use epregistry_metadata::{Distribution, DistributionInfo, EntryPoint, MetadataSource};
