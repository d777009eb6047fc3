//! # epregistry-metadata
//!
//! Installed-distribution metadata for epregistry.
//!
//! This crate provides:
//! - The `EntryPoint` record and its `module:attr [extras]` value syntax
//! - Distribution metadata parsing (`METADATA`, `entry_points.txt`,
//!   `top_level.txt`, `RECORD`)
//! - Discovery of `*.dist-info` / `*.egg-info` directories on search paths
//! - The `MetadataSource` seam consumed by the registry cache
//!
//! ## Metadata Layout
//!
//! Each installed distribution is a directory named `{name}-{version}.dist-info`
//! (or `.egg-info`) containing:
//! - `METADATA` / `PKG-INFO` - RFC 822 headers with `Name` and `Version`
//! - `entry_points.txt` - INI sections, one per entry point group
//! - `top_level.txt` - importable top-level packages (optional)
//! - `RECORD` - installed file list, used when `top_level.txt` is absent

pub mod discovery;
pub mod distribution;
pub mod entry_point;
pub mod error;
pub mod source;

pub use discovery::{discover_distribution, SitePackages};
pub use distribution::{normalize_name, Distribution, DistributionInfo};
pub use entry_point::EntryPoint;
pub use error::{MetadataError, MetadataResult};
pub use source::{MemorySource, MetadataSource};
