//! The shared snapshot context.
//!
//! An `EntryPointContext` owns a `MetadataSource` and two lazily built
//! snapshots: the grouped entry points and the package index. Each snapshot
//! is built at most once, behind a `OnceLock`, so concurrent first access
//! never scans the source twice. Reads after that take no lock.

use crate::cache::{EntryPointCache, GroupedEntryPoints};
use crate::packages::PackageIndex;
use crate::query::{self, EntryPointFilter, SearchOptions};
use crate::registry::EntryPointRegistry;
use epregistry_metadata::MetadataSource;
use indexmap::IndexSet;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, info};

/// Process-wide view of installed entry points and packages.
pub struct EntryPointContext {
    source: Box<dyn MetadataSource>,
    entry_points: OnceLock<EntryPointCache>,
    packages: OnceLock<PackageIndex>,
    /// Groups named by registries, in the order they were first named.
    touched: Mutex<IndexSet<String>>,
}

impl EntryPointContext {
    /// Create a context over `source`. Nothing is scanned until first use.
    pub fn new(source: impl MetadataSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            entry_points: OnceLock::new(),
            packages: OnceLock::new(),
            touched: Mutex::new(IndexSet::new()),
        }
    }

    /// Create a context ready to be shared between registries.
    pub fn shared(source: impl MetadataSource + 'static) -> Arc<Self> {
        Arc::new(Self::new(source))
    }

    /// The entry point snapshot, built on first call.
    pub fn cache(&self) -> &EntryPointCache {
        self.entry_points.get_or_init(|| {
            debug!("Building entry point cache");
            let cache = EntryPointCache::from_distributions(&self.source.distributions());
            info!(
                "Cached {} entry points across {} groups",
                cache.entry_count(),
                cache.group_count()
            );
            cache
        })
    }

    /// The package index, built on first call.
    pub fn package_index(&self) -> &PackageIndex {
        self.packages.get_or_init(|| {
            debug!("Building package index");
            let index = PackageIndex::from_distributions(&self.source.distributions());
            info!("Indexed {} top-level packages", index.package_count());
            index
        })
    }

    /// Create a registry for `group` that loads through `loader`.
    pub fn registry<L>(
        self: &Arc<Self>,
        group: impl Into<String>,
        loader: L,
    ) -> EntryPointRegistry<L> {
        EntryPointRegistry::new(Arc::clone(self), group, loader)
    }

    pub(crate) fn touch_group(&self, group: &str) {
        let mut touched = self.touched.lock().unwrap_or_else(PoisonError::into_inner);
        if !touched.contains(group) {
            touched.insert(group.to_string());
        }
    }

    /// Group names in the snapshot, then any empty groups named by registries.
    pub fn available_groups(&self) -> Vec<String> {
        let cache = self.cache();
        let mut groups: Vec<String> = cache.groups().keys().cloned().collect();

        let touched = self.touched.lock().unwrap_or_else(PoisonError::into_inner);
        groups.extend(
            touched
                .iter()
                .filter(|group| cache.group(group).is_none())
                .cloned(),
        );

        groups
    }

    /// Entries matching every pattern in `filter`, grouped.
    pub fn filter_entry_points(&self, filter: &EntryPointFilter) -> GroupedEntryPoints {
        query::filter_entry_points(self.cache(), filter)
    }

    /// Entries containing `query` in the fields selected by `options`.
    pub fn search_entry_points(&self, query: &str, options: SearchOptions) -> GroupedEntryPoints {
        query::search_entry_points(self.cache(), query, options)
    }

    /// Unique names of distributions that contribute entry points.
    pub fn list_distributions(&self) -> BTreeSet<String> {
        query::list_distributions(self.cache())
    }

    /// Distributions providing the top-level package `package`.
    pub fn package_to_distributions(&self, package: &str) -> Vec<String> {
        self.package_index().package_to_distributions(package)
    }

    /// First distribution in enumeration order that provides `package`.
    pub fn package_to_distribution(&self, package: &str) -> Option<String> {
        self.package_index().package_to_distribution(package)
    }

    /// Top-level packages of `distribution`, matched by normalized name.
    pub fn distribution_to_packages(&self, distribution: &str) -> Vec<String> {
        self.package_index().distribution_to_packages(distribution)
    }

    /// First top-level package of `distribution`.
    pub fn distribution_to_package(&self, distribution: &str) -> Option<String> {
        self.package_index().distribution_to_package(distribution)
    }
}
