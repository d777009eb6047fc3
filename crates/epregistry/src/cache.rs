//! The grouped entry point snapshot.

use epregistry_metadata::{Distribution, EntryPoint};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// Entry points of one group, keyed by name in enumeration order.
pub type GroupEntries = IndexMap<String, EntryPoint>;

/// Entry points keyed by group, then by name.
pub type GroupedEntryPoints = IndexMap<String, GroupEntries>;

/// An immutable snapshot of all entry points, bucketed by group and name.
#[derive(Debug, Clone, Default)]
pub struct EntryPointCache {
    groups: GroupedEntryPoints,
}

impl EntryPointCache {
    /// Build the snapshot from distributions in search order.
    ///
    /// A distribution whose normalized name was already seen contributes
    /// nothing. Within the snapshot a repeated `(group, name)` pair keeps the
    /// position of its first occurrence but the value of its last.
    pub fn from_distributions(distributions: &[Distribution]) -> Self {
        let mut groups = GroupedEntryPoints::new();
        let mut seen = HashSet::new();

        for dist in distributions {
            if !seen.insert(dist.info().normalized_name()) {
                debug!(
                    "Skipping shadowed distribution {} {} at {:?}",
                    dist.name(),
                    dist.version(),
                    dist.path()
                );
                continue;
            }

            for entry_point in dist.entry_points() {
                let group = groups.entry(entry_point.group().to_string()).or_default();
                let name = entry_point.name().to_string();
                if let Some(previous) = group.insert(name, entry_point.clone()) {
                    debug!(
                        "Entry point {} in group {} from {:?} replaced by {:?}",
                        previous.name(),
                        previous.group(),
                        previous.dist_name(),
                        entry_point.dist_name()
                    );
                }
            }
        }

        Self { groups }
    }

    /// Wrap an already grouped mapping.
    pub fn from_groups(groups: GroupedEntryPoints) -> Self {
        Self { groups }
    }

    /// All groups with their entries.
    pub fn groups(&self) -> &GroupedEntryPoints {
        &self.groups
    }

    /// Entries of one group, if the group has any.
    pub fn group(&self, group: &str) -> Option<&GroupEntries> {
        self.groups.get(group)
    }

    /// Number of groups in the snapshot.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of entry points across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(IndexMap::len).sum()
    }

    /// Iterate over every entry point in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &EntryPoint> {
        self.groups.values().flat_map(IndexMap::values)
    }
}
