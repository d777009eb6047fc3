//! Mapping between importable packages and the distributions that ship them.

use epregistry_metadata::{normalize_name, Distribution};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

/// Both directions of the package to distribution relation.
///
/// Shadowed distributions (a normalized name seen earlier in search order)
/// are left out, matching the entry point snapshot.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    package_to_dists: IndexMap<String, IndexSet<String>>,
    dist_to_packages: IndexMap<String, IndexSet<String>>,
}

impl PackageIndex {
    pub fn from_distributions(distributions: &[Distribution]) -> Self {
        let mut index = Self::default();
        let mut seen = HashSet::new();

        for dist in distributions {
            let key = dist.info().normalized_name();
            if !seen.insert(key.clone()) {
                continue;
            }

            let members = index.dist_to_packages.entry(key).or_default();
            for package in dist.packages() {
                members.insert(package.clone());
                index
                    .package_to_dists
                    .entry(package.clone())
                    .or_default()
                    .insert(dist.name().to_string());
            }
        }

        index
    }

    /// Distributions providing `package`, in enumeration order.
    pub fn package_to_distributions(&self, package: &str) -> Vec<String> {
        self.package_to_dists
            .get(package)
            .map(|dists| dists.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The first distribution providing `package`.
    pub fn package_to_distribution(&self, package: &str) -> Option<String> {
        self.package_to_dists
            .get(package)
            .and_then(|dists| dists.first())
            .cloned()
    }

    /// Top-level packages of a distribution, matched by normalized name.
    pub fn distribution_to_packages(&self, distribution: &str) -> Vec<String> {
        self.dist_to_packages
            .get(&normalize_name(distribution))
            .map(|packages| packages.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The first top-level package of a distribution.
    pub fn distribution_to_package(&self, distribution: &str) -> Option<String> {
        self.dist_to_packages
            .get(&normalize_name(distribution))
            .and_then(|packages| packages.first())
            .cloned()
    }

    /// Number of distinct packages in the index.
    pub fn package_count(&self) -> usize {
        self.package_to_dists.len()
    }
}
