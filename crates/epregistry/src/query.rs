//! Filtering and searching across all groups of a snapshot.
//!
//! Both operations return the same shape as the snapshot (group, then name)
//! and leave out groups that end up with no entries.

use crate::cache::{EntryPointCache, GroupEntries, GroupedEntryPoints};
use crate::pattern::wildcard_match;
use std::collections::BTreeSet;

/// Wildcard criteria for `filter_entry_points`.
///
/// Every set pattern must match. An unset or empty pattern matches
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPointFilter {
    /// Pattern for the group name.
    pub group: Option<String>,

    /// Pattern for the owning distribution name. Entries without a
    /// distribution never match a set pattern.
    pub distribution: Option<String>,

    /// Pattern for the entry point name.
    pub name: Option<String>,
}

impl EntryPointFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(mut self, pattern: impl Into<String>) -> Self {
        self.group = Some(pattern.into());
        self
    }

    pub fn distribution(mut self, pattern: impl Into<String>) -> Self {
        self.distribution = Some(pattern.into());
        self
    }

    pub fn name(mut self, pattern: impl Into<String>) -> Self {
        self.name = Some(pattern.into());
        self
    }
}

fn active(pattern: &Option<String>) -> Option<&str> {
    pattern.as_deref().filter(|p| !p.is_empty())
}

/// Select entries matching every pattern in `filter`.
pub fn filter_entry_points(
    cache: &EntryPointCache,
    filter: &EntryPointFilter,
) -> GroupedEntryPoints {
    let group_pattern = active(&filter.group);
    let dist_pattern = active(&filter.distribution);
    let name_pattern = active(&filter.name);

    let mut result = GroupedEntryPoints::new();

    for (group_name, entries) in cache.groups() {
        if group_pattern.is_some_and(|p| !wildcard_match(group_name, p)) {
            continue;
        }

        let filtered: GroupEntries = entries
            .iter()
            .filter(|(_, ep)| match dist_pattern {
                Some(p) => ep.dist_name().is_some_and(|dist| wildcard_match(dist, p)),
                None => true,
            })
            .filter(|(name, _)| name_pattern.map_or(true, |p| wildcard_match(name, p)))
            .map(|(name, ep)| (name.clone(), ep.clone()))
            .collect();

        if !filtered.is_empty() {
            result.insert(group_name.clone(), filtered);
        }
    }

    result
}

/// Which fields `search_entry_points` looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// A matching group name selects every entry of that group.
    pub groups: bool,
    pub names: bool,
    pub distributions: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            groups: true,
            names: true,
            distributions: true,
        }
    }
}

impl SearchOptions {
    /// Search entry point names only.
    pub fn names_only() -> Self {
        Self {
            groups: false,
            names: true,
            distributions: false,
        }
    }
}

/// Select entries whose group, name, or distribution contains `query`,
/// ignoring case.
pub fn search_entry_points(
    cache: &EntryPointCache,
    query: &str,
    options: SearchOptions,
) -> GroupedEntryPoints {
    let query = query.to_lowercase();
    let contains = |text: &str| text.to_lowercase().contains(&query);

    let mut result = GroupedEntryPoints::new();

    for (group_name, entries) in cache.groups() {
        let group_matches = options.groups && contains(group_name.as_str());

        let matching: GroupEntries = entries
            .iter()
            .filter(|(name, ep)| {
                group_matches
                    || (options.names && contains(name.as_str()))
                    || (options.distributions && ep.dist_name().is_some_and(contains))
            })
            .map(|(name, ep)| (name.clone(), ep.clone()))
            .collect();

        if !matching.is_empty() {
            result.insert(group_name.clone(), matching);
        }
    }

    result
}

/// Names of every distribution that contributes an entry point.
pub fn list_distributions(cache: &EntryPointCache) -> BTreeSet<String> {
    cache
        .iter()
        .filter_map(|ep| ep.dist_name())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use epregistry_metadata::{Distribution, EntryPoint};

    fn cache() -> EntryPointCache {
        let with_dist = Distribution::new("rich-cli", "1.8")
            .with_entry_point("console_scripts", "rich", "rich_cli:run")
            .with_entry_point("pygments.styles", "rich", "rich_cli.style:Style");
        let other = Distribution::new("Sphinx", "7.2")
            .with_entry_point("console_scripts", "sphinx-build", "sphinx.cmd.build:main")
            .with_entry_point("sphinx.builders", "html", "sphinx.builders.html");
        EntryPointCache::from_distributions(&[with_dist, other])
    }

    fn keys(result: &GroupedEntryPoints) -> Vec<(String, Vec<String>)> {
        result
            .iter()
            .map(|(g, eps)| (g.clone(), eps.keys().cloned().collect()))
            .collect()
    }

    #[test]
    fn test_filter_no_criteria_returns_everything() {
        let cache = cache();
        let result = filter_entry_points(&cache, &EntryPointFilter::new());
        assert_eq!(result, *cache.groups());

        let empty = EntryPointFilter::new().group("").name("");
        assert_eq!(filter_entry_points(&cache, &empty), *cache.groups());
    }

    #[test]
    fn test_filter_group_glob() {
        let result = filter_entry_points(&cache(), &EntryPointFilter::new().group("CONSOLE_*"));
        assert_eq!(
            keys(&result),
            [(
                "console_scripts".to_string(),
                vec!["rich".to_string(), "sphinx-build".to_string()]
            )]
        );
    }

    #[test]
    fn test_filter_drops_empty_groups() {
        let filter = EntryPointFilter::new().distribution("sphinx").name("s*");
        let result = filter_entry_points(&cache(), &filter);
        assert_eq!(
            keys(&result),
            [("console_scripts".to_string(), vec!["sphinx-build".to_string()])]
        );
    }

    #[test]
    fn test_filter_distribution_excludes_orphans() {
        let orphan = EntryPoint::new("loose", "loose:main", "console_scripts");
        let mut groups = cache().groups().clone();
        groups["console_scripts"].insert("loose".to_string(), orphan);
        let cache = EntryPointCache::from_groups(groups);

        let all = filter_entry_points(&cache, &EntryPointFilter::new().name("loose"));
        assert_eq!(all["console_scripts"].len(), 1);

        let with_dist = EntryPointFilter::new().distribution("*").name("loose");
        assert!(filter_entry_points(&cache, &with_dist).is_empty());
    }

    #[test]
    fn test_search_names_only() {
        let result = search_entry_points(&cache(), "RICH", SearchOptions::names_only());
        assert_eq!(
            keys(&result),
            [
                ("console_scripts".to_string(), vec!["rich".to_string()]),
                ("pygments.styles".to_string(), vec!["rich".to_string()]),
            ]
        );

        let by_dist_only = search_entry_points(&cache(), "cli", SearchOptions::names_only());
        assert!(by_dist_only.is_empty());
    }

    #[test]
    fn test_search_group_selects_whole_group() {
        let options = SearchOptions {
            groups: true,
            names: false,
            distributions: false,
        };
        let result = search_entry_points(&cache(), "console", options);
        assert_eq!(result["console_scripts"].len(), 2);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_search_distribution() {
        let result = search_entry_points(&cache(), "sphinx", SearchOptions::default());
        assert_eq!(
            keys(&result),
            [
                ("console_scripts".to_string(), vec!["sphinx-build".to_string()]),
                ("sphinx.builders".to_string(), vec!["html".to_string()]),
            ]
        );
    }

    #[test]
    fn test_list_distributions() {
        let dists = list_distributions(&cache());
        assert_eq!(
            dists.into_iter().collect::<Vec<_>>(),
            ["Sphinx".to_string(), "rich-cli".to_string()]
        );
    }
}
