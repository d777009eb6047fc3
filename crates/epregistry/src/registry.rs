//! Per-group registry views.
//!
//! A registry holds no entry points of its own. Every accessor reads the
//! group's slice of the shared context snapshot, which is an empty map when
//! the group has no entries.

use crate::cache::GroupEntries;
use crate::context::EntryPointContext;
use crate::error::{RegistryError, RegistryResult};
use crate::loader::{Loader, Located};
use epregistry_metadata::EntryPoint;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Something a registry can be asked whether it contains.
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'a> {
    /// Match an entry point name.
    Name(&'a str),
    /// Match an entry point equal to this one.
    EntryPoint(&'a EntryPoint),
}

impl<'a> From<&'a str> for Lookup<'a> {
    fn from(name: &'a str) -> Self {
        Lookup::Name(name)
    }
}

impl<'a> From<&'a String> for Lookup<'a> {
    fn from(name: &'a String) -> Self {
        Lookup::Name(name)
    }
}

impl<'a> From<&'a EntryPoint> for Lookup<'a> {
    fn from(entry_point: &'a EntryPoint) -> Self {
        Lookup::EntryPoint(entry_point)
    }
}

/// Descriptive metadata for one entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPointMetadata {
    pub module: String,
    pub attr: Option<String>,
    /// Owning distribution name.
    pub dist: Option<String>,
    /// Owning distribution version.
    pub version: Option<String>,
}

/// A view over one entry point group.
///
/// `L` decides what loading an entry point produces.
pub struct EntryPointRegistry<L> {
    group: String,
    context: Arc<EntryPointContext>,
    loader: L,
    empty: GroupEntries,
}

impl<L> EntryPointRegistry<L> {
    /// Create a registry for `group`.
    ///
    /// The group is recorded on the context so it is listed by
    /// `available_groups` even when it has no entries.
    pub fn new(context: Arc<EntryPointContext>, group: impl Into<String>, loader: L) -> Self {
        let group = group.into();
        context.touch_group(&group);
        Self {
            group,
            context,
            loader,
            empty: GroupEntries::new(),
        }
    }

    /// The group this registry manages.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The loader used by `load` and `load_all`.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// The context whose snapshot this registry reads.
    pub fn context(&self) -> &Arc<EntryPointContext> {
        &self.context
    }

    fn entries(&self) -> &GroupEntries {
        self.context.cache().group(&self.group).unwrap_or(&self.empty)
    }

    /// Get an entry point by name.
    pub fn get(&self, name: &str) -> Option<&EntryPoint> {
        self.entries().get(name)
    }

    /// Get an entry point by name, failing if it is absent.
    pub fn lookup(&self, name: &str) -> RegistryResult<&EntryPoint> {
        self.get(name).ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
            group: self.group.clone(),
        })
    }

    /// Entry point names in enumeration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries().keys().map(String::as_str).collect()
    }

    /// Iterate over the group's entry points.
    pub fn iter(&self) -> indexmap::map::Values<'_, String, EntryPoint> {
        self.entries().values()
    }

    /// Number of entry points in the group.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Check for a name, or for an entry point equal to a given one.
    pub fn contains<'a>(&self, key: impl Into<Lookup<'a>>) -> bool {
        match key.into() {
            Lookup::Name(name) => self.entries().contains_key(name),
            Lookup::EntryPoint(entry_point) => self.iter().any(|ep| ep == entry_point),
        }
    }

    /// All entry points of the group, keyed by name.
    pub fn get_all(&self) -> &GroupEntries {
        self.entries()
    }

    /// Module, attribute, and owning distribution of an entry point.
    ///
    /// Fails with `Malformed` when the entry point's value cannot be split
    /// into a module and attribute.
    pub fn get_metadata(&self, name: &str) -> RegistryResult<EntryPointMetadata> {
        let ep = self.lookup(name)?;
        let (Ok(module), Ok(attr)) = (ep.module(), ep.attr()) else {
            return Err(RegistryError::Malformed {
                name: name.to_string(),
                group: self.group.clone(),
                value: ep.value().to_string(),
            });
        };

        Ok(EntryPointMetadata {
            module: module.to_string(),
            attr: attr.map(str::to_string),
            dist: ep.dist().map(|d| d.name.clone()),
            version: ep.dist().map(|d| d.version.clone()),
        })
    }
}

impl<L: Loader> EntryPointRegistry<L> {
    /// Load an entry point by name.
    ///
    /// Returns `Ok(None)` for an unknown name. Loader failures are returned
    /// unchanged.
    pub fn load(&self, name: &str) -> Result<Option<L::Output>, L::Error> {
        match self.get(name) {
            Some(ep) => {
                debug!("Loading entry point {} from group {}", name, self.group);
                self.loader.load(ep).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Load every entry point of the group, stopping at the first failure.
    pub fn load_all(&self) -> Result<IndexMap<String, L::Output>, L::Error> {
        self.entries()
            .iter()
            .map(|(name, ep)| self.loader.load(ep).map(|value| (name.clone(), value)))
            .collect()
    }
}

impl<L> EntryPointRegistry<L>
where
    L: Loader,
    L::Output: Located,
{
    /// Directory containing the file a loaded entry point came from.
    ///
    /// # Panics
    ///
    /// Panics if no entry point is named `name`, or if the loaded object has
    /// no origin on disk.
    pub fn get_extension_point_dir(&self, name: &str) -> Result<PathBuf, L::Error> {
        let loaded = self.load(name)?;
        let loaded = loaded.unwrap_or_else(|| {
            panic!("no entry point named {name:?} in group {:?}", self.group)
        });
        let origin = loaded
            .origin()
            .unwrap_or_else(|| panic!("entry point {name:?} loaded an object with no origin"));

        let resolved = std::fs::canonicalize(origin).unwrap_or_else(|_| origin.to_path_buf());
        Ok(match resolved.parent() {
            Some(parent) => parent.to_path_buf(),
            None => resolved,
        })
    }
}

impl<'a, L> IntoIterator for &'a EntryPointRegistry<L> {
    type Item = &'a EntryPoint;
    type IntoIter = indexmap::map::Values<'a, String, EntryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticLoader;
    use epregistry_metadata::{Distribution, MemorySource};

    fn context() -> Arc<EntryPointContext> {
        EntryPointContext::shared(
            MemorySource::default()
                .with(
                    Distribution::new("pkgA", "1.0")
                        .with_entry_point("plugins", "a", "pkg_a:Plugin"),
                )
                .with(Distribution::new("pkgB", "2.0").with_entry_point("plugins", "b", "pkg_b"))
                .with(
                    Distribution::new("mixed", "0.1")
                        .with_entry_point("broken", "bad", "mixed-plugins:Bad"),
                ),
        )
    }

    fn registry() -> EntryPointRegistry<StaticLoader<&'static str>> {
        let loader = StaticLoader::new()
            .with("pkg_a:Plugin", "plugin-a")
            .with("pkg_b", "plugin-b");
        context().registry("plugins", loader)
    }

    #[test]
    fn test_get_and_lookup() {
        let registry = registry();
        assert_eq!(registry.get("a").unwrap().module().unwrap(), "pkg_a");
        assert!(registry.get("zzz").is_none());

        assert_eq!(registry.lookup("b").unwrap().name(), "b");
        assert_eq!(
            registry.lookup("zzz").unwrap_err(),
            RegistryError::NotFound {
                name: "zzz".to_string(),
                group: "plugins".to_string(),
            }
        );
    }

    #[test]
    fn test_views() {
        let registry = registry();
        assert_eq!(registry.group(), "plugins");
        assert_eq!(registry.names(), ["a", "b"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());

        let iterated: Vec<&str> = (&registry).into_iter().map(EntryPoint::name).collect();
        assert_eq!(iterated, ["a", "b"]);
        assert_eq!(registry.get_all().len(), 2);
    }

    #[test]
    fn test_contains_name_and_entry_point() {
        let registry = registry();
        assert!(registry.contains("a"));
        assert!(registry.contains(&"b".to_string()));
        assert!(!registry.contains("c"));

        let same = EntryPoint::new("a", "pkg_a:Plugin", "plugins");
        assert!(registry.contains(&same));

        let different_value = EntryPoint::new("a", "pkg_a:Other", "plugins");
        assert!(!registry.contains(&different_value));
    }

    #[test]
    fn test_load_and_load_all() {
        let registry = registry();
        assert_eq!(registry.load("a"), Ok(Some("plugin-a")));
        assert_eq!(registry.load("missing"), Ok(None));

        let all = registry.load_all().unwrap();
        assert_eq!(all["a"], "plugin-a");
        assert_eq!(all["b"], "plugin-b");
    }

    #[test]
    fn test_load_error_propagates() {
        let registry = context().registry("plugins", StaticLoader::<u8>::new());
        assert!(registry.load("a").is_err());
        assert!(registry.load_all().is_err());
    }

    #[test]
    fn test_get_metadata() {
        let registry = registry();
        let metadata = registry.get_metadata("a").unwrap();
        assert_eq!(
            metadata,
            EntryPointMetadata {
                module: "pkg_a".to_string(),
                attr: Some("Plugin".to_string()),
                dist: Some("pkgA".to_string()),
                version: Some("1.0".to_string()),
            }
        );

        assert_eq!(registry.get_metadata("b").unwrap().attr, None);
        assert!(matches!(
            registry.get_metadata("zzz"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_value_is_listed_but_not_loadable() {
        let registry = context().registry("broken", StaticLoader::<u8>::new());
        assert_eq!(registry.names(), ["bad"]);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("bad"));
        assert_eq!(registry.lookup("bad").unwrap().value(), "mixed-plugins:Bad");

        assert_eq!(
            registry.get_metadata("bad").unwrap_err(),
            RegistryError::Malformed {
                name: "bad".to_string(),
                group: "broken".to_string(),
                value: "mixed-plugins:Bad".to_string(),
            }
        );
        assert!(matches!(
            registry.load("bad"),
            Err(crate::loader::LoadError::Malformed { .. })
        ));
    }

    #[test]
    fn test_empty_group_is_empty_not_absent() {
        let context = context();
        let registry = context.registry("nothing_here", StaticLoader::<u8>::new());
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
        assert_eq!(registry.load("x"), Ok(None));
        assert_eq!(context.available_groups(), ["plugins", "broken", "nothing_here"]);
    }
}
