//! Distribution discovery from search paths.
//!
//! Each search path is scanned for `*.dist-info` and `*.egg-info`
//! directories. Paths are scanned in order, and directory entries within a
//! path are visited in lexical order so enumeration is stable across runs.

use crate::distribution::{
    infer_packages_from_record, parse_entry_points, parse_metadata_headers, parse_top_level,
    Distribution,
};
use crate::entry_point::EntryPoint;
use crate::error::{MetadataError, MetadataResult};
use crate::source::MetadataSource;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DIST_INFO_SUFFIX: &str = ".dist-info";
const EGG_INFO_SUFFIX: &str = ".egg-info";

/// A metadata source backed by directories of installed distributions.
#[derive(Debug, Clone, Default)]
pub struct SitePackages {
    paths: Vec<PathBuf>,
}

impl SitePackages {
    /// Create a source scanning the given directories in order.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a source from an OS path list stored in an environment variable.
    ///
    /// An unset variable yields a source with no search paths.
    pub fn from_env(var: &str) -> Self {
        let paths = std::env::var_os(var)
            .map(|value| std::env::split_paths(&value).collect())
            .unwrap_or_default();
        Self { paths }
    }

    /// Append a search path.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl MetadataSource for SitePackages {
    fn distributions(&self) -> Vec<Distribution> {
        let mut distributions = Vec::new();

        for dir in &self.paths {
            debug!("Scanning search path: {:?}", dir);
            discover_in_directory(dir, &mut distributions);
        }

        info!("Discovered {} distributions", distributions.len());
        distributions
    }
}

/// Discover distributions in a single search path.
pub fn discover_in_directory(dir: &Path, distributions: &mut Vec<Distribution>) {
    if !dir.exists() {
        return;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("Failed to read search path {:?}: {}", dir, e);
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && is_metadata_dir(path))
        .collect();
    paths.sort();

    for path in paths {
        match discover_distribution(&path) {
            Ok(dist) => {
                debug!(
                    "Discovered distribution: {} {} at {:?}",
                    dist.name(),
                    dist.version(),
                    path
                );
                distributions.push(dist);
            }
            Err(e) => {
                warn!("Failed to read distribution metadata from {:?}: {}", path, e);
            }
        }
    }
}

fn is_metadata_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(DIST_INFO_SUFFIX) || name.ends_with(EGG_INFO_SUFFIX))
}

/// Read a single distribution from its metadata directory.
pub fn discover_distribution(path: &Path) -> MetadataResult<Distribution> {
    if !path.is_dir() {
        return Err(MetadataError::DistributionNotFound(path.to_path_buf()));
    }

    let metadata = match read_optional(&path.join("METADATA"))? {
        Some(content) => Some(content),
        None => read_optional(&path.join("PKG-INFO"))?,
    };
    let headers = metadata
        .map(|content| parse_metadata_headers(&content))
        .unwrap_or_default();

    let (stem_name, stem_version) = split_dir_stem(path);
    let name = headers
        .0
        .or(stem_name)
        .ok_or_else(|| MetadataError::InvalidMetadata {
            path: path.to_path_buf(),
            reason: "no Name header and no name in directory".to_string(),
        })?;
    let version = headers.1.or(stem_version).unwrap_or_default();

    let packages = match read_optional(&path.join("top_level.txt"))? {
        Some(content) => parse_top_level(&content),
        None => read_optional(&path.join("RECORD"))?
            .map(|content| infer_packages_from_record(&content))
            .unwrap_or_default(),
    };

    let mut dist = Distribution::new(name, version)
        .with_path(path)
        .with_packages(packages);

    let entry_points_path = path.join("entry_points.txt");
    if let Some(content) = read_optional(&entry_points_path)? {
        for (group, name, value) in parse_entry_points(&content, &entry_points_path) {
            let entry_point = EntryPoint::new(name, value, group);
            if !entry_point.is_well_formed() {
                warn!(
                    "Malformed entry point {} = {} in {:?}",
                    entry_point.name(),
                    entry_point.value(),
                    entry_points_path
                );
            }
            dist.push_entry_point(entry_point);
        }
    }

    Ok(dist)
}

fn read_optional(path: &Path) -> MetadataResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Split `{name}-{version}.dist-info` into its name and version parts.
fn split_dir_stem(path: &Path) -> (Option<String>, Option<String>) {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return (None, None);
    };

    match stem.split_once('-') {
        Some((name, version)) => (Some(name.to_string()), Some(version.to_string())),
        None if !stem.is_empty() => (Some(stem.to_string()), None),
        None => (None, None),
    }
}
