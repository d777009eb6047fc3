//! Distribution records and metadata file parsing.

use crate::entry_point::EntryPoint;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Name and version of an installed distribution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistributionInfo {
    /// Display name as declared in the metadata.
    pub name: String,

    /// Version string.
    pub version: String,
}

impl DistributionInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Normalized name used for identity comparisons.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// An installed distribution with its entry points and top-level packages.
#[derive(Debug, Clone)]
pub struct Distribution {
    info: Arc<DistributionInfo>,
    path: Option<PathBuf>,
    entry_points: Vec<EntryPoint>,
    packages: Vec<String>,
}

impl Distribution {
    /// Create a distribution with no entry points or packages.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: Arc::new(DistributionInfo::new(name, version)),
            path: None,
            entry_points: Vec::new(),
            packages: Vec::new(),
        }
    }

    /// Set the metadata directory this distribution was read from.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Declare an entry point owned by this distribution.
    pub fn with_entry_point(mut self, group: &str, name: &str, value: &str) -> Self {
        let entry_point = EntryPoint::new(name, value, group).with_dist(Arc::clone(&self.info));
        self.entry_points.push(entry_point);
        self
    }

    /// Declare top-level importable packages.
    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages.extend(packages.into_iter().map(Into::into));
        self
    }

    pub(crate) fn push_entry_point(&mut self, entry_point: EntryPoint) {
        self.entry_points
            .push(entry_point.with_dist(Arc::clone(&self.info)));
    }

    pub fn info(&self) -> &Arc<DistributionInfo> {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn version(&self) -> &str {
        &self.info.version
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }

    /// Top-level importable packages provided by this distribution.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }
}

/// Normalize a distribution name: lowercase, with runs of `-`, `_` and `.`
/// collapsed to a single `-`.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;

    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
                in_separator = true;
            }
        } else {
            normalized.extend(c.to_lowercase());
            in_separator = false;
        }
    }

    normalized
}

/// Read `Name` and `Version` from RFC 822 style metadata headers.
///
/// Parsing stops at the first blank line, where the description body begins.
pub fn parse_metadata_headers(content: &str) -> (Option<String>, Option<String>) {
    let mut name = None;
    let mut version = None;

    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if key.eq_ignore_ascii_case("name") && name.is_none() {
            name = Some(value.to_string());
        } else if key.eq_ignore_ascii_case("version") && version.is_none() {
            version = Some(value.to_string());
        }
    }

    (name, version)
}

/// Parse an `entry_points.txt` file into `(group, name, value)` triples.
///
/// Lines outside any section and lines without `=` are logged and skipped.
pub fn parse_entry_points(content: &str, origin: &Path) -> Vec<(String, String, String)> {
    let mut entries = Vec::new();
    let mut group: Option<&str> = None;

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            group = Some(section.trim());
            continue;
        }

        let (Some(group), Some((name, value))) = (group, line.split_once('=')) else {
            warn!(
                "Skipping malformed line {} in {:?}: {:?}",
                lineno + 1,
                origin,
                raw
            );
            continue;
        };

        entries.push((
            group.to_string(),
            name.trim().to_string(),
            value.trim().to_string(),
        ));
    }

    entries
}

/// Parse `top_level.txt`: one package name per line.
pub fn parse_top_level(content: &str) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !packages.iter().any(|p| p == line) {
            packages.push(line.to_string());
        }
    }
    packages
}

/// Infer top-level packages from a `RECORD` file.
///
/// Each record's path contributes its first component, or the module name
/// for files installed directly into the search path. Names that are not
/// importable (containing `.`) are dropped.
pub fn infer_packages_from_record(content: &str) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        let path = record_path(line);
        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let Some(first) = parts.next() else {
            continue;
        };

        let candidate = if parts.next().is_some() {
            first
        } else {
            module_name(first)
        };

        if !candidate.contains('.') && !packages.iter().any(|p| p == candidate) {
            packages.push(candidate.to_string());
        }
    }

    packages
}

/// First CSV column of a `RECORD` line.
fn record_path(line: &str) -> &str {
    if let Some(quoted) = line.strip_prefix('"') {
        return quoted.split('"').next().unwrap_or_default();
    }
    line.split(',').next().unwrap_or_default()
}

fn module_name(file: &str) -> &str {
    if let Some(stem) = file
        .strip_suffix(".py")
        .or_else(|| file.strip_suffix(".pyc"))
    {
        return stem;
    }
    if file.ends_with(".so") || file.ends_with(".pyd") {
        return file.split('.').next().unwrap_or(file);
    }
    file
}
