//! Entry point records.
//!
//! An entry point is a named registration inside a group whose value
//! references a loadable object using the `module[:attr] [extras]` syntax,
//! for example `black:patched_main` or `pkg.plugins:Exporter [fast, xml]`.
//!
//! Construction never fails. The raw value is kept as declared, and a value
//! that does not follow the syntax only surfaces as an error from the
//! accessors that need its parts.

use crate::distribution::DistributionInfo;
use crate::error::{MetadataError, MetadataResult};
use std::fmt;
use std::sync::Arc;

/// A single entry point declared by a distribution.
#[derive(Debug, Clone)]
pub struct EntryPoint {
    name: String,
    group: String,
    value: String,
    parsed: Option<ParsedValue>,
    dist: Option<Arc<DistributionInfo>>,
}

impl EntryPoint {
    /// Create an entry point from its declared name, value, and group.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            group: group.into(),
            parsed: parse_value(&value),
            value,
            dist: None,
        }
    }

    /// Attach the owning distribution.
    pub fn with_dist(mut self, dist: Arc<DistributionInfo>) -> Self {
        self.dist = Some(dist);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// The raw `module[:attr] [extras]` value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value follows the `module[:attr] [extras]` syntax.
    pub fn is_well_formed(&self) -> bool {
        self.parsed.is_some()
    }

    fn parsed(&self) -> MetadataResult<&ParsedValue> {
        self.parsed
            .as_ref()
            .ok_or_else(|| MetadataError::InvalidEntryPoint {
                name: self.name.clone(),
                group: self.group.clone(),
                value: self.value.clone(),
            })
    }

    /// Dotted module path.
    pub fn module(&self) -> MetadataResult<&str> {
        Ok(&self.parsed()?.module)
    }

    /// Attribute path within the module, if any.
    pub fn attr(&self) -> MetadataResult<Option<&str>> {
        Ok(self.parsed()?.attr.as_deref())
    }

    pub fn extras(&self) -> MetadataResult<&[String]> {
        Ok(&self.parsed()?.extras)
    }

    /// The distribution that declared this entry point.
    pub fn dist(&self) -> Option<&DistributionInfo> {
        self.dist.as_deref()
    }

    /// Name of the owning distribution, if known.
    pub fn dist_name(&self) -> Option<&str> {
        self.dist.as_ref().map(|d| d.name.as_str())
    }
}

// The owning distribution is a back-reference, not part of identity.
impl PartialEq for EntryPoint {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value && self.group == other.group
    }
}

impl Eq for EntryPoint {}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} [{}]", self.name, self.value, self.group)
    }
}

#[derive(Debug, Clone)]
struct ParsedValue {
    module: String,
    attr: Option<String>,
    extras: Vec<String>,
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn take_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn parse_value(value: &str) -> Option<ParsedValue> {
    let (module, rest) = take_while(value, |c| is_word(c) || c == '.');
    if module.is_empty() {
        return None;
    }
    let mut rest = rest.trim_start();

    let mut attr = None;
    if let Some(after_colon) = rest.strip_prefix(':') {
        let (name, tail) = take_while(after_colon.trim_start(), |c| is_word(c) || c == '.');
        if name.is_empty() {
            return None;
        }
        attr = Some(name.to_string());
        rest = tail.trim_start();
    }

    let mut extras = Vec::new();
    if rest.starts_with('[') {
        let inner = rest.trim_end().strip_suffix(']')?;
        extras = inner[1..]
            .split(|c: char| !is_word(c))
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();
    } else if !rest.is_empty() {
        return None;
    }

    Some(ParsedValue {
        module: module.to_string(),
        attr,
        extras,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_module_and_attr() {
        let ep = EntryPoint::new("black", "black:patched_main", "console_scripts");
        assert!(ep.is_well_formed());
        assert_eq!(ep.module().unwrap(), "black");
        assert_eq!(ep.attr().unwrap(), Some("patched_main"));
        assert!(ep.extras().unwrap().is_empty());
        assert!(ep.dist().is_none());
    }

    #[test]
    fn test_parse_module_only() {
        let ep = EntryPoint::new("ext", "pkg.sub.ext", "plugins");
        assert_eq!(ep.module().unwrap(), "pkg.sub.ext");
        assert_eq!(ep.attr().unwrap(), None);
    }

    #[test]
    fn test_parse_extras_and_whitespace() {
        let ep = EntryPoint::new("x", "pkg.mod : Obj.attr [fast, xml] ", "g");
        assert_eq!(ep.module().unwrap(), "pkg.mod");
        assert_eq!(ep.attr().unwrap(), Some("Obj.attr"));
        assert_eq!(ep.extras().unwrap(), ["fast", "xml"]);
    }

    #[test]
    fn test_malformed_values_fail_on_access() {
        for value in ["", "pkg:", "pkg mod", "pkg [unclosed", "my-plugins:Bad"] {
            let ep = EntryPoint::new("x", value, "g");
            assert!(!ep.is_well_formed(), "{value:?} should be malformed");
            assert!(ep.module().is_err());
            assert!(ep.attr().is_err());
            assert!(ep.extras().is_err());
            assert_eq!(ep.value(), value);
        }

        let err = EntryPoint::new("bad", "-nope", "grp").module().unwrap_err();
        assert!(err.to_string().contains("\"bad\""));
        assert!(err.to_string().contains("\"grp\""));
        assert!(err.to_string().contains("\"-nope\""));
    }

    #[test]
    fn test_equality_ignores_dist() {
        let dist = Arc::new(DistributionInfo::new("pkgA", "1.0"));
        let a = EntryPoint::new("a", "pkg_a:main", "plugins");
        let b = a.clone().with_dist(dist);
        assert_eq!(a, b);
        assert_eq!(b.dist_name(), Some("pkgA"));

        let c = EntryPoint::new("a", "pkg_a:other", "plugins");
        assert_ne!(a, c);

        let malformed = EntryPoint::new("a", "not valid", "plugins");
        assert_eq!(malformed, malformed.clone());
    }
}
