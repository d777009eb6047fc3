//! Command implementations.
//!
//! Each command reads from a shared `EntryPointContext` and writes plain text
//! (or JSON for `show`) to the given writer.

use anyhow::{Context, Result};
use epregistry::{
    EntryPoint, EntryPointContext, EntryPointFilter, GroupedEntryPoints, SearchOptions,
    StaticLoader,
};
use std::io::Write;
use std::sync::Arc;

fn describe(ep: &EntryPoint) -> String {
    match ep.dist() {
        Some(dist) => format!("{} = {} ({} {})", ep.name(), ep.value(), dist.name, dist.version),
        None => format!("{} = {}", ep.name(), ep.value()),
    }
}

/// Print every entry point of one group, followed by a total.
pub fn list(context: &Arc<EntryPointContext>, group: &str, out: &mut impl Write) -> Result<()> {
    let registry = context.registry(group, StaticLoader::<()>::new());

    writeln!(out, "Entry points in group {group:?}:")?;
    for ep in &registry {
        writeln!(out, "- {}", describe(ep))?;
    }
    writeln!(out, "\nTotal: {}", registry.len())?;
    Ok(())
}

/// Print all group names.
pub fn groups(context: &EntryPointContext, out: &mut impl Write) -> Result<()> {
    for group in context.available_groups() {
        writeln!(out, "{group}")?;
    }
    Ok(())
}

/// Print all distributions that contribute entry points.
pub fn dists(context: &EntryPointContext, out: &mut impl Write) -> Result<()> {
    for dist in context.list_distributions() {
        writeln!(out, "{dist}")?;
    }
    Ok(())
}

/// Print the metadata of one entry point as JSON.
pub fn show(
    context: &Arc<EntryPointContext>,
    group: &str,
    name: &str,
    out: &mut impl Write,
) -> Result<()> {
    let registry = context.registry(group, StaticLoader::<()>::new());
    let metadata = registry.get_metadata(name)?;
    let json = serde_json::to_string_pretty(&metadata).context("Failed to encode metadata")?;
    writeln!(out, "{json}")?;
    Ok(())
}

/// Print entries matching wildcard patterns.
pub fn filter(
    context: &EntryPointContext,
    filter: &EntryPointFilter,
    out: &mut impl Write,
) -> Result<()> {
    print_grouped(&context.filter_entry_points(filter), out)
}

/// Print entries containing a query string.
pub fn search(
    context: &EntryPointContext,
    query: &str,
    options: SearchOptions,
    out: &mut impl Write,
) -> Result<()> {
    print_grouped(&context.search_entry_points(query, options), out)
}

/// Print the distributions that provide a package.
pub fn owners(context: &EntryPointContext, package: &str, out: &mut impl Write) -> Result<()> {
    let owners = context.package_to_distributions(package);
    if owners.is_empty() {
        anyhow::bail!("No distribution provides package {package:?}");
    }
    for dist in owners {
        writeln!(out, "{dist}")?;
    }
    Ok(())
}

/// Print the top-level packages of a distribution.
pub fn packages(
    context: &EntryPointContext,
    distribution: &str,
    out: &mut impl Write,
) -> Result<()> {
    let packages = context.distribution_to_packages(distribution);
    if packages.is_empty() {
        anyhow::bail!("No packages known for distribution {distribution:?}");
    }
    for package in packages {
        writeln!(out, "{package}")?;
    }
    Ok(())
}

fn print_grouped(result: &GroupedEntryPoints, out: &mut impl Write) -> Result<()> {
    if result.is_empty() {
        writeln!(out, "No matching entry points")?;
        return Ok(());
    }

    for (group, entries) in result {
        writeln!(out, "[{group}]")?;
        for ep in entries.values() {
            writeln!(out, "  {}", describe(ep))?;
        }
    }
    Ok(())
}
