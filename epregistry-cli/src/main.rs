//! # epregistry
//!
//! Browse the entry points of installed distributions.
//!
//! ## Configuration
//!
//! Reads `$XDG_CONFIG_HOME/epregistry/config.toml` when present. Search paths
//! are scanned in this order: `--path` arguments, `search.paths` from the
//! config file, then the environment variable named by `search.env_var`
//! (default `EPREGISTRY_PATH`). Earlier paths shadow later ones.
//!
//! ## Running
//!
//! ```bash
//! # List console scripts in a virtualenv
//! epregistry --path .venv/lib/python3.12/site-packages list
//!
//! # Find every pytest plugin
//! RUST_LOG=debug epregistry filter --group pytest11
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use epregistry::{EntryPointContext, EntryPointFilter, SearchOptions};
use epregistry_cli::commands;
use epregistry_cli::config::Config;
use epregistry_metadata::SitePackages;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "epregistry", version, about = "Browse installed entry points")]
struct Cli {
    /// Configuration file (defaults to the XDG config location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra search path, scanned before configured paths (repeatable)
    #[arg(long = "path", global = true)]
    paths: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the entry points of one group
    List {
        /// Group name (defaults to display.default_group)
        group: Option<String>,
    },
    /// List all groups
    Groups,
    /// List distributions that contribute entry points
    Dists,
    /// Show metadata for one entry point as JSON
    Show { group: String, name: String },
    /// Filter entry points with wildcard patterns (`*`, `?`)
    Filter {
        #[arg(long)]
        group: Option<String>,
        #[arg(long = "dist")]
        distribution: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Search group, entry point, and distribution names
    Search {
        query: String,
        #[arg(long)]
        no_groups: bool,
        #[arg(long)]
        no_names: bool,
        #[arg(long)]
        no_dists: bool,
    },
    /// Distributions providing an importable package
    Owners { package: String },
    /// Top-level packages of a distribution
    Packages { distribution: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    // Logs go to stderr so stdout stays parseable.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let mut paths = cli.paths.clone();
    paths.extend(config.search_paths());
    info!("Searching {} paths for distributions", paths.len());

    let context = EntryPointContext::shared(SitePackages::new(paths));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List { group } => {
            let group = group.unwrap_or_else(|| config.display.default_group.clone());
            commands::list(&context, &group, &mut out)
        }
        Command::Groups => commands::groups(&context, &mut out),
        Command::Dists => commands::dists(&context, &mut out),
        Command::Show { group, name } => commands::show(&context, &group, &name, &mut out),
        Command::Filter {
            group,
            distribution,
            name,
        } => {
            let filter = EntryPointFilter {
                group,
                distribution,
                name,
            };
            commands::filter(&context, &filter, &mut out)
        }
        Command::Search {
            query,
            no_groups,
            no_names,
            no_dists,
        } => {
            let options = SearchOptions {
                groups: !no_groups,
                names: !no_names,
                distributions: !no_dists,
            };
            commands::search(&context, &query, options, &mut out)
        }
        Command::Owners { package } => commands::owners(&context, &package, &mut out),
        Command::Packages { distribution } => commands::packages(&context, &distribution, &mut out),
    }
}
