//! Library half of the `epregistry` command-line tool.

pub mod commands;
pub mod config;
