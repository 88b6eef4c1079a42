//! CLI argument definitions using clap derive API

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// sqlstep - run SQLite schema migration scripts
#[derive(Parser, Debug)]
#[command(name = "sqlstep")]
#[command(author, about, long_about = None)]
pub struct Cli {
    /// SQLite database file
    pub database: PathBuf,

    /// Migrations directory
    pub migrations: PathBuf,

    /// Version to migrate to (default: latest version)
    #[arg(long)]
    pub version: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output formats for the migration result
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable line
    Text,
    /// JSON summary
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
