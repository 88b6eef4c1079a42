//! sqlstep CLI - incremental schema migrations for SQLite

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;

mod cli;

use cli::{Cli, OutputFormat};

/// Migration run summary for JSON output
#[derive(Debug, Serialize)]
struct RunSummary {
    database: String,
    version: u32,
    finished_at: DateTime<Utc>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        eprintln!(
            "[verbose] migrating {} using scripts in {}",
            cli.database.display(),
            cli.migrations.display()
        );
    }

    let version = sq_migrate::migrate(&cli.database, &cli.migrations, cli.version)
        .with_context(|| format!("migration of {} failed", cli.database.display()))?;

    match cli.format {
        OutputFormat::Text => {
            println!("{} is at version {}", cli.database.display(), version);
        }
        OutputFormat::Json => {
            let summary = RunSummary {
                database: cli.database.display().to_string(),
                version,
                finished_at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
