//! CLI for cexport.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cexport_core::analysis::STATION_INFORMATION_URL;
use cexport_core::config;
use std::path::PathBuf;

use commands::{run_checksum, run_export, run_stats, ExportArgs, StatsArgs};

/// Top-level CLI for cexport.
#[derive(Debug, Parser)]
#[command(name = "cexport")]
#[command(about = "Export the private course list to data.txt", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the course list and save it as data.txt.
    Export {
        /// Origin of the API (overrides `base_url` from config).
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Session `Cookie` header value (overrides config).
        #[arg(long, value_name = "VALUE", conflicts_with = "har")]
        cookie: Option<String>,

        /// HAR capture of a logged-in session to take the cookie from.
        #[arg(long, value_name = "PATH")]
        har: Option<PathBuf>,

        /// Directory to save data.txt into (default: config, then current dir).
        #[arg(long, value_name = "DIR", conflicts_with = "stdout")]
        output_dir: Option<PathBuf>,

        /// Write the export to stdout instead of a file.
        #[arg(long)]
        stdout: bool,

        /// Exit with status 1 when the export fails.
        #[arg(long)]
        fail_on_error: bool,
    },

    /// Print trip statistics for a saved export.
    Stats {
        /// Path to the saved export (e.g. data.txt).
        path: PathBuf,

        /// Write the report to this file instead of stdout.
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Show station names from the open-data station list (ids when offline).
        #[arg(long)]
        station_names: bool,

        /// Write start/end station coordinates of every trip to this CSV.
        #[arg(long, value_name = "CSV")]
        coords: Option<PathBuf>,

        /// Station list to look names and coordinates up in.
        #[arg(long, value_name = "URL", default_value = STATION_INFORMATION_URL)]
        station_url: String,
    },

    /// Compute SHA-256 of a file (e.g. to compare two exports).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Export {
                base_url,
                cookie,
                har,
                output_dir,
                stdout,
                fail_on_error,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!(base_url = %cfg.base_url, "loaded config");
                let args = ExportArgs {
                    base_url,
                    cookie,
                    har,
                    output_dir,
                    stdout,
                    fail_on_error,
                };
                run_export(&cfg, args).await?;
            }
            CliCommand::Stats {
                path,
                output,
                station_names,
                coords,
                station_url,
            } => {
                let cfg = config::load_or_init()?;
                let args = StatsArgs {
                    path,
                    output,
                    station_names,
                    coords,
                    station_url,
                };
                run_stats(&cfg, args).await?;
            }
            CliCommand::Checksum { path } => run_checksum(&path).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
