//! `cexport stats <path>` – trip statistics for a saved export.

use anyhow::{Context, Result};
use cexport_core::analysis::{StationDirectory, TripStats};
use cexport_core::config::ExportConfig;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Flags of the stats subcommand.
#[derive(Debug)]
pub struct StatsArgs {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub station_names: bool,
    pub coords: Option<PathBuf>,
    pub station_url: String,
}

/// How the station list is used after looking at the flags.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum StationLookup {
    /// Report by id, no request.
    Skip,
    /// Names only; an unreachable list falls back to ids.
    Optional,
    /// Coordinates were asked for; the list must load.
    Required,
}

pub(crate) fn station_lookup(args: &StatsArgs) -> StationLookup {
    if args.coords.is_some() {
        StationLookup::Required
    } else if args.station_names {
        StationLookup::Optional
    } else {
        StationLookup::Skip
    }
}

pub async fn run_stats(cfg: &ExportConfig, args: StatsArgs) -> Result<()> {
    let stats = TripStats::from_path(&args.path)?;
    tracing::info!(
        trips = stats.trips,
        skipped = stats.skipped,
        "computed statistics for {}",
        args.path.display()
    );

    let lookup = station_lookup(&args);
    let url = args.station_url.clone();
    let opts = cfg.fetch_options();
    let stations = match lookup {
        StationLookup::Skip => StationDirectory::empty(),
        StationLookup::Optional => {
            tokio::task::spawn_blocking(move || StationDirectory::load_or_empty(&url, opts))
                .await
                .context("station lookup task join")?
        }
        StationLookup::Required => {
            tokio::task::spawn_blocking(move || StationDirectory::fetch(&url, opts))
                .await
                .context("station lookup task join")?
                .context("station coordinates are needed for --coords")?
        }
    };

    if let Some(csv) = &args.coords {
        let file = File::create(csv).with_context(|| format!("create {}", csv.display()))?;
        let rows = stats
            .write_coordinates_csv(&stations, BufWriter::new(file))
            .with_context(|| format!("write {}", csv.display()))?;
        if rows.skipped > 0 {
            tracing::warn!(skipped = rows.skipped, "trips with unknown stations left out of the CSV");
        }
        eprintln!("{} trip coordinates written to {}", rows.written, csv.display());
    }

    let report = if lookup == StationLookup::Skip {
        stats.render()
    } else {
        stats.render_with(&stations)
    };
    match &args.output {
        Some(out) => {
            std::fs::write(out, &report).with_context(|| format!("write {}", out.display()))?;
            println!("Statistics for {} trips written to {}", stats.trips, out.display());
        }
        None => print!("{}", report),
    }
    Ok(())
}
