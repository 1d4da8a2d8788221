//! `cexport export` – fetch the course list and save data.txt.

use anyhow::{Context, Result};
use cexport_core::config::ExportConfig;
use cexport_core::credentials::{CredentialProvider, HarCookies, NoCredentials, StaticCookie};
use cexport_core::downloader::{DirectoryDownloader, FileDownloader, StdoutDownloader};
use cexport_core::{ExportOutcome, ExportRequest, ExportRunner};
use std::path::PathBuf;

/// Flags of the export subcommand.
#[derive(Debug, Default)]
pub struct ExportArgs {
    pub base_url: Option<String>,
    pub cookie: Option<String>,
    pub har: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub stdout: bool,
    pub fail_on_error: bool,
}

/// Where the session cookie comes from after merging flags and config.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CookieSource {
    None,
    Literal(String),
    Har(PathBuf),
}

/// Where data.txt goes after merging flags and config.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Destination {
    Stdout,
    Dir(PathBuf),
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ExportPlan {
    pub base_url: String,
    pub cookie: CookieSource,
    pub destination: Destination,
}

/// Flags win over config; a flag-level cookie or HAR replaces both config sources.
pub(crate) fn plan(cfg: &ExportConfig, args: &ExportArgs, cwd: PathBuf) -> ExportPlan {
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| cfg.base_url.clone());

    let cookie = match (&args.cookie, &args.har) {
        (Some(c), _) => CookieSource::Literal(c.clone()),
        (None, Some(h)) => CookieSource::Har(h.clone()),
        (None, None) => match (&cfg.cookie, &cfg.har_path) {
            (Some(c), _) => CookieSource::Literal(c.clone()),
            (None, Some(h)) => CookieSource::Har(h.clone()),
            (None, None) => CookieSource::None,
        },
    };

    let destination = if args.stdout {
        Destination::Stdout
    } else {
        Destination::Dir(
            args.output_dir
                .clone()
                .or_else(|| cfg.output_dir.clone())
                .unwrap_or(cwd),
        )
    };

    ExportPlan {
        base_url,
        cookie,
        destination,
    }
}

pub async fn run_export(cfg: &ExportConfig, args: ExportArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("current directory")?;
    let plan = plan(cfg, &args, cwd);

    let credentials: Box<dyn CredentialProvider> = match plan.cookie {
        CookieSource::None => Box::new(NoCredentials),
        CookieSource::Literal(c) => Box::new(StaticCookie::new(c)),
        CookieSource::Har(path) => Box::new(HarCookies::new(path, &plan.base_url)),
    };
    let to_stdout = plan.destination == Destination::Stdout;
    let downloader: Box<dyn FileDownloader> = match plan.destination {
        Destination::Stdout => Box::new(StdoutDownloader),
        Destination::Dir(dir) => Box::new(DirectoryDownloader::new(dir)),
    };

    let runner = ExportRunner::new(ExportRequest::new(plan.base_url), credentials, downloader)
        .with_fetch_options(cfg.fetch_options());
    let outcome = tokio::task::spawn_blocking(move || runner.run_and_report())
        .await
        .context("export task join")?;

    // Keep stdout clean for the payload when piping.
    match (&outcome, to_stdout) {
        (ExportOutcome::Saved(_), false) => println!("{}", outcome.notice()),
        (ExportOutcome::Saved(_), true) => eprintln!("{}", outcome.notice()),
        (ExportOutcome::Failed(_), _) => eprintln!("{}", outcome.notice()),
    }

    if let ExportOutcome::Failed(e) = outcome {
        if args.fail_on_error {
            return Err(e.into());
        }
    }
    Ok(())
}
