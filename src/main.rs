//! Command-line front end: scan a directory for loose charts, classify them
//! against a song database, and move the confident matches into place.

mod cli;
mod error;
mod prompt;

use crate::cli::Cli;
use crate::error::{ErrorKind, Result, report};
use clap::Parser;
use exn::ResultExt;
use futures::StreamExt;
use sabun_catalog::{Catalog, RetryPolicy};
use sabun_config::Config;
use sabun_library::{
    Context, Loader, MatchEvent, RelocateEvent, SabunUnit, Sign, Tally, classify_all, relocate_all, scan,
};
use std::pin::pin;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            eprintln!("{}", report(&err));
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let retry = RetryPolicy { attempts: config.busy_retries, delay: config.busy_retry_delay() };
    let catalog = Catalog::open(&cli.catalog, retry).await.or_raise(|| ErrorKind::Catalog)?;
    let result = file_sabuns(cli, &config, &catalog).await;
    catalog.close().await;
    result
}

async fn file_sabuns(cli: &Cli, config: &Config, catalog: &Catalog) -> Result<ExitCode> {
    let ctx = Context { loader: Loader::new(config.load_timeout()), max_concurrency: config.max_concurrency };
    let units = scan(&cli.scan_root, &ctx).await.or_raise(|| ErrorKind::Scan)?;
    if units.is_empty() {
        println!("BMS file not found.");
        return Ok(ExitCode::FAILURE);
    }

    let (ok, tally) = classify(units, catalog, &ctx).await?;
    println!("\n{tally}");
    if tally.ok == 0 {
        println!("No OK sabun.");
        return Ok(ExitCode::FAILURE);
    }

    if !cli.yes {
        let (mut stdin, mut stdout) = (tokio::io::BufReader::new(tokio::io::stdin()), tokio::io::stdout());
        if !prompt::confirm(tally.ok, &mut stdin, &mut stdout).await.or_raise(|| ErrorKind::Prompt)? {
            println!("Canceled");
            return Ok(ExitCode::SUCCESS);
        }
    }
    println!();

    let mut events = pin!(relocate_all(ok, &cli.scan_root));
    while let Some(event) = events.next().await {
        match event.or_raise(|| ErrorKind::Relocate)? {
            RelocateEvent::Started(count) => tracing::info!(count, "relocating charts"),
            RelocateEvent::Relocated { actions, .. } => {
                for action in actions {
                    println!("{action}");
                }
            },
            RelocateEvent::Complete => (),
        }
    }
    println!("\nDone");
    Ok(ExitCode::SUCCESS)
}

/// Prints one status line per unit as it's classified and hands back the OK
/// units with the final tally.
async fn classify(units: Vec<SabunUnit>, catalog: &Catalog, ctx: &Context) -> Result<(Vec<SabunUnit>, Tally)> {
    let mut ok = Vec::new();
    let mut tally = Tally::default();
    let mut events = pin!(classify_all(units, catalog, ctx));
    while let Some(event) = events.next().await {
        match event.or_raise(|| ErrorKind::Classify)? {
            MatchEvent::Started(count) => tracing::info!(count, "classifying charts"),
            MatchEvent::Classified(unit) => {
                let Some(outcome) = &unit.outcome else { continue };
                println!("{}", outcome.describe(unit.path()));
                if outcome.sign() == Sign::Ok {
                    ok.push(*unit);
                }
            },
            MatchEvent::Complete(complete) => {
                tracing::info!(total = complete.total(), ok = complete.ok, "classification complete");
                tally = complete;
            },
        }
    }
    Ok((ok, tally))
}
