//! Sitescribe main entry point
//!
//! Command-line interface: crawl one site, write a markdown document per
//! page, and assemble the full-text bundle.

use anyhow::Context;
use clap::Parser;
use sitescribe::config::{load_config, validate, Config};
use sitescribe::crawler::Orchestrator;
use sitescribe::output::{assemble_bundle, format_page};
use sitescribe::services::TracingLogSink;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Sitescribe: turn a website into a bounded markdown corpus
///
/// Crawls a site within its own domain up to a page cap, extracts a
/// denoised record per page, and writes deterministic markdown documents
/// plus one concatenated bundle.
#[derive(Parser, Debug)]
#[command(name = "sitescribe")]
#[command(version)]
#[command(about = "Turn a website into a bounded markdown corpus", long_about = None)]
struct Cli {
    /// Absolute URL to start crawling from
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the configured page cap
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
        validate(&config)?;
    }

    run(config, &cli.start_url).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitescribe=info,warn"),
            1 => EnvFilter::new("sitescribe=debug,info"),
            2 => EnvFilter::new("sitescribe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Crawls the site and writes all output artifacts
async fn run(config: Config, start_url: &str) -> anyhow::Result<()> {
    let orchestrator =
        Orchestrator::new(&config)?.with_log_sink(Arc::new(TracingLogSink));

    let records = orchestrator.crawl(start_url).await?;
    tracing::info!("Collected {} pages", records.len());

    let pages: Vec<_> = records.iter().map(format_page).collect();

    let pages_dir = Path::new(&config.output.pages_dir);
    std::fs::create_dir_all(pages_dir)
        .with_context(|| format!("creating pages directory {}", pages_dir.display()))?;
    for page in &pages {
        let path = pages_dir.join(&page.filename);
        std::fs::write(&path, &page.content)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    let bundle = assemble_bundle(&pages, start_url);
    std::fs::write(&config.output.bundle_path, bundle)
        .with_context(|| format!("writing bundle {}", config.output.bundle_path))?;

    println!(
        "Wrote {} pages to {} and the bundle to {}",
        pages.len(),
        config.output.pages_dir,
        config.output.bundle_path
    );

    Ok(())
}
