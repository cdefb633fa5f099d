//! Migration-Mapper main entry point
//!
//! This is the command-line interface for the Migration-Mapper site crawler.

use anyhow::Context;
use clap::Parser;
use migration_mapper::config::{self, Config};
use migration_mapper::crawler::run_crawl;
use migration_mapper::output::{export_all, print_summary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Migration-Mapper: map an existing site's URLs for a migration
///
/// Migration-Mapper crawls a website (from its sitemap when it has one),
/// classifies every page and suggests where it should redirect on the new
/// site. Results are written as CSV, JSON and ready-to-use redirect configs.
#[derive(Parser, Debug)]
#[command(name = "migration-mapper")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a site and build a redirect mapping for its migration", long_about = None)]
struct Cli {
    /// Base URL of the site to crawl
    #[arg(short, long)]
    url: Option<String>,

    /// Output path prefix (without extension)
    #[arg(short, long, value_name = "PREFIX")]
    output: Option<String>,

    /// Maximum number of pages to crawl
    #[arg(short, long)]
    max_pages: Option<usize>,

    /// Delay between requests in seconds
    #[arg(short, long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

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

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            return Err(e);
        }
    };

    tracing::info!(
        "Target: {} (max pages: {}, delay: {}ms)",
        config.crawler.base_url,
        config.crawler.max_pages,
        config.crawler.delay_ms
    );

    let prefix = config.output.prefix.clone();

    let result = match run_crawl(config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if !cli.quiet {
        print_summary(&result);
    }

    let written = export_all(&result, &prefix)
        .with_context(|| format!("Failed to export results to {}", prefix))?;

    if !cli.quiet {
        for path in &written {
            println!("✓ Exported {}", path.display());
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("migration_mapper=info,warn"),
            1 => EnvFilter::new("migration_mapper=debug,info"),
            2 => EnvFilter::new("migration_mapper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file, applies command-line overrides and validates
/// the result
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let config = config::parse_config(path)?;
            let hash = config::compute_config_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.crawler.base_url = url.clone();
    }
    if let Some(output) = &cli.output {
        config.output.prefix = output.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay) = cli.delay {
        config.crawler.delay_ms = delay_to_millis(delay)?;
    }

    config::validate(&config)?;
    Ok(config)
}

/// Converts a delay in seconds to whole milliseconds
fn delay_to_millis(seconds: f64) -> anyhow::Result<u64> {
    if !seconds.is_finite() || seconds < 0.0 {
        anyhow::bail!("delay must be a non-negative number of seconds, got {}", seconds);
    }
    Ok((seconds * 1000.0).round() as u64)
}
