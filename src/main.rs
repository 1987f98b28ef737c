//! SEO Scan main entry point
//!
//! This is the command-line interface for the single-page SEO scanner.

use clap::Parser;
use seo_scan::browser::ChromeBrowser;
use seo_scan::config::{load_config_with_hash, Config};
use seo_scan::output::{print_summary, write_json};
use seo_scan::{ScanRequest, Scanner};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// SEO Scan: audit a single page
///
/// Loads the page in headless Chrome, extracts its SEO signals, samples its
/// internal links and scores it from 0 to 100.
#[derive(Parser, Debug)]
#[command(name = "seo-scan")]
#[command(version)]
#[command(about = "Single-page SEO scanner", long_about = None)]
struct Cli {
    /// URL to scan (https:// is assumed when no scheme is given)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the full result as JSON ("-" for stdout)
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Crawl depth hint (1-3)
    #[arg(long, default_value_t = 1)]
    depth: u8,

    /// Include external links in the crawl hint
    #[arg(long)]
    include_external: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_scan=info,warn"),
            1 => EnvFilter::new("seo_scan=debug,info"),
            2 => EnvFilter::new("seo_scan=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one scan; returns whether it completed
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load(cli.config.as_deref())?;

    let request = ScanRequest::new(&cli.url)?
        .with_depth(cli.depth)?
        .with_include_external(cli.include_external);

    let browser = ChromeBrowser::launch(&config.browser, &config.user_agent.header_value()).await?;
    let scanner = Scanner::new(Arc::new(browser), &config)?;

    let outcome = scanner.scan(&request).await;
    let result = outcome.result();

    if let Some(path) = &cli.json {
        write_json(result, path)?;
        if path.as_path() != Path::new("-") {
            tracing::info!("Result written to: {}", path.display());
        }
    }

    let json_on_stdout = cli.json.as_deref() == Some(Path::new("-"));
    if !cli.quiet && !json_on_stdout {
        print_summary(result);
    }

    Ok(!outcome.is_degraded())
}

/// Loads the configuration file, or defaults when none is given
fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}
