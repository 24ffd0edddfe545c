//! poemhunter main entry point
//!
//! This is the command-line interface for downloading poems from poemhunter.com.

use anyhow::Context;
use clap::{Parser, Subcommand};
use poemhunter::config::{ScraperConfig, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY};
use poemhunter::crawler::Coordinator;
use poemhunter::model::RunStatistics;
use poemhunter::output::print_statistics;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

/// poemhunter: download poems from poemhunter.com
///
/// Finds an author (or the site's most popular poets), walks every page of
/// their poem listing, and saves each poem as a plain text file.
#[derive(Parser, Debug)]
#[command(name = "poemhunter")]
#[command(version)]
#[command(about = "Download poems from poemhunter.com", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Number of poems downloaded in parallel
    #[arg(short, long, global = true, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS", default_value_t = 30)]
    timeout: u64,

    /// Site to scrape
    #[arg(long, global = true, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    base_url: Url,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download all poems by one author
    Poet {
        /// Full name of the author, e.g. "Robert Frost"
        #[arg(value_name = "AUTHOR")]
        author: String,

        /// Directory receiving the poet's subdirectory (created if missing);
        /// used as-is when its name already contains the poet's name
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },

    /// Download all poems by the site's N most popular poets
    Top {
        /// How many poets to take from the ranking
        #[arg(value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,

        /// Directory receiving one subdirectory per poet (created if missing)
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(stats) => report(&stats, cli.quiet),
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

/// Runs the selected command; errors here are prerequisite failures
async fn run(cli: &Cli) -> anyhow::Result<RunStatistics> {
    let config = build_config(cli);
    let coordinator = Coordinator::new(&config).context("Invalid configuration")?;

    match &cli.command {
        Command::Poet { author, output_dir } => {
            tracing::info!(author = %author, dir = %output_dir.display(), "Downloading poet");
            coordinator
                .harvest_poet(author, output_dir)
                .await
                .with_context(|| format!("Could not download poems by '{author}'"))
        }
        Command::Top { count, output_dir } => {
            tracing::info!(count, dir = %output_dir.display(), "Downloading top poets");
            coordinator
                .harvest_top(*count as usize, output_dir)
                .await
                .with_context(|| format!("Could not download the top {count} poets"))
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG`, when set, takes precedence over the flags.
fn setup_logging(verbose: u8, quiet: bool) {
    let default_filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "poemhunter=info,warn",
            1 => "poemhunter=debug,info",
            2 => "poemhunter=trace,debug",
            _ => "trace",
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides to the default configuration
fn build_config(cli: &Cli) -> ScraperConfig {
    let mut config = ScraperConfig::default();
    config.site.base_url = cli.base_url.clone();
    config.http.request_timeout = Duration::from_secs(cli.timeout);
    config.download.concurrency = cli.concurrency;
    config
}

fn report(stats: &RunStatistics, quiet: bool) {
    if !stats.failures.is_empty() || !stats.skipped_poets.is_empty() {
        tracing::warn!(
            failed = stats.failed(),
            skipped_poets = stats.skipped_poets.len(),
            "Finished with failures"
        );
    }

    if !quiet {
        print_statistics(stats);
    }
}
