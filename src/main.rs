//! Mirror-Scout main entry point
//!
//! This is the command-line interface for the Mirror-Scout mirror walker.

use clap::Parser;
use mirror_scout::config::{load_config, resolve_roots, Distro, ScoutConfig};
use mirror_scout::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mirror-Scout: a package mirror walker
///
/// Mirror-Scout walks public distribution mirrors breadth-first, records
/// every package artifact URL it encounters in per-distro CSV ledgers, and
/// leaves the artifacts themselves untouched.
#[derive(Parser, Debug)]
#[command(name = "mirror-scout")]
#[command(version = "1.0.0")]
#[command(about = "A package mirror walker", long_about = None)]
struct Cli {
    /// Distribution whose mirrors should be walked
    /// (ubuntu, debian, centos, rocky, fedora, arch, alpine)
    #[arg(short, long, value_name = "DISTRO")]
    distro: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured maximum crawl depth
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,

    /// Override the configured output directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show ledger statistics for the distro and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // An unknown distro is the one unrecoverable input: nothing is crawled.
    let distro: Distro = match cli.distro.parse() {
        Ok(distro) => distro,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    // Load and validate configuration
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => ScoutConfig::default(),
    };

    // Command-line overrides win over the file.
    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
    }
    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config, distro)?;
    } else if cli.stats {
        handle_stats(&config, distro)?;
    } else {
        handle_crawl(&config, distro).await?;
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
            0 => EnvFilter::new("mirror_scout=info,warn"),
            1 => EnvFilter::new("mirror_scout=debug,info"),
            2 => EnvFilter::new("mirror_scout=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &ScoutConfig, distro: Distro) -> Result<(), Box<dyn std::error::Error>> {
    let roots = resolve_roots(config, distro)?;

    println!("=== Mirror-Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max workers: {}", config.crawler.max_workers);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Ledger: {}/output/urls.csv", distro);

    println!("\nMirror Roots for {} ({}):", distro, roots.len());
    for root in &roots {
        match (&root.release, &root.component) {
            (Some(release), Some(component)) => {
                println!("  - {} ({} / {})", root.base_url, release, component)
            }
            (Some(release), None) => println!("  - {} ({})", root.base_url, release),
            (None, Some(component)) => println!("  - {} ({})", root.base_url, component),
            (None, None) => println!("  - {}", root.base_url),
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would walk {} mirror roots for {}", roots.len(), distro);

    Ok(())
}

/// Handles the --stats mode: shows ledger statistics for the distro
fn handle_stats(config: &ScoutConfig, distro: Distro) -> Result<(), Box<dyn std::error::Error>> {
    use mirror_scout::ledger::{ledger_path, ledger_stats};
    use std::path::Path;

    let path = ledger_path(Path::new(&config.output.directory), distro);
    println!("Ledger: {}\n", path.display());

    if !path.exists() {
        println!("No ledger recorded yet for {}", distro);
        return Ok(());
    }

    let stats = ledger_stats(&path)?;

    println!("Total package URLs: {}", stats.total);
    println!("  Discovered (-1): {}", stats.discovered);
    println!("  In flight   (0): {}", stats.in_flight);
    println!("  Processed   (1): {}", stats.processed);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &ScoutConfig, distro: Distro) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Walking {} mirrors (max depth {}, {} workers, {}s fetch timeout)",
        distro,
        config.crawler.max_depth,
        config.crawler.max_workers,
        config.crawler.fetch_timeout_secs
    );

    // Run the crawler
    match crawl(config, distro).await {
        Ok(summary) => {
            tracing::info!(
                "Crawl completed: {} roots walked, {} pages visited, {} package URLs recorded",
                summary.roots_crawled,
                summary.pages_visited,
                summary.packages_recorded
            );
            if summary.fetch_failures > 0 {
                tracing::warn!("{} fetches failed and dropped their branches", summary.fetch_failures);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
