//! Crawler module for walking mirror directory trees
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of directory listings
//! - Link extraction with scope filtering
//! - Breadth-first per-root frontiers
//! - Worker-pool orchestration across roots

mod extractor;
mod fetcher;
mod frontier;
mod orchestrator;

pub use extractor::extract_links;
pub use fetcher::{build_http_client, fetch_listing, FetchError};
pub use frontier::{CrawlTask, Frontier, FrontierStats};
pub use orchestrator::{run_crawl, CrawlSummary};

use crate::config::{resolve_roots, Distro, ScoutConfig};
use crate::ledger::LedgerSet;
use crate::ScoutError;
use std::path::Path;
use std::sync::Arc;

/// Runs a complete crawl for one distribution
///
/// This is the main entry point for walking a distro's mirrors. It will:
/// 1. Resolve the mirror roots for the distro
/// 2. Open the ledger set under the configured output directory
/// 3. Walk every root breadth-first through the worker pool
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `distro` - The distribution whose mirrors should be walked
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Counters aggregated over all roots
/// * `Err(ScoutError)` - Root resolution or the crawl itself failed
///
/// # Example
///
/// ```no_run
/// use mirror_scout::config::{Distro, ScoutConfig};
/// use mirror_scout::crawler::crawl;
///
/// # async fn run() -> Result<(), mirror_scout::ScoutError> {
/// let config = ScoutConfig::default();
/// let summary = crawl(&config, Distro::Debian).await?;
/// println!("{} package URLs recorded", summary.packages_recorded);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &ScoutConfig, distro: Distro) -> Result<CrawlSummary, ScoutError> {
    let roots = resolve_roots(config, distro)?;
    let ledgers = Arc::new(LedgerSet::new(Path::new(&config.output.directory)));
    run_crawl(roots, &config.crawler, ledgers).await
}
