//! Crawl orchestration across mirror roots
//!
//! This module drives the worker pool:
//! - Building the shared HTTP client
//! - Keeping up to `max_workers` frontiers running at once
//! - Aggregating per-root counters into a crawl summary

use crate::config::{CrawlerConfig, MirrorRoot};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::frontier::{Frontier, FrontierStats};
use crate::ledger::LedgerSet;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Aggregate counters for a whole crawl run
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlSummary {
    /// Mirror roots walked to completion
    pub roots_crawled: u64,

    /// Listing pages fetched across all roots
    pub pages_visited: u64,

    /// Package URLs recorded across all roots
    pub packages_recorded: u64,

    /// Fetches that failed across all roots
    pub fetch_failures: u64,
}

impl CrawlSummary {
    fn absorb(&mut self, stats: FrontierStats) {
        self.roots_crawled += 1;
        self.pages_visited += stats.pages_visited;
        self.packages_recorded += stats.packages_recorded;
        self.fetch_failures += stats.fetch_failures;
    }
}

/// Walks every root to completion through a bounded worker pool
///
/// Each worker owns one frontier at a time and runs it to exhaustion before
/// picking up the next root, so the walk below any single root stays
/// strictly breadth-first. At most `config.max_workers` frontiers are in
/// flight at once. Returns only after every root has been walked.
///
/// # Arguments
///
/// * `roots` - Mirror roots to walk, in order
/// * `config` - Crawler settings (depth bound, pool size, fetch timeout)
/// * `ledgers` - Ledger set shared by all workers
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Counters aggregated over all roots
/// * `Err(ScoutError)` - Client construction failed, a root URL was
///   malformed, or a worker task was cancelled
pub async fn run_crawl(
    roots: Vec<MirrorRoot>,
    config: &CrawlerConfig,
    ledgers: Arc<LedgerSet>,
) -> crate::Result<CrawlSummary> {
    let client = build_http_client()?;
    let timeout = Duration::from_secs(config.fetch_timeout_secs);
    let max_workers = config.max_workers as usize;

    tracing::info!(
        "Starting crawl: {} roots, {} workers, max depth {}",
        roots.len(),
        max_workers,
        config.max_depth
    );
    let start_time = std::time::Instant::now();

    // Frontier construction parses the base URLs, so a malformed root
    // fails the run before anything is fetched.
    let mut pending = roots
        .into_iter()
        .map(|root| Frontier::new(root, config.max_depth))
        .collect::<crate::Result<VecDeque<Frontier>>>()?;

    let mut in_flight = JoinSet::new();
    let mut summary = CrawlSummary::default();

    loop {
        // Top up the pool from the pending roots.
        while in_flight.len() < max_workers {
            match pending.pop_front() {
                Some(frontier) => {
                    let client = client.clone();
                    let ledgers = Arc::clone(&ledgers);
                    in_flight.spawn(async move { frontier.run(&client, timeout, &ledgers).await });
                }
                None => break,
            }
        }

        // Reap one finished frontier. None means the pool has drained and
        // nothing is pending, so the crawl is over.
        match in_flight.join_next().await {
            Some(joined) => summary.absorb(joined?),
            None => break,
        }
    }

    tracing::info!(
        "Crawl finished: {} roots, {} pages, {} package URLs, {} fetch failures in {:?}",
        summary.roots_crawled,
        summary.pages_visited,
        summary.packages_recorded,
        summary.fetch_failures,
        start_time.elapsed()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_absorbs_frontier_stats() {
        let mut summary = CrawlSummary::default();
        summary.absorb(FrontierStats {
            pages_visited: 3,
            packages_recorded: 7,
            fetch_failures: 1,
        });
        summary.absorb(FrontierStats {
            pages_visited: 2,
            packages_recorded: 0,
            fetch_failures: 0,
        });

        assert_eq!(summary.roots_crawled, 2);
        assert_eq!(summary.pages_visited, 5);
        assert_eq!(summary.packages_recorded, 7);
        assert_eq!(summary.fetch_failures, 1);
    }

    #[tokio::test]
    async fn test_run_crawl_with_no_roots() {
        let dir = tempfile::tempdir().unwrap();
        let ledgers = Arc::new(LedgerSet::new(dir.path()));

        let summary = run_crawl(Vec::new(), &CrawlerConfig::default(), ledgers)
            .await
            .unwrap();

        assert_eq!(summary.roots_crawled, 0);
        assert_eq!(summary.pages_visited, 0);
        assert_eq!(summary.packages_recorded, 0);
    }
}
