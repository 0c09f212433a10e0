//! Per-root crawl frontier
//!
//! This module contains the breadth-first walk of a single mirror subtree:
//! - Managing the (url, depth) queue and the visited set
//! - Coordinating fetching, link extraction, and classification
//! - Handing package URLs to the ledger the moment they are discovered
//!
//! One frontier runs strictly sequentially inside one worker task; only the
//! ledger is shared with other frontiers.

use crate::config::MirrorRoot;
use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::fetch_listing;
use crate::ledger::LedgerSet;
use crate::url::is_package_artifact;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// One unit of crawl work: a URL and its link depth below the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
    pub depth: u32,
}

/// Counters describing one finished frontier run
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontierStats {
    /// Listing pages fetched (successfully or not)
    pub pages_visited: u64,

    /// Package URLs handed to the ledger
    pub packages_recorded: u64,

    /// Fetches that failed and dropped their branch
    pub fetch_failures: u64,
}

/// Breadth-first crawl state for one mirror root
///
/// The queue starts with the root at depth 0. The visited set is checked at
/// dequeue time rather than enqueue time, so the same URL linked from
/// several pages sits in the queue more than once and is discarded cheaply
/// when its turn comes around again.
pub struct Frontier {
    root: MirrorRoot,
    base_url: Url,
    max_depth: u32,
    queue: VecDeque<CrawlTask>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier seeded with the root URL at depth 0
    ///
    /// # Arguments
    ///
    /// * `root` - The mirror subtree to walk
    /// * `max_depth` - Depth below the root past which links are dropped
    pub fn new(root: MirrorRoot, max_depth: u32) -> crate::Result<Self> {
        let base_url = Url::parse(&root.base_url)?;

        let mut queue = VecDeque::new();
        queue.push_back(CrawlTask {
            url: base_url.as_str().to_string(),
            depth: 0,
        });

        Ok(Frontier {
            root,
            base_url,
            max_depth,
            queue,
            visited: HashSet::new(),
        })
    }

    /// Runs the walk to completion and returns its counters
    ///
    /// Fetch failures and ledger write failures are logged and contained
    /// here; nothing observable escapes except the stats and the ledger
    /// rows. The frontier is consumed: a finished walk cannot be resumed.
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `timeout` - Timeout applied to each page fetch
    /// * `ledgers` - Ledger set that receives package discoveries
    pub async fn run(mut self, client: &Client, timeout: Duration, ledgers: &LedgerSet) -> FrontierStats {
        let distro = self.root.distro;
        let mut stats = FrontierStats::default();
        let start_time = std::time::Instant::now();

        tracing::info!("Crawling {} root {}", distro, self.base_url);

        while let Some(task) = self.queue.pop_front() {
            // Duplicate enqueues are expected; they die here.
            if !self.visited.insert(task.url.clone()) {
                continue;
            }

            // A root can itself be a package URL. Record it, never fetch it.
            if is_package_artifact(&task.url) {
                self.record_package(&task.url, ledgers, &mut stats);
                continue;
            }

            stats.pages_visited += 1;

            let body = match fetch_listing(client, &task.url, timeout).await {
                Ok(body) => body,
                Err(e) if e.is_not_navigable() => {
                    tracing::debug!("Nothing to expand: {}", e);
                    continue;
                }
                Err(e) => {
                    stats.fetch_failures += 1;
                    tracing::error!("Fetch failed, dropping branch: {}", e);
                    continue;
                }
            };

            let current_url = match Url::parse(&task.url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Skipping unparseable URL {}: {}", task.url, e);
                    continue;
                }
            };

            for candidate in extract_links(&body, &current_url, &self.base_url) {
                if is_package_artifact(&candidate) {
                    self.record_package(&candidate, ledgers, &mut stats);
                } else if task.depth < self.max_depth {
                    self.queue.push_back(CrawlTask {
                        url: candidate,
                        depth: task.depth + 1,
                    });
                }
            }

            if stats.pages_visited % 50 == 0 {
                let elapsed = start_time.elapsed();
                let rate = stats.pages_visited as f64 / elapsed.as_secs_f64();
                tracing::info!(
                    "Progress on {} {}: {} pages visited, {} queued, {} packages, {:.2} pages/sec",
                    distro,
                    self.base_url,
                    stats.pages_visited,
                    self.queue.len(),
                    stats.packages_recorded,
                    rate
                );
            }
        }

        tracing::info!(
            "Finished {} root {}: {} pages, {} packages, {} fetch failures in {:?}",
            distro,
            self.base_url,
            stats.pages_visited,
            stats.packages_recorded,
            stats.fetch_failures,
            start_time.elapsed()
        );

        stats
    }

    fn record_package(&self, url: &str, ledgers: &LedgerSet, stats: &mut FrontierStats) {
        match ledgers.record_discovery(self.root.distro, url) {
            Ok(()) => stats.packages_recorded += 1,
            // A lost row must not take the crawl down with it.
            Err(e) => tracing::error!("Failed to record {}: {}", url, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Distro;

    fn test_root(base_url: &str) -> MirrorRoot {
        MirrorRoot {
            distro: Distro::Debian,
            release: None,
            component: Some("main".to_string()),
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn test_new_seeds_root_at_depth_zero() {
        let frontier = Frontier::new(test_root("https://mirror.example.com/pool/main/"), 10).unwrap();

        assert_eq!(frontier.queue.len(), 1);
        assert_eq!(
            frontier.queue[0],
            CrawlTask {
                url: "https://mirror.example.com/pool/main/".to_string(),
                depth: 0,
            }
        );
        assert!(frontier.visited.is_empty());
    }

    #[test]
    fn test_new_canonicalizes_the_seed() {
        // Host casing is normalized so visited-set lookups compare like
        // with like once extracted candidates start arriving.
        let frontier = Frontier::new(test_root("https://Mirror.Example.COM/pool/main/"), 10).unwrap();
        assert_eq!(frontier.queue[0].url, "https://mirror.example.com/pool/main/");
    }

    #[test]
    fn test_new_rejects_unparseable_root() {
        assert!(Frontier::new(test_root("not a url"), 10).is_err());
    }

    // The walk itself (visited-set behavior, depth bound, error containment)
    // is covered against mock mirrors in the integration tests.
}
