//! Mirror-Scout: a package-mirror URL collector
//!
//! This crate implements a breadth-first crawler over Linux distribution
//! mirror directory listings, recording every package-file URL it discovers
//! into a per-distribution CSV ledger for a later download stage to consume.

pub mod config;
pub mod crawler;
pub mod ledger;
pub mod url;

use thiserror::Error;

/// Main error type for Mirror-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] ledger::LedgerError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown distribution: {0}")]
    UnknownDistro(String),

    #[error("Invalid mirror URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Mirror-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Distro, MirrorRoot, ScoutConfig};
pub use crawler::{run_crawl, CrawlSummary};
pub use ledger::{LedgerSet, PackageUrlRecord, UrlState};
pub use url::is_package_artifact;
