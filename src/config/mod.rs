//! Configuration module for Mirror-Scout
//!
//! This module handles the distribution selector, the built-in mirror-root
//! catalog, and loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use mirror_scout::config::{load_config, resolve_roots, Distro};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! let roots = resolve_roots(&config, Distro::Debian).unwrap();
//! println!("Crawling {} debian roots", roots.len());
//! ```

mod parser;
mod roots;
mod types;
mod validation;

// Re-export types
pub use types::{CrawlerConfig, Distro, MirrorRoot, OutputConfig, ScoutConfig};

// Re-export parser and catalog functions
pub use parser::load_config;
pub use roots::{builtin_roots, resolve_roots};
