//! URL handling module for Mirror-Scout
//!
//! This module decides which URLs name package artifacts and which URLs
//! stay inside a mirror subtree during a crawl.

mod classifier;
mod scope;

// Re-export main functions
pub use classifier::{is_package_artifact, PACKAGE_EXTENSIONS};
pub use scope::{in_scope, is_navigation_token};
