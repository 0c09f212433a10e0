//! Ledger module for Mirror-Scout
//!
//! This module owns the per-distribution CSV ledgers: append-only recording
//! of discovered package URLs during a crawl, plus the read and state-update
//! surface the downstream download stage uses.

mod state;
mod store;

// Re-export types
pub use state::UrlState;
pub use store::{LedgerError, LedgerResult, LedgerSet, LedgerStats, PackageUrlRecord};

// Re-export file-level operations
pub use store::{ledger_path, ledger_stats, load_records, update_state};
