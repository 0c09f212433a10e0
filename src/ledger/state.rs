//! URL state definitions for the package ledger
//!
//! This module defines the lifecycle states a recorded package URL moves
//! through between discovery and the downstream download stage.

use std::fmt;

/// Represents the processing state of a package URL in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlState {
    /// URL has been discovered by the crawler and not yet picked up
    Discovered,

    /// URL has been claimed by a downstream worker; a row left in this
    /// state after a run also marks a failed attempt
    InFlight,

    /// URL has been downloaded and verified
    Processed,
}

impl UrlState {
    /// Returns true if no further processing is expected for this URL
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if the URL is still waiting to be picked up
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Discovered)
    }

    /// Converts the state to its CSV field representation
    pub fn as_field(&self) -> &'static str {
        match self {
            Self::Discovered => "-1",
            Self::InFlight => "0",
            Self::Processed => "1",
        }
    }

    /// Parses a state from its CSV field representation
    ///
    /// Returns None if the field doesn't match any known state.
    pub fn from_field(s: &str) -> Option<Self> {
        match s {
            "-1" => Some(Self::Discovered),
            "0" => Some(Self::InFlight),
            "1" => Some(Self::Processed),
            _ => None,
        }
    }

    /// Returns all possible URL states
    pub fn all_states() -> Vec<Self> {
        vec![Self::Discovered, Self::InFlight, Self::Processed]
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_field())
    }
}
