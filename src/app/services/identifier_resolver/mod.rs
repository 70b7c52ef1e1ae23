//! Identifier resolution for Argo profile files
//!
//! Turns a raw catalog listing into the ordered list of profile files to load.
//!
//! # Pipeline
//!
//! 1. **Parsing**: extract `(float, cycle, mode, descending)` from each file
//!    name; unparseable names are skipped and counted
//! 2. **Float filtering**: keep only floats on the target list
//! 3. **Descending profiles**: drop files whose name ends in the `D` marker
//! 4. **Deduplication**: one file per physical profile, delayed mode preferred
//!
//! The output is ordered by float number and cycle.

pub mod deduplication;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use deduplication::{deduplicate_candidates, select_preferred};
pub use parser::parse_candidate;

use crate::app::models::RawCandidate;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Counters describing how a listing was reduced to resolved identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Entries in the raw listing
    pub listed: usize,
    /// Entries whose name could not be parsed
    pub unparseable: usize,
    /// Entries for floats not on the target list
    pub not_targeted: usize,
    /// Descending profiles dropped
    pub descending: usize,
    /// Duplicate submissions discarded in favour of a preferred variant
    pub duplicates_removed: usize,
    /// Identifiers left after resolution
    pub resolved: usize,
}

impl ResolutionStats {
    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Resolution Summary: {} listed -> {} resolved | unparseable: {} | \
             other floats: {} | descending: {} | duplicates: {}",
            self.listed,
            self.resolved,
            self.unparseable,
            self.not_targeted,
            self.descending,
            self.duplicates_removed
        )
    }
}

/// Resolved identifiers together with their resolution statistics
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub identifiers: Vec<String>,
    pub stats: ResolutionStats,
}

/// Resolve a candidate listing against the target float list
pub fn resolve_identifiers(candidates: &[String], target_floats: &BTreeSet<String>) -> Resolution {
    let mut stats = ResolutionStats {
        listed: candidates.len(),
        ..Default::default()
    };

    let mut kept: Vec<RawCandidate> = Vec::new();
    for identifier in candidates {
        let candidate = match parse_candidate(identifier) {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!("Skipping candidate: {}", e);
                stats.unparseable += 1;
                continue;
            }
        };

        if !target_floats.contains(&candidate.float_id) {
            stats.not_targeted += 1;
            continue;
        }

        if candidate.descending {
            debug!("Dropping descending profile {}", candidate.identifier);
            stats.descending += 1;
            continue;
        }

        kept.push(candidate);
    }

    let resolved = deduplicate_candidates(kept, &mut stats);
    stats.resolved = resolved.len();

    info!("{}", stats.summary());

    Resolution {
        identifiers: resolved.into_iter().map(|c| c.identifier).collect(),
        stats,
    }
}
