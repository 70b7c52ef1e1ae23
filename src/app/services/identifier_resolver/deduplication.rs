//! Duplicate submission resolution
//!
//! The same physical profile can be submitted in real-time and later in
//! delayed mode. Candidates are grouped by their duplicate key (float, cycle,
//! direction) and one file per group is kept: delayed mode over real-time over
//! anything else, with the identifier as a deterministic tie-break.

use crate::app::models::{DuplicateKey, RawCandidate};
use std::collections::BTreeMap;
use tracing::debug;

use super::ResolutionStats;

/// Keep one candidate per duplicate key
///
/// Groups of one are kept as they are. The result is ordered by duplicate key.
pub fn deduplicate_candidates(
    candidates: Vec<RawCandidate>,
    stats: &mut ResolutionStats,
) -> Vec<RawCandidate> {
    let mut groups: BTreeMap<DuplicateKey, Vec<RawCandidate>> = BTreeMap::new();
    for candidate in candidates {
        groups
            .entry(candidate.duplicate_key())
            .or_default()
            .push(candidate);
    }

    let mut resolved = Vec::with_capacity(groups.len());
    for (key, group) in groups {
        let group_size = group.len();
        if let Some(preferred) = select_preferred(group) {
            if group_size > 1 {
                debug!(
                    "Resolved {} submissions of {} to {}",
                    group_size, key, preferred.identifier
                );
                stats.duplicates_removed += group_size - 1;
            }
            resolved.push(preferred);
        }
    }

    resolved
}

/// Select the preferred candidate from one duplicate group
///
/// Returns `None` only for an empty group.
pub fn select_preferred(group: Vec<RawCandidate>) -> Option<RawCandidate> {
    group.into_iter().min_by(|a, b| {
        a.mode
            .preference()
            .cmp(&b.mode.preference())
            .then_with(|| a.identifier.cmp(&b.identifier))
    })
}
