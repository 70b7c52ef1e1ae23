//! Survey of which floats carry chlorophyll
//!
//! Builds the target float list for later runs. Each float is decided by its
//! first readable profile file: the float is recorded when that file has a
//! chlorophyll variable and ruled out otherwise. Later files of a decided
//! float are not opened. Files that cannot be read do not decide anything.

use crate::app::interfaces::ProfileSource;
use crate::app::models::Variable;
use crate::app::services::identifier_resolver::parse_candidate;
use indicatif::ProgressBar;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Counters for one survey run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyStats {
    pub listed: usize,
    pub opened: usize,
    pub unreadable: usize,
    pub unparseable: usize,
    pub without_chlorophyll: usize,
}

/// Floats found to carry chlorophyll, with the run's counters
#[derive(Debug, Clone, Default)]
pub struct FloatSurvey {
    pub floats: BTreeSet<String>,
    pub stats: SurveyStats,
}

impl FloatSurvey {
    pub fn summary(&self) -> String {
        format!(
            "Float Survey: {} files listed, {} opened -> {} floats with CHLA | without CHLA: {} | unreadable: {} | unparseable: {}",
            self.stats.listed,
            self.stats.opened,
            self.floats.len(),
            self.stats.without_chlorophyll,
            self.stats.unreadable,
            self.stats.unparseable
        )
    }
}

/// Survey `identifiers` in sorted order
pub fn survey_floats(
    identifiers: &[String],
    source: &dyn ProfileSource,
    progress: Option<&ProgressBar>,
) -> FloatSurvey {
    let mut sorted: Vec<&String> = identifiers.iter().collect();
    sorted.sort();

    let mut survey = FloatSurvey::default();
    let mut ruled_out: BTreeSet<String> = BTreeSet::new();
    survey.stats.listed = sorted.len();

    for identifier in sorted {
        if let Some(pb) = progress {
            pb.inc(1);
        }

        let float_id = match parse_candidate(identifier) {
            Ok(candidate) => candidate.float_id,
            Err(_) => {
                debug!("Skipping unparseable file name {}", identifier);
                survey.stats.unparseable += 1;
                continue;
            }
        };
        if survey.floats.contains(&float_id) || ruled_out.contains(&float_id) {
            continue;
        }

        let file = match source.open(identifier) {
            Ok(file) => file,
            Err(e) => {
                warn!("Could not read {}: {}", identifier, e);
                survey.stats.unreadable += 1;
                continue;
            }
        };
        survey.stats.opened += 1;

        let chla = Variable::Chla;
        if file.has_variable(chla.name()) || file.has_variable(&chla.adjusted_name()) {
            debug!("Float {} carries CHLA", float_id);
            survey.floats.insert(float_id);
        } else {
            survey.stats.without_chlorophyll += 1;
            ruled_out.insert(float_id);
        }
    }

    info!("{}", survey.summary());
    survey
}
