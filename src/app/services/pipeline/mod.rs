//! Single-threaded profile processing loop
//!
//! Drives every resolved identifier through load, quality gate, resampling
//! and the post-interpolation gate, appending survivors to the dataset. A
//! failure in one profile is logged, counted and skipped; it never stops the
//! run.

pub mod stats;

#[cfg(test)]
pub mod tests;

pub use stats::PipelineStats;

use crate::Result;
use crate::app::interfaces::{DayNightClassifier, ProfileCatalog, ProfileSource};
use crate::app::models::{LoadOutcome, QcVerdict, Variable};
use crate::app::services::aggregator::Dataset;
use crate::app::services::identifier_resolver::{ResolutionStats, resolve_identifiers};
use crate::app::services::post_interpolation_gate::PostInterpolationGate;
use crate::app::services::profile_loader::load_profile;
use crate::app::services::quality_gate::QualityGate;
use crate::app::services::resampler::Resampler;
use crate::config::Config;
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

/// Dataset and counters produced by one run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub dataset: Dataset,
    pub stats: PipelineStats,
}

/// Identifiers to process, either freshly resolved or reused from a saved list
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub identifiers: Vec<String>,
    /// `None` when a saved list was reused
    pub resolution: Option<ResolutionStats>,
}

/// Produce the identifier list for a run
///
/// With `reuse_saved` a previously saved list is used when the catalog has
/// one. Otherwise candidates are resolved against the target floats and the
/// result is saved for later runs.
pub fn prepare_identifiers(catalog: &dyn ProfileCatalog, reuse_saved: bool) -> Result<ResolvedInput> {
    if reuse_saved {
        if let Some(identifiers) = catalog.load_resolved()? {
            info!("Reusing {} saved identifiers", identifiers.len());
            return Ok(ResolvedInput {
                identifiers,
                resolution: None,
            });
        }
        info!("No saved identifier list found, resolving from the catalog");
    }

    let targets = catalog.list_target_floats()?;
    let candidates = catalog.list_candidates()?;
    let resolution = resolve_identifiers(&candidates, &targets);
    catalog.save_resolved(&resolution.identifiers)?;

    Ok(ResolvedInput {
        identifiers: resolution.identifiers,
        resolution: Some(resolution.stats),
    })
}

/// The per-profile processing chain
pub struct ProfilePipeline<'a> {
    source: &'a dyn ProfileSource,
    gate: QualityGate,
    resampler: Resampler,
    post_interpolation: PostInterpolationGate,
    classifier: Option<&'a dyn DayNightClassifier>,
    progress: Option<ProgressBar>,
}

impl<'a> ProfilePipeline<'a> {
    pub fn new(source: &'a dyn ProfileSource, config: &Config) -> Self {
        Self {
            source,
            gate: QualityGate::new(config.quality.clone()),
            resampler: Resampler::new(config.grid.depths(), config.resample.clone()),
            post_interpolation: PostInterpolationGate::new(
                config.post_interpolation.clone(),
                &config.grid,
            ),
            classifier: None,
            progress: None,
        }
    }

    /// Label each accepted profile as day or night
    pub fn with_classifier(mut self, classifier: &'a dyn DayNightClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Advance `progress` once per identifier
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Process identifiers in order
    pub fn run(&self, identifiers: &[String]) -> PipelineOutcome {
        let mut dataset = Dataset::new(self.classifier.is_some());
        let mut stats = PipelineStats::new(identifiers.len());

        info!("Processing {} profiles", identifiers.len());
        match self.post_interpolation.reference_level() {
            Some(level) => debug!("Residual check at grid level {}", level),
            None => debug!("Reference depth below the grid, residual check on the deepest level only"),
        }
        for identifier in identifiers {
            self.process_one(identifier, &mut dataset, &mut stats);
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = &self.progress {
            pb.finish_with_message(format!("{} profiles accepted", stats.accepted));
        }
        info!(
            "Accepted {} of {} profiles",
            stats.accepted, stats.candidates
        );

        PipelineOutcome { dataset, stats }
    }

    fn process_one(&self, identifier: &str, dataset: &mut Dataset, stats: &mut PipelineStats) {
        let file = match self.source.open(identifier) {
            Ok(file) => file,
            Err(e) => {
                warn!("Skipping {}: {}", identifier, e);
                stats.load_failures += 1;
                return;
            }
        };

        let record = match load_profile(identifier, &file) {
            Ok(LoadOutcome::Loaded(record)) => record,
            Ok(LoadOutcome::NoChlorophyll) => {
                stats.no_chlorophyll += 1;
                return;
            }
            Err(e) => {
                warn!("Skipping {}: {}", identifier, e);
                stats.load_failures += 1;
                return;
            }
        };
        stats.loaded += 1;

        if let QcVerdict::Reject { code, .. } = self.gate.evaluate(&record) {
            stats.record_rejection(code);
            return;
        }
        stats.qc_passed += 1;

        let resampled = self.resampler.resample(&record);
        if let Err(failure) = self
            .post_interpolation
            .check(resampled.column(Variable::Chla))
        {
            debug!(
                "{} failed post-interpolation check: {}",
                record.label(),
                failure.as_str()
            );
            stats.post_interpolation_rejected += 1;
            return;
        }

        let day_night = self.classifier.and_then(|classifier| {
            resampled
                .timestamp
                .map(|time| classifier.classify(resampled.latitude, resampled.longitude, time))
        });

        dataset.append(resampled, day_night);
        stats.accepted += 1;
    }
}
