//! Pre-compilation stages for every project of a multi-project build.
//! Projects are independent; they share only read-only settings.

use prebuild_core::config::{AnalysisConfig, PropertyResolver};
use prebuild_core::errors::{PrebuildError, StageError};
use prebuild_core::events::EventDispatcher;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::facts::{FileProbe, ProjectClassification, ProjectInspector};
use crate::stages::{SequenceReport, StageSequencer};
use crate::unit::BuildUnit;

/// Per-classification project counts for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub analysable: usize,
    pub test: usize,
    pub excluded: usize,
    /// Projects left untouched because the working path was empty.
    pub not_activated: usize,
}

impl BatchSummary {
    pub fn has_analysable_projects(&self) -> bool {
        self.analysable > 0
    }

    pub fn total(&self) -> usize {
        self.analysable + self.test + self.excluded
    }

    fn record(&mut self, report: &SequenceReport) {
        match report.classification {
            Some(ProjectClassification::Normal) => self.analysable += 1,
            Some(ProjectClassification::Test) => self.test += 1,
            Some(ProjectClassification::Excluded) => self.excluded += 1,
            None => {}
        }
        if report.resolved.is_none() {
            self.not_activated += 1;
        }
    }
}

/// Units ready for compilation, with one report per unit in input order.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub units: Vec<BuildUnit>,
    pub reports: Vec<SequenceReport>,
    pub summary: BatchSummary,
}

/// Run rule-set resolution, classification and the analysis override for
/// every unit in parallel.
pub fn resolve_projects(
    units: Vec<BuildUnit>,
    resolver: &PropertyResolver,
    config: &AnalysisConfig,
    probe: &dyn FileProbe,
) -> Result<BatchOutcome, PrebuildError> {
    resolve_projects_with_events(units, resolver, config, probe, None)
}

pub fn resolve_projects_with_events(
    mut units: Vec<BuildUnit>,
    resolver: &PropertyResolver,
    config: &AnalysisConfig,
    probe: &dyn FileProbe,
    events: Option<&EventDispatcher>,
) -> Result<BatchOutcome, PrebuildError> {
    let inspector = ProjectInspector::new(config.clone())?;

    let reports = units
        .par_iter_mut()
        .map(|unit| -> Result<SequenceReport, StageError> {
            let mut sequencer = StageSequencer::new(resolver, &inspector, probe);
            if let Some(events) = events {
                sequencer = sequencer.with_events(events);
            }
            sequencer.run_until_compilation(unit)?;
            Ok(sequencer.into_report())
        })
        .collect::<Result<Vec<_>, StageError>>()?;

    let mut summary = BatchSummary::default();
    for report in &reports {
        summary.record(report);
    }
    info!(
        projects = units.len(),
        analysable = summary.analysable,
        test = summary.test,
        excluded = summary.excluded,
        "projects resolved"
    );
    if !summary.has_analysable_projects() {
        warn!("No analysable projects were found");
    }

    Ok(BatchOutcome {
        units,
        reports,
        summary,
    })
}
