//! StageSequencer: drives one build unit through the lifecycle stages in
//! their fixed order, applying guards and recording every outcome.

use std::path::{Path, PathBuf};

use prebuild_core::config::{Language, PropertyResolver};
use prebuild_core::constants::{PROP_ERROR_LOG, PROP_LANGUAGE};
use prebuild_core::errors::StageError;
use prebuild_core::events::types::{
    ResultsPublishedEvent, StageCompletedEvent, StageSkippedEvent, StageStartedEvent,
    StaleFactEvent,
};
use prebuild_core::events::EventDispatcher;
use prebuild_core::types::Stage;
use tracing::{debug, info, warn};

use super::compiler::Compiler;
use super::guards::{override_guard, results_guard, working_path, Guard, SkipReason};
use super::types::{SequenceReport, StageRecord, StageStatus};
use crate::facts::inspector::resolve_against;
use crate::facts::{FileProbe, ProjectFacts, ProjectInspector, RuleSetResolution};
use crate::overrides::{OverrideEngine, OverrideOutcome};
use crate::unit::BuildUnit;

/// One sequencer per build unit per build. Stages must be called in
/// declaration order of [`Stage`]; anything else is a `StageError`.
pub struct StageSequencer<'a> {
    resolver: &'a PropertyResolver,
    inspector: &'a ProjectInspector,
    probe: &'a dyn FileProbe,
    events: Option<&'a EventDispatcher>,
    next: Option<Stage>,
    rule_set: Option<RuleSetResolution>,
    facts: Option<ProjectFacts>,
    collected: Option<(PathBuf, Language)>,
    report: SequenceReport,
}

impl<'a> StageSequencer<'a> {
    pub fn new(
        resolver: &'a PropertyResolver,
        inspector: &'a ProjectInspector,
        probe: &'a dyn FileProbe,
    ) -> Self {
        Self {
            resolver,
            inspector,
            probe,
            events: None,
            next: Some(Stage::RuleSetResolution),
            rule_set: None,
            facts: None,
            collected: None,
            report: SequenceReport::default(),
        }
    }

    pub fn with_events(mut self, events: &'a EventDispatcher) -> Self {
        self.events = Some(events);
        self
    }

    /// The stage expected next, `None` once the sequence is finished.
    pub fn current(&self) -> Option<Stage> {
        self.next
    }

    pub fn report(&self) -> &SequenceReport {
        &self.report
    }

    pub fn into_report(self) -> SequenceReport {
        self.report
    }

    fn working_path(&self) -> Option<&'a Path> {
        working_path(self.resolver, self.inspector.config()).map(Path::new)
    }

    fn begin(&mut self, stage: Stage, unit: &BuildUnit) -> Result<(), StageError> {
        match self.next {
            Some(expected) if expected == stage => {}
            Some(expected) => {
                return Err(StageError::OutOfOrder {
                    expected: expected.to_string(),
                    actual: stage.to_string(),
                })
            }
            None => {
                return Err(StageError::Finished {
                    actual: stage.to_string(),
                })
            }
        }
        if self.report.project.as_os_str().is_empty() {
            self.report.project = unit.project_path().to_path_buf();
        }
        debug!(project = %unit.project_path().display(), stage = %stage, "stage started");
        if let Some(events) = self.events {
            events.emit_stage_started(&StageStartedEvent {
                project: unit.project_path().to_path_buf(),
                stage,
            });
        }
        Ok(())
    }

    fn complete(&mut self, stage: Stage, unit: &BuildUnit) {
        debug!(project = %unit.project_path().display(), stage = %stage, "stage completed");
        if let Some(events) = self.events {
            events.emit_stage_completed(&StageCompletedEvent {
                project: unit.project_path().to_path_buf(),
                stage,
            });
        }
        self.finish(stage, StageStatus::Completed);
    }

    fn skip(&mut self, stage: Stage, unit: &BuildUnit, reason: SkipReason) {
        let reason = reason.to_string();
        info!(
            project = %unit.project_path().display(),
            stage = %stage,
            reason = %reason,
            "stage skipped"
        );
        if let Some(events) = self.events {
            events.emit_stage_skipped(&StageSkippedEvent {
                project: unit.project_path().to_path_buf(),
                stage,
                reason: reason.clone(),
            });
        }
        self.finish(stage, StageStatus::Skipped { reason });
    }

    fn finish(&mut self, stage: Stage, status: StageStatus) {
        self.report.records.push(StageRecord { stage, status });
        self.next = stage.next();
    }

    pub fn resolve_rule_set(&mut self, unit: &BuildUnit) -> Result<(), StageError> {
        let stage = Stage::RuleSetResolution;
        self.begin(stage, unit)?;
        let working_path = self.working_path();
        self.rule_set = Some(self.inspector.resolve_rule_set(unit, working_path, self.probe));
        self.complete(stage, unit);
        Ok(())
    }

    pub fn classify_project(&mut self, unit: &BuildUnit) -> Result<(), StageError> {
        let stage = Stage::ProjectClassification;
        self.begin(stage, unit)?;
        let rule_set = self.rule_set.take().unwrap_or_default();
        let working_path = self.working_path();
        let facts = self.inspector.inspect(unit, rule_set, working_path, self.probe);
        self.report.classification = Some(facts.classification);
        self.facts = Some(facts);
        self.complete(stage, unit);
        Ok(())
    }

    /// Skipped without touching the unit when the working path is empty.
    /// Otherwise facts are re-checked, the engine runs, and its result is
    /// applied to the unit.
    pub fn override_analysis(&mut self, unit: &mut BuildUnit) -> Result<(), StageError> {
        let stage = Stage::AnalysisOverride;
        self.begin(stage, unit)?;
        if let Guard::Skip(reason) = override_guard(self.resolver, self.inspector.config()) {
            self.skip(stage, unit, reason);
            return Ok(());
        }

        let mut facts = match self.facts.take() {
            Some(facts) => facts,
            None => self.inspector.inspect_all(unit, self.working_path(), self.probe),
        };
        // Test and excluded projects are cleared without touching the disk.
        let stale = if facts.classification.is_analysable() {
            facts.revalidate(self.probe)
        } else {
            Vec::new()
        };
        for stale in stale {
            warn!(
                project = %unit.project_path().display(),
                path = %stale.path.display(),
                kind = stale.kind.as_str(),
                "file vanished since it was inspected; treating as missing"
            );
            if let Some(events) = self.events {
                events.emit_stale_fact(&StaleFactEvent {
                    project: unit.project_path().to_path_buf(),
                    path: stale.path.clone(),
                    kind: stale.kind.as_str().to_string(),
                });
            }
            self.report.stale_facts.push(stale);
        }

        let engine = OverrideEngine::new(self.inspector.config());
        if let OverrideOutcome::Resolved(settings) = engine.resolve(self.resolver, &facts) {
            unit.apply(&settings);
            self.report.resolved = Some(settings);
        }
        self.facts = Some(facts);
        self.complete(stage, unit);
        Ok(())
    }

    /// A compiler failure ends the sequence; later stages cannot run.
    pub fn compile(&mut self, unit: &BuildUnit, compiler: &dyn Compiler) -> Result<(), StageError> {
        let stage = Stage::Compilation;
        self.begin(stage, unit)?;
        if let Err(message) = compiler.compile(unit) {
            warn!(project = %unit.project_path().display(), error = %message, "compilation failed");
            self.next = None;
            return Err(StageError::Compilation(message));
        }
        self.complete(stage, unit);
        Ok(())
    }

    /// Picks up the diagnostic log the compiler wrote. A missing log means
    /// the analysis produced nothing and is a skip.
    pub fn collect_results(&mut self, unit: &BuildUnit) -> Result<(), StageError> {
        let stage = Stage::ResultsCollection;
        self.begin(stage, unit)?;
        let language = Language::from_property(unit.property(PROP_LANGUAGE));
        let error_log = unit
            .non_empty_property(PROP_ERROR_LOG)
            .map(|p| resolve_against(unit.project_dir(), PathBuf::from(p.trim())));
        let guard = results_guard(
            self.resolver,
            self.inspector.config(),
            language.is_some(),
            error_log.as_deref(),
            self.probe,
        );
        match (guard, error_log, language) {
            (Guard::Proceed, Some(path), Some(language)) => {
                self.collected = Some((path, language));
                self.complete(stage, unit);
            }
            (Guard::Skip(reason), _, _) => self.skip(stage, unit, reason),
            _ => self.skip(stage, unit, SkipReason::NothingCollected),
        }
        Ok(())
    }

    /// Republishes the collected log path under the language's results key.
    pub fn publish_results(&mut self, unit: &mut BuildUnit) -> Result<(), StageError> {
        let stage = Stage::ResultsPublication;
        self.begin(stage, unit)?;
        let Some((path, language)) = self.collected.take() else {
            self.skip(stage, unit, SkipReason::NothingCollected);
            return Ok(());
        };
        let key = self.inspector.config().report_setting_key(language);
        let value = path.to_string_lossy().into_owned();
        unit.set_analysis_setting(key.clone(), value.clone());
        if let Some(events) = self.events {
            events.emit_results_published(&ResultsPublishedEvent {
                project: unit.project_path().to_path_buf(),
                setting_key: key.clone(),
                report_path: path,
            });
        }
        self.report.published = Some((key, value));
        self.complete(stage, unit);
        Ok(())
    }

    /// The three stages that must finish before the compiler runs.
    pub fn run_until_compilation(&mut self, unit: &mut BuildUnit) -> Result<(), StageError> {
        self.resolve_rule_set(unit)?;
        self.classify_project(unit)?;
        self.override_analysis(unit)
    }

    /// The two stages that consume compiler output.
    pub fn run_after_compilation(&mut self, unit: &mut BuildUnit) -> Result<(), StageError> {
        self.collect_results(unit)?;
        self.publish_results(unit)
    }

    /// The whole lifecycle for one unit.
    pub fn run(
        mut self,
        unit: &mut BuildUnit,
        compiler: &dyn Compiler,
    ) -> Result<SequenceReport, StageError> {
        self.run_until_compilation(unit)?;
        self.compile(unit, compiler)?;
        self.run_after_compilation(unit)?;
        Ok(self.report)
    }
}
