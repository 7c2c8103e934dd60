//! Tests for stage ordering, guards, and results publication.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use prebuild_analysis::facts::{CandidateKind, FileProbe, FsProbe, ProjectInspector};
use prebuild_analysis::stages::{Stage, StageSequencer, StageStatus};
use prebuild_analysis::BuildUnit;
use prebuild_core::config::{AnalysisConfig, PropertyResolver, PropertySource, SourceKind};
use prebuild_core::errors::{PrebuildErrorCode, StageError};
use prebuild_core::events::types::*;
use prebuild_core::events::{EventDispatcher, StageEventHandler};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingHandler {
    log: Mutex<Vec<String>>,
}

impl RecordingHandler {
    fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl StageEventHandler for RecordingHandler {
    fn on_stage_started(&self, event: &StageStartedEvent) {
        self.log.lock().unwrap().push(format!("start {}", event.stage));
    }

    fn on_stage_completed(&self, event: &StageCompletedEvent) {
        self.log.lock().unwrap().push(format!("done {}", event.stage));
    }

    fn on_stage_skipped(&self, event: &StageSkippedEvent) {
        self.log.lock().unwrap().push(format!("skip {}", event.stage));
    }

    fn on_stale_fact(&self, event: &StaleFactEvent) {
        self.log.lock().unwrap().push(format!("stale {}", event.kind));
    }

    fn on_results_published(&self, event: &ResultsPublishedEvent) {
        self.log
            .lock()
            .unwrap()
            .push(format!("published {}", event.setting_key));
    }
}

/// Filesystem probe that counts how often it is asked.
#[derive(Default)]
struct CountingProbe {
    calls: AtomicUsize,
}

impl CountingProbe {
    fn take_calls(&self) -> usize {
        self.calls.swap(0, Ordering::SeqCst)
    }
}

impl FileProbe for CountingProbe {
    fn exists(&self, path: &Path) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        FsProbe.exists(path)
    }
}

struct Fixture {
    dir: TempDir,
    temp: PathBuf,
}

impl Fixture {
    /// Working directory populated with the rule set and both analyzers.
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().join(".sonarqube");
        for file in [
            temp.join("conf").join("SonarQubeRoslyn-cs.ruleset"),
            temp.join("conf").join("SonarLint.xml"),
            temp.join("SonarLint.dll"),
            temp.join("SonarLint.CSharp.dll"),
        ] {
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(&file, b"x").unwrap();
        }
        Self { dir, temp }
    }

    fn resolver(&self) -> PropertyResolver {
        resolver_with_temp(&self.temp.to_string_lossy())
    }

    fn unit(&self) -> BuildUnit {
        BuildUnit::new(self.dir.path().join("app").join("App.csproj"))
            .with_property("TargetDir", "bin")
            .with_property("TreatWarningsAsErrors", "true")
            .with_item("Analyzer", "custom.dll")
            .with_item("Analyzer", r"c:\old\SonarLint.dll")
    }
}

fn resolver_with_temp(temp: &str) -> PropertyResolver {
    PropertyResolver::from_sources([PropertySource::from_entries(
        SourceKind::CommandLine,
        [("sonar.temp.path", temp)],
    )])
}

fn inspector() -> ProjectInspector {
    ProjectInspector::new(AnalysisConfig::default()).unwrap()
}

/// Writes a diagnostic log wherever the unit's `ErrorLog` points.
fn writing_compiler(unit: &BuildUnit) -> Result<(), String> {
    if let Some(log) = unit.non_empty_property("ErrorLog") {
        let path = Path::new(log);
        fs::create_dir_all(path.parent().unwrap()).map_err(|e| e.to_string())?;
        fs::write(path, b"{}").map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn silent_compiler(_unit: &BuildUnit) -> Result<(), String> {
    Ok(())
}

#[test]
fn test_full_run_applies_settings_and_publishes_results() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();
    let inspector = inspector();
    let handler = Arc::new(RecordingHandler::default());
    let mut events = EventDispatcher::new();
    events.register(handler.clone());

    let mut unit = fixture.unit();
    let report = StageSequencer::new(&resolver, &inspector, &FsProbe)
        .with_events(&events)
        .run(&mut unit, &writing_compiler)
        .unwrap();

    let expected_log = fixture
        .dir
        .path()
        .join("app")
        .join("bin")
        .join("SonarQube.Roslyn.ErrorLog.json");
    assert_eq!(
        unit.property("ErrorLog"),
        Some(expected_log.to_string_lossy().as_ref())
    );
    assert_eq!(
        unit.item_includes("Analyzer"),
        vec![
            "custom.dll".to_string(),
            fixture.temp.join("SonarLint.dll").to_string_lossy().into_owned(),
            fixture
                .temp
                .join("SonarLint.CSharp.dll")
                .to_string_lossy()
                .into_owned(),
        ]
    );
    assert_eq!(unit.item_includes("AdditionalFiles").len(), 1);
    assert_eq!(unit.property("TreatWarningsAsErrors"), Some("false"));
    assert_eq!(
        unit.analysis_setting("sonar.cs.roslyn.reportFilePath"),
        Some(expected_log.to_string_lossy().as_ref())
    );
    assert_eq!(report.executed_stages(), Stage::all().to_vec());
    assert!(report.is_clean());
    assert!(report.published.is_some());

    assert_eq!(
        handler.entries(),
        vec![
            "start rule-set-resolution",
            "done rule-set-resolution",
            "start project-classification",
            "done project-classification",
            "start analysis-override",
            "done analysis-override",
            "start compilation",
            "done compilation",
            "start results-collection",
            "done results-collection",
            "start results-publication",
            "published sonar.cs.roslyn.reportFilePath",
            "done results-publication",
        ]
    );
}

#[test]
fn test_empty_working_path_skips_override_and_collection() {
    let fixture = Fixture::new();
    let resolver = resolver_with_temp("");
    let inspector = inspector();

    // A diagnostic log already on disk must not be picked up.
    let existing_log = fixture.dir.path().join("existing.json");
    fs::write(&existing_log, b"{}").unwrap();
    let original = fixture
        .unit()
        .with_property("ErrorLog", existing_log.to_string_lossy());
    let mut unit = original.clone();

    let report = StageSequencer::new(&resolver, &inspector, &FsProbe)
        .run(&mut unit, &silent_compiler)
        .unwrap();

    assert_eq!(unit, original);
    assert!(report.was_skipped(Stage::AnalysisOverride));
    assert!(report.was_skipped(Stage::ResultsCollection));
    assert!(report.was_skipped(Stage::ResultsPublication));
    assert_eq!(report.status_of(Stage::Compilation), Some(&StageStatus::Completed));
    assert!(report.resolved.is_none());
    assert!(report.published.is_none());
}

#[test]
fn test_missing_results_file_skips_collection() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();
    let inspector = inspector();

    let mut unit = fixture.unit();
    let report = StageSequencer::new(&resolver, &inspector, &FsProbe)
        .run(&mut unit, &silent_compiler)
        .unwrap();

    assert_eq!(
        report.status_of(Stage::AnalysisOverride),
        Some(&StageStatus::Completed)
    );
    assert!(report.was_skipped(Stage::ResultsCollection));
    assert!(unit.analysis_settings().is_empty());
}

#[test]
fn test_test_project_is_cleared_and_publishes_nothing() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();
    let inspector = inspector();

    let mut unit = fixture.unit().with_property("SonarQubeTestProject", "true");
    let report = StageSequencer::new(&resolver, &inspector, &FsProbe)
        .run(&mut unit, &writing_compiler)
        .unwrap();

    assert_eq!(unit.property("ErrorLog"), Some(""));
    assert_eq!(unit.property("ResolvedCodeAnalysisRuleset"), Some(""));
    assert!(unit.item_includes("Analyzer").is_empty());
    assert!(unit.item_includes("AdditionalFiles").is_empty());
    assert_eq!(unit.property("TreatWarningsAsErrors"), Some("true"));
    assert!(report.was_skipped(Stage::ResultsCollection));
}

#[test]
fn test_vanished_assembly_is_reported_as_stale() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();
    let inspector = inspector();
    let handler = Arc::new(RecordingHandler::default());
    let mut events = EventDispatcher::new();
    events.register(handler.clone());

    let mut unit = fixture.unit();
    let mut sequencer = StageSequencer::new(&resolver, &inspector, &FsProbe).with_events(&events);
    sequencer.resolve_rule_set(&unit).unwrap();
    sequencer.classify_project(&unit).unwrap();
    fs::remove_file(fixture.temp.join("SonarLint.CSharp.dll")).unwrap();
    sequencer.override_analysis(&mut unit).unwrap();

    let report = sequencer.into_report();
    assert_eq!(report.stale_facts.len(), 1);
    assert_eq!(report.stale_facts[0].kind, CandidateKind::AnalyzerAssembly);
    assert_eq!(
        unit.item_includes("Analyzer"),
        vec![
            "custom.dll".to_string(),
            fixture.temp.join("SonarLint.dll").to_string_lossy().into_owned(),
        ]
    );
    assert!(handler
        .entries()
        .contains(&"stale analyzer-assembly".to_string()));
}

#[test]
fn test_out_of_order_stage_is_rejected() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();
    let inspector = inspector();
    let mut unit = fixture.unit();

    let mut sequencer = StageSequencer::new(&resolver, &inspector, &FsProbe);
    let err = sequencer.override_analysis(&mut unit).unwrap_err();
    assert_eq!(
        err,
        StageError::OutOfOrder {
            expected: "rule-set-resolution".to_string(),
            actual: "analysis-override".to_string(),
        }
    );
    assert_eq!(sequencer.current(), Some(Stage::RuleSetResolution));
    assert_eq!(unit, fixture.unit());
}

#[test]
fn test_finished_sequence_rejects_further_stages() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();
    let inspector = inspector();
    let mut unit = fixture.unit();

    let mut sequencer = StageSequencer::new(&resolver, &inspector, &FsProbe);
    sequencer.run_until_compilation(&mut unit).unwrap();
    sequencer.compile(&unit, &silent_compiler).unwrap();
    sequencer.run_after_compilation(&mut unit).unwrap();
    assert_eq!(sequencer.current(), None);

    let err = sequencer.resolve_rule_set(&unit).unwrap_err();
    assert!(matches!(err, StageError::Finished { .. }));
    assert_eq!(err.error_code(), "STAGE_ORDER");
}

#[test]
fn test_compiler_failure_ends_sequence() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();
    let inspector = inspector();
    let mut unit = fixture.unit();

    let failing = |_: &BuildUnit| -> Result<(), String> { Err("csc exited with 1".to_string()) };
    let mut sequencer = StageSequencer::new(&resolver, &inspector, &FsProbe);
    sequencer.run_until_compilation(&mut unit).unwrap();
    let err = sequencer.compile(&unit, &failing).unwrap_err();

    assert_eq!(err, StageError::Compilation("csc exited with 1".to_string()));
    assert!(matches!(
        sequencer.collect_results(&unit),
        Err(StageError::Finished { .. })
    ));
}

#[test]
fn test_unknown_language_publishes_nothing() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();
    let inspector = inspector();

    let mut unit = fixture.unit().with_property("Language", "F#");
    let report = StageSequencer::new(&resolver, &inspector, &FsProbe)
        .run(&mut unit, &writing_compiler)
        .unwrap();

    assert!(report.was_skipped(Stage::ResultsCollection));
    assert!(unit.analysis_settings().is_empty());
}

#[test]
fn test_test_project_override_does_not_touch_disk() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();
    let inspector = inspector();
    let probe = CountingProbe::default();

    let mut unit = fixture.unit().with_property("SonarQubeTestProject", "true");
    let mut sequencer = StageSequencer::new(&resolver, &inspector, &probe);
    sequencer.resolve_rule_set(&unit).unwrap();
    sequencer.classify_project(&unit).unwrap();
    fs::remove_file(fixture.temp.join("conf").join("SonarQubeRoslyn-cs.ruleset")).unwrap();
    probe.take_calls();

    sequencer.override_analysis(&mut unit).unwrap();

    assert_eq!(probe.take_calls(), 0);
    let report = sequencer.into_report();
    assert!(report.is_clean());
    assert!(report.resolved.unwrap().is_cleared());
}
