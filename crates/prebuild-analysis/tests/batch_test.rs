//! Tests for multi-project resolution.

use std::fs;

use prebuild_analysis::batch::{resolve_projects, BatchSummary};
use prebuild_analysis::facts::FsProbe;
use prebuild_analysis::BuildUnit;
use prebuild_core::config::{AnalysisConfig, PropertyResolver, PropertySource, SourceKind};
use prebuild_core::errors::PrebuildError;
use tempfile::TempDir;

fn resolver_with_temp(temp: &str) -> PropertyResolver {
    PropertyResolver::from_sources([PropertySource::from_entries(
        SourceKind::CommandLine,
        [("sonar.temp.path", temp)],
    )])
}

fn projects(dir: &TempDir) -> Vec<BuildUnit> {
    vec![
        BuildUnit::new(dir.path().join("App").join("App.csproj")),
        BuildUnit::new(dir.path().join("Lib").join("Lib.vbproj")).with_property("Language", "VB"),
        BuildUnit::new(dir.path().join("App.Tests").join("App.Tests.csproj")),
        BuildUnit::new(dir.path().join("Tools").join("Tools.csproj"))
            .with_property("SonarQubeExclude", "true"),
    ]
}

#[test]
fn test_batch_classifies_and_resolves_every_project() {
    let dir = TempDir::new().unwrap();
    let temp = dir.path().join(".sonarqube");
    fs::create_dir_all(&temp).unwrap();
    fs::write(temp.join("SonarLint.dll"), b"x").unwrap();
    let resolver = resolver_with_temp(&temp.to_string_lossy());

    let outcome =
        resolve_projects(projects(&dir), &resolver, &AnalysisConfig::default(), &FsProbe).unwrap();

    assert_eq!(
        outcome.summary,
        BatchSummary {
            analysable: 2,
            test: 1,
            excluded: 1,
            not_activated: 0,
        }
    );
    assert!(outcome.summary.has_analysable_projects());
    assert_eq!(outcome.summary.total(), 4);
    assert_eq!(outcome.reports.len(), 4);

    // Input order is kept.
    for (unit, report) in outcome.units.iter().zip(&outcome.reports) {
        assert_eq!(unit.project_path(), report.project.as_path());
    }
    let dll = temp.join("SonarLint.dll").to_string_lossy().into_owned();
    assert_eq!(outcome.units[0].item_includes("Analyzer"), vec![dll.clone()]);
    assert_eq!(outcome.units[1].item_includes("Analyzer"), vec![dll]);
    assert!(outcome.units[2].item_includes("Analyzer").is_empty());
    assert_eq!(outcome.units[3].property("ErrorLog"), Some(""));
}

#[test]
fn test_batch_without_working_path_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let units = projects(&dir);

    let outcome = resolve_projects(
        units.clone(),
        &PropertyResolver::empty(),
        &AnalysisConfig::default(),
        &FsProbe,
    )
    .unwrap();

    assert_eq!(outcome.units, units);
    assert_eq!(outcome.summary.not_activated, 4);
}

#[test]
fn test_batch_with_only_test_projects_has_nothing_analysable() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_with_temp(&dir.path().to_string_lossy());
    let units = vec![
        BuildUnit::new(dir.path().join("A.Tests.csproj")),
        BuildUnit::new(dir.path().join("B.csproj")).with_property("SonarQubeTestProject", "true"),
    ];

    let outcome = resolve_projects(units, &resolver, &AnalysisConfig::default(), &FsProbe).unwrap();

    assert!(!outcome.summary.has_analysable_projects());
    assert_eq!(outcome.summary.test, 2);
}

#[test]
fn test_batch_rejects_invalid_config() {
    let config = AnalysisConfig {
        test_project_pattern: Some("(".to_string()),
        ..Default::default()
    };
    let err = resolve_projects(Vec::new(), &PropertyResolver::empty(), &config, &FsProbe)
        .unwrap_err();
    assert!(matches!(err, PrebuildError::Config(_)));
}
