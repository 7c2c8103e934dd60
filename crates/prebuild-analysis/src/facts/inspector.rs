//! Builds `ProjectFacts` from a build unit and the filesystem.

use std::path::{Path, PathBuf};

use prebuild_core::config::{AnalysisConfig, Language};
use prebuild_core::constants::{
    ITEM_ADDITIONAL_FILES, ITEM_ANALYZER, MSTEST_PROJECT_TYPE_GUID, PROP_ERROR_LOG, PROP_EXCLUDE,
    PROP_LANGUAGE, PROP_PROJECT_TYPE_GUIDS, PROP_RESOLVED_RULESET, PROP_TARGET_DIR,
    PROP_TEST_PROJECT,
};
use prebuild_core::errors::ConfigError;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use super::probe::FileProbe;
use super::types::*;
use crate::unit::BuildUnit;

/// Classifies projects and captures the file facts the override engine
/// needs. Holds no per-project state, so one inspector serves a whole build.
#[derive(Debug, Clone)]
pub struct ProjectInspector {
    config: AnalysisConfig,
    test_pattern: Regex,
}

impl ProjectInspector {
    /// Fails when the configured test project pattern is not a valid regex.
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        let pattern = config.effective_test_project_pattern();
        let test_pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "test_project_pattern".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            config,
            test_pattern,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Excluded wins over test; anything else is normal.
    pub fn classify(&self, unit: &BuildUnit) -> ProjectClassification {
        if is_true(unit.property(PROP_EXCLUDE)) {
            return ProjectClassification::Excluded;
        }
        if is_true(unit.property(PROP_TEST_PROJECT)) || self.has_test_type_guid(unit) {
            return ProjectClassification::Test;
        }
        let file_name = unit
            .project_path()
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if self.test_pattern.is_match(&file_name) {
            return ProjectClassification::Test;
        }
        ProjectClassification::Normal
    }

    fn has_test_type_guid(&self, unit: &BuildUnit) -> bool {
        unit.property(PROP_PROJECT_TYPE_GUIDS).is_some_and(|guids| {
            guids
                .split(';')
                .map(|g| g.trim().trim_start_matches('{').trim_end_matches('}'))
                .any(|g| g.eq_ignore_ascii_case(MSTEST_PROJECT_TYPE_GUID))
        })
    }

    /// Rule-set stage: the project's existing rule set plus the scanner's
    /// candidate for its language, probed for existence.
    pub fn resolve_rule_set(
        &self,
        unit: &BuildUnit,
        working_path: Option<&Path>,
        probe: &dyn FileProbe,
    ) -> RuleSetResolution {
        let existing = unit.non_empty_property(PROP_RESOLVED_RULESET).map(str::to_string);
        let language = Language::from_property(unit.property(PROP_LANGUAGE));
        let candidate = match (working_path, language) {
            (Some(temp), Some(language)) => {
                let path = resolve_against(unit.project_dir(), self.config.ruleset_path(temp, language));
                Some(CandidateFile::probe(path, probe))
            }
            _ => None,
        };
        debug!(
            project = %unit.project_path().display(),
            has_existing = existing.is_some(),
            candidate_exists = candidate.as_ref().is_some_and(|c| c.exists),
            "rule set resolved"
        );
        RuleSetResolution {
            existing,
            candidate,
        }
    }

    /// Classification stage: everything else the engine needs. Analyzer and
    /// additional-file candidates are only probed for normal projects.
    pub fn inspect(
        &self,
        unit: &BuildUnit,
        rule_set: RuleSetResolution,
        working_path: Option<&Path>,
        probe: &dyn FileProbe,
    ) -> ProjectFacts {
        let classification = self.classify(unit);
        let project_dir = unit.project_dir();

        let mut facts = ProjectFacts::new(unit.project_path(), classification);
        facts.language = Language::from_property(unit.property(PROP_LANGUAGE));
        facts.existing_analyzer_items = unit
            .items(ITEM_ANALYZER)
            .map(|item| AnalyzerItem {
                path: item.include.clone(),
                origin: item.origin.clone(),
            })
            .collect();
        facts.existing_additional_files = unit.item_includes(ITEM_ADDITIONAL_FILES);
        facts.existing_rule_set_path = rule_set.existing;
        facts.existing_error_log_path = unit.non_empty_property(PROP_ERROR_LOG).map(str::to_string);
        facts.rule_set = rule_set.candidate;
        facts.target_dir = unit
            .non_empty_property(PROP_TARGET_DIR)
            .map(|dir| resolve_against(project_dir, PathBuf::from(dir)))
            .unwrap_or_else(|| project_dir.to_path_buf());

        if let (Some(temp), true) = (working_path, classification.is_analysable()) {
            facts.analyzer_assemblies = self
                .config
                .analyzer_paths(temp)
                .into_iter()
                .map(|p| CandidateFile::probe(resolve_against(project_dir, p), probe))
                .collect();
            facts.additional_files = self
                .config
                .additional_file_paths(temp)
                .into_iter()
                .map(|p| CandidateFile::probe(resolve_against(project_dir, p), probe))
                .collect();
        }

        debug!(
            project = %unit.project_path().display(),
            classification = %classification,
            "project inspected"
        );
        facts
    }

    /// Both stages at once, for callers that do not drive the sequencer.
    pub fn inspect_all(
        &self,
        unit: &BuildUnit,
        working_path: Option<&Path>,
        probe: &dyn FileProbe,
    ) -> ProjectFacts {
        let rule_set = self.resolve_rule_set(unit, working_path, probe);
        self.inspect(unit, rule_set, working_path, probe)
    }
}

fn is_true(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Join relative paths onto `base`; absolute paths pass through.
pub(crate) fn resolve_against(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}
