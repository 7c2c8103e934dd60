//! OverrideEngine: decides the analysis settings for one project.

use std::path::Path;

use prebuild_core::config::{AnalysisConfig, PropertyResolver};
use tracing::debug;

use super::filename::{dedup_preserving_order, remove_well_known};
use super::types::{OverrideOutcome, ResolvedAnalysisSettings};
use crate::facts::inspector::resolve_against;
use crate::facts::{CandidateFile, ProjectFacts};
use crate::stages::guards::working_path;

/// Pure function of (resolved settings, project facts). Performs no I/O and
/// holds no mutable state, so it can run concurrently for many projects and
/// be re-invoked with identical results.
#[derive(Debug, Clone, Copy)]
pub struct OverrideEngine<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> OverrideEngine<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// True when the working path setting is non-empty.
    pub fn is_activated(&self, resolver: &PropertyResolver) -> bool {
        working_path(resolver, self.config).is_some()
    }

    pub fn resolve(&self, resolver: &PropertyResolver, facts: &ProjectFacts) -> OverrideOutcome {
        if !self.is_activated(resolver) {
            debug!(project = %facts.project_path.display(), "override not activated");
            return OverrideOutcome::NotActivated;
        }
        if !facts.classification.is_analysable() {
            debug!(
                project = %facts.project_path.display(),
                classification = %facts.classification,
                "analysis disabled for project"
            );
            return OverrideOutcome::Resolved(ResolvedAnalysisSettings::cleared());
        }

        let resolved_rule_set_path = self.resolve_rule_set(facts);
        let (analyzer_items, analyzers_found) = self.resolve_analyzers(facts);
        let additional_file_items = self.resolve_additional_files(facts);
        let error_log_path =
            self.resolve_error_log(facts, resolved_rule_set_path.is_some() || analyzers_found);

        OverrideOutcome::Resolved(ResolvedAnalysisSettings {
            error_log_path,
            resolved_rule_set_path,
            analyzer_items,
            additional_file_items,
            suppress_warnings_as_errors: true,
        })
    }

    /// Existing value wins verbatim. Otherwise the scanner's rule set if it
    /// exists, resolved against the project directory; otherwise none.
    fn resolve_rule_set(&self, facts: &ProjectFacts) -> Option<String> {
        if let Some(existing) = non_empty(facts.existing_rule_set_path.as_deref()) {
            return Some(existing.to_string());
        }
        facts
            .rule_set
            .as_ref()
            .filter(|candidate| candidate.exists)
            .map(|candidate| path_string(&resolve_against(facts.project_dir(), candidate.path.clone())))
    }

    /// Existing value wins verbatim. Otherwise a fixed file name under the
    /// target directory when the project will actually be analyzed.
    fn resolve_error_log(&self, facts: &ProjectFacts, eligible: bool) -> Option<String> {
        if let Some(existing) = non_empty(facts.existing_error_log_path.as_deref()) {
            return Some(existing.to_string());
        }
        eligible.then(|| {
            path_string(
                &facts
                    .target_dir
                    .join(self.config.effective_error_log_file_name()),
            )
        })
    }

    /// Custom analyzers are kept; well-known ones are replaced by the
    /// scanner's copies that exist. Returns whether any copy was found.
    fn resolve_analyzers(&self, facts: &ProjectFacts) -> (Vec<String>, bool) {
        let names = self.config.effective_well_known_analyzers();
        let mut items = remove_well_known(
            facts.existing_analyzer_items.iter().map(|i| i.path.as_str()),
            &names,
        );
        let found = existing_paths(&facts.analyzer_assemblies);
        let any_found = !found.is_empty();
        items.extend(found);
        (dedup_preserving_order(items), any_found)
    }

    /// The scanner's additional files replace the project's entirely once
    /// any of them is found. Otherwise only well-known names are dropped.
    fn resolve_additional_files(&self, facts: &ProjectFacts) -> Vec<String> {
        let found = existing_paths(&facts.additional_files);
        if !found.is_empty() {
            return dedup_preserving_order(found);
        }
        let names = self.config.effective_well_known_additional_files();
        let items = remove_well_known(
            facts.existing_additional_files.iter().map(String::as_str),
            &names,
        );
        dedup_preserving_order(items)
    }
}

fn existing_paths(candidates: &[CandidateFile]) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| c.exists)
        .map(|c| path_string(&c.path))
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
