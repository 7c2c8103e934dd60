//! Project facts and their building blocks.

use std::fmt;
use std::path::{Path, PathBuf};

use prebuild_core::config::Language;
use prebuild_core::types::SmallVec4;
use serde::Serialize;

use super::probe::FileProbe;

/// Whether analysis applies to a project at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectClassification {
    Normal,
    Test,
    Excluded,
}

impl ProjectClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Test => "test",
            Self::Excluded => "excluded",
        }
    }

    /// Only normal projects receive analysis settings.
    pub fn is_analysable(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl fmt::Display for ProjectClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a candidate file is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateKind {
    RuleSet,
    AnalyzerAssembly,
    AdditionalFile,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RuleSet => "rule-set",
            Self::AnalyzerAssembly => "analyzer-assembly",
            Self::AdditionalFile => "additional-file",
        }
    }
}

/// A path the scanner may contribute, with its observed existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub exists: bool,
}

impl CandidateFile {
    pub fn new(path: impl Into<PathBuf>, exists: bool) -> Self {
        Self {
            path: path.into(),
            exists,
        }
    }

    pub fn probe(path: PathBuf, probe: &dyn FileProbe) -> Self {
        let exists = probe.exists(&path);
        Self { path, exists }
    }
}

/// An analyzer item already declared on the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerItem {
    pub path: String,
    pub origin: Option<String>,
}

/// A fact that was true when captured and false when re-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleFact {
    pub path: PathBuf,
    pub kind: CandidateKind,
}

/// Output of the rule-set resolution stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSetResolution {
    /// Rule set already set on the project by an upstream consumer.
    pub existing: Option<String>,
    /// Scanner-provided rule set, absent when analysis is not active or the
    /// language is unknown.
    pub candidate: Option<CandidateFile>,
}

/// Snapshot of one project for one build. Built fresh, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFacts {
    pub project_path: PathBuf,
    pub language: Option<Language>,
    pub classification: ProjectClassification,
    pub existing_analyzer_items: Vec<AnalyzerItem>,
    pub existing_additional_files: Vec<String>,
    pub existing_rule_set_path: Option<String>,
    pub existing_error_log_path: Option<String>,
    pub rule_set: Option<CandidateFile>,
    pub analyzer_assemblies: SmallVec4<CandidateFile>,
    pub additional_files: SmallVec4<CandidateFile>,
    /// Output directory; the derived error log goes here.
    pub target_dir: PathBuf,
}

impl ProjectFacts {
    /// Minimal facts for a project with nothing declared and no candidates.
    pub fn new(project_path: impl Into<PathBuf>, classification: ProjectClassification) -> Self {
        let project_path = project_path.into();
        let target_dir = project_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            project_path,
            language: Some(Language::CSharp),
            classification,
            existing_analyzer_items: Vec::new(),
            existing_additional_files: Vec::new(),
            existing_rule_set_path: None,
            existing_error_log_path: None,
            rule_set: None,
            analyzer_assemblies: SmallVec4::new(),
            additional_files: SmallVec4::new(),
            target_dir,
        }
    }

    pub fn project_dir(&self) -> &Path {
        self.project_path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn rule_set_file_exists(&self) -> bool {
        self.rule_set.as_ref().is_some_and(|c| c.exists)
    }

    /// Re-check every candidate recorded as existing. Vanished files are
    /// downgraded to missing and returned as stale facts. Files that
    /// appeared since capture are left as missing.
    pub fn revalidate(&mut self, probe: &dyn FileProbe) -> Vec<StaleFact> {
        let mut stale = Vec::new();
        let mut check = |candidate: &mut CandidateFile, kind: CandidateKind| {
            if candidate.exists && !probe.exists(&candidate.path) {
                candidate.exists = false;
                stale.push(StaleFact {
                    path: candidate.path.clone(),
                    kind,
                });
            }
        };
        if let Some(rule_set) = self.rule_set.as_mut() {
            check(rule_set, CandidateKind::RuleSet);
        }
        for assembly in self.analyzer_assemblies.iter_mut() {
            check(assembly, CandidateKind::AnalyzerAssembly);
        }
        for file in self.additional_files.iter_mut() {
            check(file, CandidateKind::AdditionalFile);
        }
        stale
    }
}
