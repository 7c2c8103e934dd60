//! Build lifecycle stages, in the order they must run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One point in the build lifecycle. Declaration order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    RuleSetResolution,
    ProjectClassification,
    AnalysisOverride,
    Compilation,
    ResultsCollection,
    ResultsPublication,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RuleSetResolution => "rule-set-resolution",
            Self::ProjectClassification => "project-classification",
            Self::AnalysisOverride => "analysis-override",
            Self::Compilation => "compilation",
            Self::ResultsCollection => "results-collection",
            Self::ResultsPublication => "results-publication",
        }
    }

    pub fn all() -> &'static [Stage] {
        &[
            Self::RuleSetResolution,
            Self::ProjectClassification,
            Self::AnalysisOverride,
            Self::Compilation,
            Self::ResultsCollection,
            Self::ResultsPublication,
        ]
    }

    /// The stage that follows this one, `None` after publication.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Self::RuleSetResolution => Some(Self::ProjectClassification),
            Self::ProjectClassification => Some(Self::AnalysisOverride),
            Self::AnalysisOverride => Some(Self::Compilation),
            Self::Compilation => Some(Self::ResultsCollection),
            Self::ResultsCollection => Some(Self::ResultsPublication),
            Self::ResultsPublication => None,
        }
    }

    /// True for the stage driven by the external compiler.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::Compilation)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
