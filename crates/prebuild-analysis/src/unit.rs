//! In-memory model of one build unit (project): string properties, ordered
//! items, and the analysis settings published for downstream tooling.

use std::path::{Path, PathBuf};

use prebuild_core::constants::{
    ITEM_ADDITIONAL_FILES, ITEM_ANALYZER, PROP_ERROR_LOG, PROP_RESOLVED_RULESET,
    PROP_TREAT_WARNINGS_AS_ERRORS, PROP_WARNINGS_AS_ERRORS,
};
use prebuild_core::types::FxHashMap;

use crate::overrides::ResolvedAnalysisSettings;

/// One `(kind, include)` item, e.g. an `Analyzer` pointing at a dll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildItem {
    pub kind: String,
    pub include: String,
    /// File that declared the item, when known.
    pub origin: Option<String>,
}

impl BuildItem {
    pub fn new(kind: impl Into<String>, include: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            include: include.into(),
            origin: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildUnit {
    project_path: PathBuf,
    properties: FxHashMap<String, String>,
    items: Vec<BuildItem>,
    analysis_settings: Vec<(String, String)>,
}

impl BuildUnit {
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            properties: FxHashMap::default(),
            items: Vec::new(),
            analysis_settings: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(name, value);
        self
    }

    pub fn with_item(mut self, kind: impl Into<String>, include: impl Into<String>) -> Self {
        self.items.push(BuildItem::new(kind, include));
        self
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Directory containing the project file; relative paths resolve here.
    pub fn project_dir(&self) -> &Path {
        self.project_path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// The property value if present and not blank.
    pub fn non_empty_property(&self, name: &str) -> Option<&str> {
        self.property(name).filter(|v| !v.trim().is_empty())
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn add_item(&mut self, item: BuildItem) {
        self.items.push(item);
    }

    pub fn items(&self, kind: &str) -> impl Iterator<Item = &BuildItem> {
        let kind = kind.to_string();
        self.items.iter().filter(move |item| item.kind == kind)
    }

    pub fn item_includes(&self, kind: &str) -> Vec<String> {
        self.items(kind).map(|item| item.include.clone()).collect()
    }

    /// Replace every item of `kind` with `includes`, keeping other kinds.
    pub fn replace_items(&mut self, kind: &str, includes: &[String]) {
        self.items.retain(|item| item.kind != kind);
        self.items
            .extend(includes.iter().map(|include| BuildItem::new(kind, include.clone())));
    }

    pub fn analysis_settings(&self) -> &[(String, String)] {
        &self.analysis_settings
    }

    pub fn analysis_setting(&self, key: &str) -> Option<&str> {
        self.analysis_settings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Publish a setting, replacing any earlier value for the same key.
    pub fn set_analysis_setting(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.analysis_settings.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.analysis_settings.push((key, value)),
        }
    }

    /// Write resolved settings onto the unit. Absent paths become empty
    /// properties; analyzer and additional-file items are replaced.
    pub fn apply(&mut self, settings: &ResolvedAnalysisSettings) {
        self.set_property(
            PROP_ERROR_LOG,
            settings.error_log_path.clone().unwrap_or_default(),
        );
        self.set_property(
            PROP_RESOLVED_RULESET,
            settings.resolved_rule_set_path.clone().unwrap_or_default(),
        );
        self.replace_items(ITEM_ANALYZER, &settings.analyzer_items);
        self.replace_items(ITEM_ADDITIONAL_FILES, &settings.additional_file_items);
        if settings.suppress_warnings_as_errors {
            self.set_property(PROP_TREAT_WARNINGS_AS_ERRORS, "false");
            self.set_property(PROP_WARNINGS_AS_ERRORS, "");
        }
    }
}
