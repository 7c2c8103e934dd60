//! Analysis configuration: the agreed names and file conventions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::resolver::PropertyResolver;
use crate::constants;
use crate::errors::ConfigError;

/// Source language of a build unit, which picks the rule-set file and the
/// results setting key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    CSharp,
    VisualBasic,
}

impl Language {
    /// Short key used in file names and setting keys.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CSharp => "cs",
            Self::VisualBasic => "vbnet",
        }
    }

    /// Interpret the build unit's `Language` property. Absent means C#;
    /// unrecognised values yield `None`.
    pub fn from_property(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            None | Some("") => Some(Self::CSharp),
            Some(v) if v.eq_ignore_ascii_case("C#") || v.eq_ignore_ascii_case("cs") => {
                Some(Self::CSharp)
            }
            Some(v) if v.eq_ignore_ascii_case("VB") || v.eq_ignore_ascii_case("vbnet") => {
                Some(Self::VisualBasic)
            }
            Some(_) => None,
        }
    }
}

/// Configurable constants for the override engine and stage sequencer.
/// Every field falls back to a compiled default from `constants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Setting key holding the working path. Default: `sonar.temp.path`.
    pub temp_path_key: Option<String>,
    /// Diagnostic log file name under the target directory.
    pub error_log_file_name: Option<String>,
    /// Well-known analyzer assembly file names, in the order they are added.
    pub well_known_analyzers: Vec<String>,
    /// Well-known additional file names.
    pub well_known_additional_files: Vec<String>,
    /// Configuration sub-directory of the working path. Default: `conf`.
    pub conf_dir_name: Option<String>,
    /// Rule-set file name prefix. Default: `SonarQubeRoslyn-`.
    pub ruleset_prefix: Option<String>,
    /// Results setting key template containing `{lang}`.
    pub report_setting_template: Option<String>,
    /// Regex recognising test projects by file name.
    pub test_project_pattern: Option<String>,
}

impl AnalysisConfig {
    pub fn effective_temp_path_key(&self) -> &str {
        self.temp_path_key
            .as_deref()
            .unwrap_or(constants::DEFAULT_TEMP_PATH_KEY)
    }

    pub fn effective_error_log_file_name(&self) -> &str {
        self.error_log_file_name
            .as_deref()
            .unwrap_or(constants::DEFAULT_ERROR_LOG_FILE_NAME)
    }

    pub fn effective_well_known_analyzers(&self) -> Vec<String> {
        or_defaults(&self.well_known_analyzers, constants::DEFAULT_WELL_KNOWN_ANALYZERS)
    }

    pub fn effective_well_known_additional_files(&self) -> Vec<String> {
        or_defaults(
            &self.well_known_additional_files,
            constants::DEFAULT_WELL_KNOWN_ADDITIONAL_FILES,
        )
    }

    pub fn effective_conf_dir_name(&self) -> &str {
        self.conf_dir_name
            .as_deref()
            .unwrap_or(constants::DEFAULT_CONF_DIR_NAME)
    }

    pub fn effective_ruleset_prefix(&self) -> &str {
        self.ruleset_prefix
            .as_deref()
            .unwrap_or(constants::DEFAULT_RULESET_PREFIX)
    }

    pub fn effective_report_setting_template(&self) -> &str {
        self.report_setting_template
            .as_deref()
            .unwrap_or(constants::DEFAULT_REPORT_SETTING_TEMPLATE)
    }

    pub fn effective_test_project_pattern(&self) -> &str {
        self.test_project_pattern
            .as_deref()
            .unwrap_or(constants::DEFAULT_TEST_PROJECT_PATTERN)
    }

    /// Results setting key for a language, e.g. `sonar.cs.roslyn.reportFilePath`.
    pub fn report_setting_key(&self, language: Language) -> String {
        self.effective_report_setting_template()
            .replace("{lang}", language.key())
    }

    /// `<temp>/<conf>/<prefix><lang>.ruleset`
    pub fn ruleset_path(&self, temp_path: &Path, language: Language) -> PathBuf {
        temp_path.join(self.effective_conf_dir_name()).join(format!(
            "{}{}.{}",
            self.effective_ruleset_prefix(),
            language.key(),
            constants::RULESET_EXTENSION
        ))
    }

    /// `<temp>/<name>` for each well-known analyzer, in declared order.
    pub fn analyzer_paths(&self, temp_path: &Path) -> Vec<PathBuf> {
        self.effective_well_known_analyzers()
            .iter()
            .map(|name| temp_path.join(name))
            .collect()
    }

    /// `<temp>/<conf>/<name>` for each well-known additional file.
    pub fn additional_file_paths(&self, temp_path: &Path) -> Vec<PathBuf> {
        let conf = temp_path.join(self.effective_conf_dir_name());
        self.effective_well_known_additional_files()
            .iter()
            .map(|name| conf.join(name))
            .collect()
    }

    /// Load from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Build from resolved settings. Keys under `prebuild.*` override the
    /// compiled defaults; the test project pattern uses its scanner key.
    /// List values are comma-separated.
    pub fn from_resolver(resolver: &PropertyResolver) -> Result<Self, ConfigError> {
        let owned = |key: &str| {
            resolver
                .resolve(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let list = |key: &str| {
            resolver
                .resolve(key)
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };

        let config = Self {
            temp_path_key: owned("prebuild.tempPathKey"),
            error_log_file_name: owned("prebuild.errorLogFileName"),
            well_known_analyzers: list("prebuild.wellKnownAnalyzers"),
            well_known_additional_files: list("prebuild.wellKnownAdditionalFiles"),
            conf_dir_name: owned("prebuild.confDirName"),
            ruleset_prefix: owned("prebuild.rulesetPrefix"),
            report_setting_template: owned("prebuild.reportSettingTemplate"),
            test_project_pattern: owned(constants::TEST_PROJECT_PATTERN_SETTING),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configured names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_file_name("error_log_file_name", self.effective_error_log_file_name())?;
        check_file_name("conf_dir_name", self.effective_conf_dir_name())?;
        for name in self.effective_well_known_analyzers() {
            check_file_name("well_known_analyzers", &name)?;
        }
        for name in self.effective_well_known_additional_files() {
            check_file_name("well_known_additional_files", &name)?;
        }
        if self.effective_temp_path_key().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "temp_path_key".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !self.effective_report_setting_template().contains("{lang}") {
            return Err(ConfigError::ValidationFailed {
                field: "report_setting_template".to_string(),
                message: "must contain {lang}".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn or_defaults(configured: &[String], defaults: &[&str]) -> Vec<String> {
    if configured.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        configured.to_vec()
    }
}

fn check_file_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("'{name}' must be a bare file name"),
        });
    }
    Ok(())
}
